use serde::Serialize;
use ts_rs::TS;

use crate::models::{
    courses::entities::Course,
    exams::{
        entities::{Exam, ExamDefinition, ExamQuestion, ExamQuestionView},
        requests::{ExamDefinitionForm, ExamQuestionForm},
    },
};

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamDefinitionSummary {
    pub definition: ExamDefinition,
    pub question_count: u64,
}

// 考试列表页：教授看到全部模板，学生只看到已发布的
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamListPage {
    pub course: Course,
    pub exams: Vec<ExamDefinitionSummary>,
    pub is_owner: bool,
}

// 考试模板表单页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamFormPage {
    pub course: Course,
    pub form: ExamDefinitionForm,
    pub error: Option<String>,
}

// 题目管理页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamQuestionsPage {
    pub course: Course,
    pub definition: ExamDefinition,
    pub questions: Vec<ExamQuestion>,
    pub total_points: f64,
    pub form: ExamQuestionForm,
    pub error: Option<String>,
}

// 作答页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct TakeExamPage {
    pub course: Course,
    pub definition: ExamDefinition,
    pub questions: Vec<ExamQuestionView>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamAttemptView {
    pub exam: Exam,
    pub exam_title: Option<String>,
}

// 我的成绩页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct GradesPage {
    pub course: Course,
    pub attempts: Vec<ExamAttemptView>,
    pub evaluation: Option<Exam>,
    pub average: Option<f64>,
}
