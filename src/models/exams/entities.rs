use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::QuestionType;

// 教授编写的考试模板
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamDefinition {
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub published: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 考试题目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamQuestion {
    pub id: i64,
    pub exam_definition_id: i64,
    pub statement: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub points: f64,
    pub sequence: i32,
}

// 作答页展示的题目，不含标准答案
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamQuestionView {
    pub id: i64,
    pub statement: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub points: f64,
    pub sequence: i32,
}

impl From<ExamQuestion> for ExamQuestionView {
    fn from(question: ExamQuestion) -> Self {
        Self {
            id: question.id,
            statement: question.statement,
            question_type: question.question_type,
            options: question.options,
            points: question.points,
            sequence: question.sequence,
        }
    }
}

// 成绩记录类别
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub enum ExamKind {
    /// 学生对课程的评价（0 到 10 分）
    #[serde(rename = "EVALUATION")]
    Evaluation,
    /// 一次考试作答
    #[serde(rename = "ATTEMPT")]
    Attempt,
}

impl ExamKind {
    pub const EVALUATION: &'static str = "EVALUATION";
    pub const ATTEMPT: &'static str = "ATTEMPT";
}

impl<'de> Deserialize<'de> for ExamKind {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ExamKind>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ExamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExamKind::Evaluation => write!(f, "{}", ExamKind::EVALUATION),
            ExamKind::Attempt => write!(f, "{}", ExamKind::ATTEMPT),
        }
    }
}

impl std::str::FromStr for ExamKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ExamKind::EVALUATION => Ok(ExamKind::Evaluation),
            ExamKind::ATTEMPT => Ok(ExamKind::Attempt),
            _ => Err(format!("Invalid exam kind: {s}")),
        }
    }
}

// 学生的一条成绩：课程评价或考试作答
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct Exam {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub kind: ExamKind,
    pub exam_definition_id: Option<i64>,
    pub grade: f64,
    pub comment: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
