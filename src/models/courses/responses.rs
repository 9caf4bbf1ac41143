use serde::Serialize;
use ts_rs::TS;

use crate::models::{
    classrooms::entities::Classroom,
    comments::entities::CommentView,
    common::PaginationInfo,
    courses::{entities::Course, requests::CourseForm},
    doubts::entities::DoubtView,
    enrollments::entities::Enrollment,
    exams::entities::ExamDefinition,
    users::entities::UserSummary,
};

// 课程列表（存储层返回）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseListResponse {
    pub items: Vec<Course>,
    pub pagination: PaginationInfo,
}

// 首页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct HomePage {
    pub system_name: String,
    pub latest_courses: Vec<Course>,
}

// 课程目录页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CatalogPage {
    pub courses: CourseListResponse,
    pub categories: Vec<String>,
    pub search: Option<String>,
    pub category: Option<String>,
}

// 课程表单页
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseFormPage {
    pub form: CourseForm,
    pub error: Option<String>,
}

impl CourseFormPage {
    pub fn from_course(course: &Course) -> Self {
        Self {
            form: CourseForm {
                id: Some(course.id.to_string()),
                title: course.title.clone(),
                description: course.description.clone(),
                price: Some(course.price.to_string()),
                category: course.category.clone(),
                hours: Some(course.hours.to_string()),
            },
            error: None,
        }
    }
}

// 课程评价汇总
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct EvaluationSummary {
    pub average: Option<f64>,
    pub count: u64,
}

// 课程详情页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseDetailPage {
    pub course: Course,
    pub professor: Option<UserSummary>,
    pub classrooms: Vec<Classroom>,
    pub comments: Vec<CommentView>,
    pub doubts: Vec<DoubtView>,
    pub exams: Vec<ExamDefinition>,
    pub evaluations: EvaluationSummary,
    pub is_owner: bool,
    pub enrollment: Option<Enrollment>,
    pub student_count: u64,
}
