use serde::Serialize;
use ts_rs::TS;

use crate::models::{
    classrooms::{entities::Classroom, requests::ClassroomForm},
    courses::entities::Course,
    exercises::entities::{Exercise, ExerciseView},
};

// 课时列表页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct ClassroomListPage {
    pub course: Course,
    pub classrooms: Vec<Classroom>,
    pub is_owner: bool,
    pub progress: Option<f64>,
}

// 课时详情页：教授看到正确答案，学生只看到自己的作答
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct ClassroomDetailPage {
    pub course: Course,
    pub classroom: Classroom,
    pub position: usize,
    pub total: usize,
    pub previous_id: Option<i64>,
    pub next_id: Option<i64>,
    pub exercises: Vec<ExerciseView>,
    pub is_owner: bool,
    pub progress: Option<f64>,
}

// 课时表单页
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct ClassroomFormPage {
    pub course: Course,
    pub form: ClassroomForm,
    pub exercises: Vec<Exercise>,
    pub error: Option<String>,
}
