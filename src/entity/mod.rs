//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod classrooms;
pub mod comments;
pub mod courses;
pub mod doubts;
pub mod enrollments;
pub mod exam_definitions;
pub mod exam_questions;
pub mod exams;
pub mod exercises;
pub mod newsletter_inscriptions;
pub mod student_exercise_answers;
pub mod users;
pub mod visitor_questions;
