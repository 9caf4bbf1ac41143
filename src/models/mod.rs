pub mod auth;
pub mod classrooms;
pub mod comments;
pub mod common;
pub mod courses;
pub mod doubts;
pub mod enrollments;
pub mod exams;
pub mod exercises;
pub mod newsletter;
pub mod users;
pub mod visitor_questions;

pub use common::*;
