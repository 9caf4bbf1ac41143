use serde::Serialize;
use ts_rs::TS;

use crate::models::visitor_questions::{entities::VisitorQuestion, requests::ContactForm};

// 联系页
#[derive(Debug, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/visitor_question.ts")]
pub struct ContactPage {
    pub form: ContactForm,
    pub error: Option<String>,
}

// 教授查看访客提问
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/visitor_question.ts")]
pub struct VisitorQuestionsPage {
    pub questions: Vec<VisitorQuestion>,
    pub pending_only: bool,
    pub pending_count: usize,
}
