use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 访客通过联系表单提交的问题
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/visitor_question.ts")]
pub struct VisitorQuestion {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub answer: Option<String>,
    pub answered: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub answered_at: Option<chrono::DateTime<chrono::Utc>>,
}
