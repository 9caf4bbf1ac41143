use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 邮件订阅，取消订阅只将 active 置为 false
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/newsletter.ts")]
pub struct NewsletterInscription {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
