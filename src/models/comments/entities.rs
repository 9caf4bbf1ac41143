use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/comment.ts")]
pub struct Comment {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/comment.ts")]
pub struct CommentView {
    pub comment: Comment,
    pub student_name: Option<String>,
}
