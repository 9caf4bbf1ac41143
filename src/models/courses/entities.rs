use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    // 课程所属教授
    pub professor_id: i64,
    pub price: f64,
    pub category: Option<String>,
    // 课时（小时）
    pub hours: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.professor_id == user_id
    }
}
