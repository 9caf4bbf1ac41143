use serde::Deserialize;

use crate::errors::{ElearningError, Result};

pub const MAX_DOUBT_LENGTH: usize = 2000;

// 提问表单
#[derive(Debug, Deserialize)]
pub struct DoubtForm {
    #[serde(default)]
    pub question: String,
}

impl DoubtForm {
    pub fn validate(&self) -> Result<String> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(ElearningError::validation("Escreva sua dúvida"));
        }
        if question.chars().count() > MAX_DOUBT_LENGTH {
            return Err(ElearningError::validation(format!(
                "A dúvida deve ter no máximo {MAX_DOUBT_LENGTH} caracteres"
            )));
        }
        Ok(question.to_string())
    }
}

// 回答表单（疑问与访客提问共用）
#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    #[serde(default)]
    pub answer: String,
}

// 创建疑问请求（用于存储层），状态固定为 ABERTA
#[derive(Debug, Clone)]
pub struct CreateDoubtRequest {
    pub course_id: i64,
    pub student_id: i64,
    pub question: String,
}
