use serde::Deserialize;

use crate::errors::{ElearningError, Result};

pub const MAX_COMMENT_LENGTH: usize = 1000;

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub content: String,
}

impl CommentForm {
    pub fn validate(&self) -> Result<String> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(ElearningError::validation("O comentário não pode ser vazio"));
        }
        if content.chars().count() > MAX_COMMENT_LENGTH {
            return Err(ElearningError::validation(format!(
                "O comentário deve ter no máximo {MAX_COMMENT_LENGTH} caracteres"
            )));
        }
        Ok(content.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CreateCommentRequest {
    pub course_id: i64,
    pub student_id: i64,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_validation() {
        let form = |content: &str| CommentForm {
            content: content.to_string(),
        };
        assert_eq!(form("  Ótimo curso ").validate().unwrap(), "Ótimo curso");
        assert!(form("  ").validate().is_err());
        assert!(form(&"x".repeat(MAX_COMMENT_LENGTH + 1)).validate().is_err());
    }
}
