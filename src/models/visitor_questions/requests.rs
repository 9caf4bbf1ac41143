use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{ElearningError, Result};
use crate::utils::validate::{validate_email, validate_name};

pub const MAX_MESSAGE_LENGTH: usize = 2000;

// 联系表单，校验失败时回显
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/visitor_question.ts")]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<CreateVisitorQuestionRequest> {
        let name = self.name.trim();
        validate_name(name).map_err(ElearningError::validation)?;
        let email = self.email.trim().to_lowercase();
        validate_email(&email).map_err(ElearningError::validation)?;
        let message = self.message.trim();
        if message.is_empty() {
            return Err(ElearningError::validation("Escreva sua mensagem"));
        }
        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ElearningError::validation(format!(
                "A mensagem deve ter no máximo {MAX_MESSAGE_LENGTH} caracteres"
            )));
        }
        Ok(CreateVisitorQuestionRequest {
            name: name.to_string(),
            email,
            message: message.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateVisitorQuestionRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

// 访客提问列表筛选
#[derive(Debug, Default, Deserialize)]
pub struct VisitorQuestionQuery {
    /// 仅显示未回答的问题
    #[serde(default, deserialize_with = "crate::models::common::form::deserialize_checkbox")]
    pub pending: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_form_validation() {
        let form = ContactForm {
            name: "Maria Silva".into(),
            email: " Maria@Example.com ".into(),
            message: "Vocês emitem certificado?".into(),
        };
        let request = form.validate().unwrap();
        assert_eq!(request.email, "maria@example.com");

        let no_message = ContactForm {
            message: "  ".into(),
            ..form.clone()
        };
        assert!(no_message.validate().is_err());

        let bad_email = ContactForm {
            email: "maria".into(),
            ..form
        };
        assert!(bad_email.validate().is_err());
    }
}
