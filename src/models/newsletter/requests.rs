use serde::Deserialize;

use crate::errors::{ElearningError, Result};
use crate::models::common::form::non_blank;
use crate::utils::validate::validate_email;

#[derive(Debug, Deserialize)]
pub struct NewsletterForm {
    #[serde(default)]
    pub email: String,
    pub name: Option<String>,
    /// 操作完成后返回的页面
    pub redirect_to: Option<String>,
}

impl NewsletterForm {
    /// 返回规范化（小写）的邮箱与可选姓名
    pub fn validate(&self) -> Result<(String, Option<String>)> {
        let email = self.email.trim().to_lowercase();
        validate_email(&email).map_err(ElearningError::validation)?;
        Ok((email, non_blank(self.name.as_deref())))
    }
}
