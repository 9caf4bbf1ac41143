use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::User;

/// 闪存消息类别
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/view.ts")]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

/// 一次性提示消息，随重定向写入 cookie，在下一次页面渲染时读取并清除
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/view.ts")]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            message: message.into(),
        }
    }
}

// 统一的页面响应结构：视图名 + 视图模型
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/view.ts")]
pub struct ViewResponse<T: TS> {
    pub view: String,
    pub model: T,
    pub flash: Option<Flash>,
    pub user: Option<User>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ViewResponse<T> {
    pub fn new(view: impl Into<String>, model: T) -> Self {
        Self {
            view: view.into(),
            model,
            flash: None,
            user: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn with_flash(mut self, flash: Option<Flash>) -> Self {
        self.flash = flash;
        self
    }

    pub fn with_user(mut self, user: Option<User>) -> Self {
        self.user = user;
        self
    }
}

// 未匹配任何路由
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/view.ts")]
pub struct NotFoundPage {
    pub path: String,
}
