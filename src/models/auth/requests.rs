use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::form::deserialize_checkbox;

// 登录表单（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginForm {
    /// 登录邮箱
    #[serde(default)]
    pub email: String,
    /// 密码
    #[serde(default)]
    pub password: String,
    /// 是否记住我
    #[serde(default, deserialize_with = "deserialize_checkbox")]
    pub remember_me: bool,
}

// 注册表单，校验失败时原样回显（密码除外）
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing)]
    #[ts(skip)]
    pub password: String,
    #[serde(default, skip_serializing)]
    #[ts(skip)]
    pub password_confirmation: String,
    /// STUDENT 或 PROFESSOR
    #[serde(default)]
    pub role: String,
    pub specialization: Option<String>,
}

// 个人资料更新表单，留空的字段保持不变
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct UpdateProfileForm {
    pub name: Option<String>,
    pub specialization: Option<String>,
    #[serde(default, skip_serializing)]
    #[ts(skip)]
    pub current_password: Option<String>,
    #[serde(default, skip_serializing)]
    #[ts(skip)]
    pub new_password: Option<String>,
}
