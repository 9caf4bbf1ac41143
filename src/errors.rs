//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 页面层按错误类别决定提示方式：持久化错误只给出通用提示，
//! 校验错误直接展示消息，鉴权错误重定向。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_elearning_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ElearningError {
            $($variant(String),)*
        }

        impl ElearningError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ElearningError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ElearningError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ElearningError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ElearningError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ElearningError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_elearning_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Conflict("E008", "Resource Conflict"),
    Serialization("E009", "Serialization Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
    Session("E012", "Session Error"),
}

impl ElearningError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 持久化/基础设施类错误，不应把细节暴露给用户
    pub fn is_technical(&self) -> bool {
        matches!(
            self,
            ElearningError::CacheConnection(_)
                | ElearningError::CachePluginNotFound(_)
                | ElearningError::DatabaseConfig(_)
                | ElearningError::DatabaseConnection(_)
                | ElearningError::DatabaseOperation(_)
                | ElearningError::Serialization(_)
                | ElearningError::Session(_)
        )
    }

    /// 面向用户的提示：技术错误统一为通用提示，其余直接使用错误消息
    pub fn user_message(&self, technical_fallback: &str) -> String {
        if self.is_technical() {
            technical_fallback.to_string()
        } else {
            self.message().to_string()
        }
    }
}

impl fmt::Display for ElearningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ElearningError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ElearningError {
    fn from(err: sea_orm::DbErr) -> Self {
        ElearningError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ElearningError {
    fn from(err: std::io::Error) -> Self {
        ElearningError::DatabaseConfig(err.to_string())
    }
}

impl From<chrono::ParseError> for ElearningError {
    fn from(err: chrono::ParseError) -> Self {
        ElearningError::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for ElearningError {
    fn from(err: serde_json::Error) -> Self {
        ElearningError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for ElearningError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        ElearningError::Session(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ElearningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ElearningError::cache_connection("test").code(), "E001");
        assert_eq!(ElearningError::database_config("test").code(), "E003");
        assert_eq!(ElearningError::validation("test").code(), "E006");
        assert_eq!(ElearningError::authorization("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ElearningError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(
            ElearningError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_format_simple() {
        let err = ElearningError::validation("Título obrigatório");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Título obrigatório"));
    }

    #[test]
    fn test_user_message_hides_technical_details() {
        let db = ElearningError::database_operation("UNIQUE constraint failed: users.email");
        assert_eq!(db.user_message("Erro técnico"), "Erro técnico");

        let validation = ElearningError::validation("E-mail inválido");
        assert_eq!(validation.user_message("Erro técnico"), "E-mail inválido");
    }
}
