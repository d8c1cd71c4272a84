//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_assignease_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AssignEaseError {
            $($variant(String),)*
        }

        impl AssignEaseError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AssignEaseError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AssignEaseError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AssignEaseError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AssignEaseError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AssignEaseError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_assignease_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    FileOperation("E004", "File Operation Error"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    Conflict("E007", "Resource Conflict"),
    Serialization("E008", "Serialization Error"),
    LanguageNotConfigured("E009", "Language Not Configured"),
    ExecutorNotFound("E010", "Executor Not Found"),
    Sandbox("E011", "Sandbox Execution Error"),
    HttpClient("E012", "HTTP Client Error"),
    AiGrading("E013", "AI Grading Error"),
}

impl AssignEaseError {
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

    /// 是否为数据库唯一约束冲突
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, AssignEaseError::Conflict(_))
    }
}

impl fmt::Display for AssignEaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AssignEaseError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AssignEaseError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => AssignEaseError::Conflict(msg),
            _ => AssignEaseError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for AssignEaseError {
    fn from(err: std::io::Error) -> Self {
        AssignEaseError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AssignEaseError {
    fn from(err: serde_json::Error) -> Self {
        AssignEaseError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for AssignEaseError {
    fn from(err: reqwest::Error) -> Self {
        AssignEaseError::HttpClient(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssignEaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AssignEaseError::database_config("test").code(), "E001");
        assert_eq!(AssignEaseError::validation("test").code(), "E005");
        assert_eq!(AssignEaseError::not_found("test").code(), "E006");
        assert_eq!(AssignEaseError::ai_grading("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AssignEaseError::language_not_configured("test").error_type(),
            "Language Not Configured"
        );
        assert_eq!(
            AssignEaseError::sandbox("test").error_type(),
            "Sandbox Execution Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = AssignEaseError::validation("Invalid status");
        assert_eq!(err.message(), "Invalid status");
    }

    #[test]
    fn test_format_simple() {
        let err = AssignEaseError::http_client("connection refused");
        let formatted = err.format_simple();
        assert!(formatted.contains("HTTP Client Error"));
        assert!(formatted.contains("connection refused"));
    }

    #[test]
    fn test_db_err_maps_to_operation() {
        let err: AssignEaseError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.code(), "E003");
        assert!(!err.is_unique_violation());
    }
}
