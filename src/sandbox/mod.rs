//! 代码执行沙箱适配层
//!
//! 把 Judge0 / Piston 的 HTTP 接口统一为 [`CodeExecutor`]，
//! 评测层只依赖这里的规范化结果。

pub mod judge0;
pub mod piston;
pub mod register;

use std::fmt::Display;

use crate::models::test_case_results::entities::TestCaseResultStatus;

pub use judge0::Judge0Executor;
pub use piston::PistonExecutor;

/// 目标语言
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageTarget {
    // 沙箱语言名，如 "python"
    pub name: String,
    // 运行时版本，Piston 需要，可为空
    pub version: String,
    // 已知的 Judge0 语言 ID
    pub judge0_id: Option<i32>,
}

/// 单个测试用例的执行请求
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub source_code: String,
    pub language: LanguageTarget,
    pub stdin: String,
    pub expected_output: String,
    // 秒
    pub timeout: i32,
    // KB
    pub memory_limit: i32,
}

/// 规范化后的执行结果
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutcome {
    pub status: TestCaseResultStatus,
    pub passed: bool,
    pub actual_output: String,
    // 秒
    pub execution_time: Option<f64>,
    // KB
    pub memory_used: Option<i64>,
    pub error_message: Option<String>,
    pub token: Option<String>,
}

impl ExecutionOutcome {
    /// 网络、HTTP 或解码失败时的合成结果
    pub fn from_error(err: impl Display) -> Self {
        Self {
            status: TestCaseResultStatus::Error,
            passed: false,
            actual_output: String::new(),
            execution_time: None,
            memory_used: None,
            error_message: Some(err.to_string()),
            token: None,
        }
    }
}

/// 代码执行后端
///
/// `execute` 不返回错误：任何失败都折叠为 `status = error` 的结果，
/// 保证单个用例失败不会中断整次评测。
#[async_trait::async_trait]
pub trait CodeExecutor: Send + Sync {
    /// 后端名称
    fn name(&self) -> &'static str;

    async fn execute(&self, request: &ExecutionRequest) -> ExecutionOutcome;
}

/// 忽略首尾空白比较输出
pub(crate) fn outputs_match(actual: &str, expected: &str) -> bool {
    actual.trim() == expected.trim()
}

/// 空字符串视为无
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outputs_match_ignores_surrounding_whitespace() {
        assert!(outputs_match("42\n", "42"));
        assert!(outputs_match("  a b \r\n", "a b"));
        assert!(!outputs_match("a  b", "a b"));
    }

    #[test]
    fn test_from_error_is_failed_error() {
        let outcome = ExecutionOutcome::from_error("connection refused");
        assert_eq!(outcome.status, TestCaseResultStatus::Error);
        assert!(!outcome.passed);
        assert_eq!(outcome.actual_output, "");
        assert_eq!(outcome.error_message.as_deref(), Some("connection refused"));
    }
}
