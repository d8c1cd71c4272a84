use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 测试用例结果状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "test_case_result.ts")]
pub enum TestCaseResultStatus {
    Passed,
    Failed,
    Error,
}

impl std::fmt::Display for TestCaseResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestCaseResultStatus::Passed => write!(f, "passed"),
            TestCaseResultStatus::Failed => write!(f, "failed"),
            TestCaseResultStatus::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for TestCaseResultStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passed" => Ok(TestCaseResultStatus::Passed),
            "failed" => Ok(TestCaseResultStatus::Failed),
            "error" => Ok(TestCaseResultStatus::Error),
            _ => Err(format!("Invalid test case result status: {s}")),
        }
    }
}

/// 提交在单个测试用例上的评测结果，每个 (提交, 用例) 仅一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "test_case_result.ts")]
pub struct TestCaseResult {
    pub id: i64,
    pub submission_id: i64,
    pub test_case_id: i64,
    pub status: TestCaseResultStatus,
    pub actual_output: Option<String>,
    // 秒
    pub execution_time: Option<f64>,
    // KB
    pub memory_used: Option<i64>,
    pub judge0_token: Option<String>,
    pub error_message: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 写入（或覆盖）测试用例结果
#[derive(Debug, Clone)]
pub struct UpsertTestCaseResult {
    pub submission_id: i64,
    pub test_case_id: i64,
    pub status: TestCaseResultStatus,
    pub actual_output: Option<String>,
    pub execution_time: Option<f64>,
    pub memory_used: Option<i64>,
    pub judge0_token: Option<String>,
    pub error_message: Option<String>,
}
