use serde::Serialize;
use ts_rs::TS;

/// 单个公开测试用例的运行结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "test_case.ts")]
pub struct RunTestCaseResult {
    pub testcase_id: i64,
    pub input: String,
    pub expected_output: String,
    pub actual_output: String,
    pub error_message: String,
    pub passed: bool,
}

/// 公开测试用例运行汇总，不落库
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "test_case.ts")]
pub struct RunTestCasesResponse {
    pub results: Vec<RunTestCaseResult>,
    pub total: usize,
    pub passed: usize,
}
