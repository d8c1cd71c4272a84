use serde::Deserialize;
use ts_rs::TS;

use super::entities::TestCaseVisibility;

/// 添加测试用例请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "test_case.ts")]
pub struct CreateTestCaseRequest {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub expected_output: String,
    pub marks: Option<i32>,
    pub visibility: Option<TestCaseVisibility>,
    pub timeout: Option<i32>,
    pub memory_limit: Option<i32>,
}

/// 测试用例列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "test_case.ts")]
pub struct TestCaseListQuery {
    pub visibility: Option<TestCaseVisibility>,
}

/// 提交前运行公开测试用例请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "test_case.ts")]
pub struct RunTestCasesRequest {
    pub question_id: i64,
    pub source_code: String,
    pub language_name: String,
    pub language_version: String,
}
