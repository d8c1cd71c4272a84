use serde::Serialize;
use ts_rs::TS;

use super::entities::Submission;
use crate::models::common::pagination::PaginationInfo;
use crate::models::test_case_results::entities::TestCaseResult;

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<Submission>,
    pub pagination: PaginationInfo,
}

/// 一次评测的汇总
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct GradingSummary {
    pub submission_id: i64,
    pub total_testcases: i32,
    pub passed_testcases: i32,
    pub auto_marks: f64,
    pub percentage: f64,
}

/// 手动给分响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct CustomMarksResponse {
    pub submission_id: i64,
    pub auto_marks: f64,
    pub custom_marks: Option<f64>,
}

/// 提交的测试用例结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct SubmissionTestcaseResultsResponse {
    pub submission_id: i64,
    pub student_id: i64,
    pub question: String,
    pub code: Option<String>,
    pub total_testcases: i32,
    pub passed_testcases: i32,
    pub auto_marks: f64,
    pub custom_marks: Option<f64>,
    pub results: Vec<TestCaseResult>,
}
