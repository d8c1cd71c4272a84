use serde::Serialize;
use ts_rs::TS;

use super::entities::Assignment;
use crate::models::questions::entities::AssignmentQuestion;
use crate::models::submissions::entities::SubmissionStatus;

/// 作业详情（含题目）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub assignment: Assignment,
    pub questions: Vec<AssignmentQuestion>,
}

/// 作业测试用例汇总中的单条提交
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct SubmissionGradingRow {
    pub submission_id: i64,
    pub student_id: i64,
    pub question_id: i64,
    pub question_title: String,
    pub total_testcases: i32,
    pub passed_testcases: i32,
    pub auto_marks: f64,
    pub custom_marks: Option<f64>,
    pub status: SubmissionStatus,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// 作业测试用例汇总
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct AssignmentTestcaseSummary {
    pub assignment_id: i64,
    pub assignment_title: String,
    pub total_submissions: usize,
    pub submissions: Vec<SubmissionGradingRow>,
}
