use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{AssignmentType, SubmissionType};

/// 创建作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct CreateAssignmentRequest {
    pub class_id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>, // ISO 8601 格式，如 "2026-01-24T12:00:00Z"
    pub assignment_type: Option<AssignmentType>,
    pub submission_type: Option<SubmissionType>,
    pub language: Option<String>,
    pub language_version: Option<String>,
}
