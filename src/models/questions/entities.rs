use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 默认题目满分
pub const DEFAULT_TOTAL_MARKS: f64 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct AssignmentQuestion {
    pub id: i64,
    pub assignment_id: i64,
    // 题目内容
    pub title: String,
    pub total_marks: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
