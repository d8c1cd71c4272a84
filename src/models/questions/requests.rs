use serde::Deserialize;
use ts_rs::TS;

/// 添加题目请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "question.ts")]
pub struct CreateQuestionRequest {
    pub title: String,
    pub total_marks: Option<f64>,
}
