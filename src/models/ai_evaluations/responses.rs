use serde::Serialize;
use ts_rs::TS;

use super::entities::AiEvaluation;

/// AI 评估列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "ai_evaluation.ts")]
pub struct AiEvaluationListResponse {
    pub items: Vec<AiEvaluation>,
    pub total: usize,
}
