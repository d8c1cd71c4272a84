use serde::Deserialize;
use ts_rs::TS;

/// AI 评估列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "ai_evaluation.ts")]
pub struct AiEvaluationListQuery {
    pub student_id: Option<i64>,
    pub assignment_id: Option<i64>,
}
