//! AI 评估实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ai_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub submission_id: i64,
    pub assignment_id: i64,
    pub question_id: i64,
    pub student_id: i64,
    #[sea_orm(column_type = "Text")]
    pub question_text: String,
    #[sea_orm(column_type = "Text")]
    pub student_answer: String,
    pub mistake_type: Option<String>,
    pub ai_score: Option<f64>,
    pub confidence: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub raw_response: Option<String>,
    pub model_name: String,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub error: Option<String>,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_ai_evaluation(self) -> crate::models::ai_evaluations::entities::AiEvaluation {
        use crate::models::ai_evaluations::entities::AiEvaluation;
        use chrono::{DateTime, Utc};

        AiEvaluation {
            id: self.id,
            submission_id: self.submission_id,
            assignment_id: self.assignment_id,
            question_id: self.question_id,
            student_id: self.student_id,
            question_text: self.question_text,
            student_answer: self.student_answer,
            mistake_type: self.mistake_type.and_then(|s| s.parse().ok()),
            ai_score: self.ai_score,
            confidence: self.confidence,
            feedback: self.feedback,
            raw_response: self
                .raw_response
                .and_then(|raw| serde_json::from_str(&raw).ok()),
            model_name: self.model_name,
            status: self.status.parse().unwrap_or_default(),
            error: self.error,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            completed_at: self
                .completed_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}
