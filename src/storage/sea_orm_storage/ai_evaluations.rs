//! AI 评估存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::ai_evaluations::{ActiveModel, Column, Entity as AiEvaluations};
use crate::errors::{AssignEaseError, Result};
use crate::models::ai_evaluations::{
    entities::{AiEvaluation, EvaluationStatus, EvaluationVerdict, NewAiEvaluation},
    requests::AiEvaluationListQuery,
};
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建 pending 状态的 AI 评估
    pub async fn create_ai_evaluation_impl(&self, req: NewAiEvaluation) -> Result<AiEvaluation> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            submission_id: Set(req.submission_id),
            assignment_id: Set(req.assignment_id),
            question_id: Set(req.question_id),
            student_id: Set(req.student_id),
            question_text: Set(req.question_text),
            student_answer: Set(req.student_answer),
            mistake_type: Set(None),
            ai_score: Set(None),
            confidence: Set(None),
            feedback: Set(None),
            raw_response: Set(None),
            model_name: Set(req.model_name),
            status: Set(EvaluationStatus::Pending.to_string()),
            error: Set(None),
            created_at: Set(now),
            completed_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建 AI 评估失败", e))?;

        Ok(result.into_ai_evaluation())
    }

    /// 通过 ID 获取 AI 评估
    pub async fn get_ai_evaluation_by_id_impl(&self, id: i64) -> Result<Option<AiEvaluation>> {
        let result = AiEvaluations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询 AI 评估失败: {e}")))?;

        Ok(result.map(|m| m.into_ai_evaluation()))
    }

    /// 列出 AI 评估
    pub async fn list_ai_evaluations_impl(
        &self,
        query: AiEvaluationListQuery,
    ) -> Result<Vec<AiEvaluation>> {
        let mut select = AiEvaluations::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        let result = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询 AI 评估列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_ai_evaluation()).collect())
    }

    /// pending -> done
    ///
    /// 条件更新，只有仍处于 pending 的记录会被修改，返回是否发生了迁移。
    pub async fn complete_ai_evaluation_impl(
        &self,
        id: i64,
        verdict: &EvaluationVerdict,
        raw_response: serde_json::Value,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let raw = serde_json::to_string(&raw_response)?;

        let result = AiEvaluations::update_many()
            .col_expr(Column::MistakeType, Expr::value(verdict.mistake_type.to_string()))
            .col_expr(Column::AiScore, Expr::value(verdict.score as f64))
            .col_expr(Column::Confidence, Expr::value(verdict.confidence))
            .col_expr(Column::Feedback, Expr::value(verdict.feedback.clone()))
            .col_expr(Column::RawResponse, Expr::value(raw))
            .col_expr(Column::Status, Expr::value(EvaluationStatus::Done.to_string()))
            .col_expr(Column::CompletedAt, Expr::value(now))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(EvaluationStatus::Pending.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("更新 AI 评估失败: {e}")))?;

        Ok(result.rows_affected == 1)
    }

    /// pending -> error
    pub async fn fail_ai_evaluation_impl(&self, id: i64, error: &str) -> Result<bool> {
        let result = AiEvaluations::update_many()
            .col_expr(Column::Status, Expr::value(EvaluationStatus::Error.to_string()))
            .col_expr(Column::Error, Expr::value(error.to_string()))
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(EvaluationStatus::Pending.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("更新 AI 评估失败: {e}")))?;

        Ok(result.rows_affected == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{memory_storage, seed_question};
    use super::*;
    use crate::models::ai_evaluations::entities::MistakeType;
    use crate::models::submissions::requests::CreateSubmissionRequest;

    async fn pending(storage: &SeaOrmStorage) -> AiEvaluation {
        let (assignment, question) = seed_question(storage, Some("python"), 10.0).await;
        let submission = storage
            .create_submission_impl(CreateSubmissionRequest {
                student_id: 3,
                assignment_id: assignment.id,
                question_id: question.id,
                code: None,
                text_submission: Some("answer".to_string()),
            })
            .await
            .unwrap();
        storage
            .create_ai_evaluation_impl(NewAiEvaluation {
                submission_id: submission.id,
                assignment_id: assignment.id,
                question_id: question.id,
                student_id: 3,
                question_text: question.title,
                student_answer: "answer".to_string(),
                model_name: "llama3:8b-instruct-q4_0".to_string(),
            })
            .await
            .unwrap()
    }

    fn verdict() -> EvaluationVerdict {
        EvaluationVerdict {
            mistake_type: MistakeType::Logic,
            score: 6,
            confidence: 0.8,
            feedback: "Off by one.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_complete_is_terminal() {
        let storage = memory_storage().await;
        let evaluation = pending(&storage).await;
        assert_eq!(evaluation.status, EvaluationStatus::Pending);

        let raw = serde_json::to_value(verdict()).unwrap();
        assert!(
            storage
                .complete_ai_evaluation_impl(evaluation.id, &verdict(), raw.clone())
                .await
                .unwrap()
        );
        // 第二次迁移不生效
        assert!(
            !storage
                .complete_ai_evaluation_impl(evaluation.id, &verdict(), raw)
                .await
                .unwrap()
        );
        assert!(
            !storage
                .fail_ai_evaluation_impl(evaluation.id, "late failure")
                .await
                .unwrap()
        );

        let stored = storage
            .get_ai_evaluation_by_id_impl(evaluation.id)
            .await
            .unwrap()
            .expect("evaluation exists");
        assert_eq!(stored.status, EvaluationStatus::Done);
        assert_eq!(stored.ai_score, Some(6.0));
        assert_eq!(stored.mistake_type, Some(MistakeType::Logic));
        assert!(stored.completed_at.is_some());
        assert!(stored.error.is_none());
        assert_eq!(stored.raw_response.unwrap()["score"], 6);
    }

    #[tokio::test]
    async fn test_fail_records_error() {
        let storage = memory_storage().await;
        let evaluation = pending(&storage).await;

        assert!(
            storage
                .fail_ai_evaluation_impl(evaluation.id, "LLM HTTP 500: boom")
                .await
                .unwrap()
        );
        let stored = storage
            .get_ai_evaluation_by_id_impl(evaluation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, EvaluationStatus::Error);
        assert_eq!(stored.error.as_deref(), Some("LLM HTTP 500: boom"));
        assert!(stored.ai_score.is_none());
    }

    #[tokio::test]
    async fn test_one_evaluation_per_submission() {
        let storage = memory_storage().await;
        let evaluation = pending(&storage).await;

        let err = storage
            .create_ai_evaluation_impl(NewAiEvaluation {
                submission_id: evaluation.submission_id,
                assignment_id: evaluation.assignment_id,
                question_id: evaluation.question_id,
                student_id: evaluation.student_id,
                question_text: String::new(),
                student_answer: String::new(),
                model_name: "m".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());

        let listed = storage
            .list_ai_evaluations_impl(AiEvaluationListQuery {
                student_id: Some(3),
                assignment_id: None,
            })
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
    }
}
