//! 后台 AI 评估
//!
//! 评估在独立的 tokio 任务中执行，创建评估记录的一方不等待结果。
//! 同一评估 ID 只应被调度一次；状态迁移本身也是条件更新，重复执行不会覆盖终态。

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::grader::AiGrader;
use crate::errors::Result;
use crate::events::{EventDispatcher, GradingEvent};
use crate::models::ai_evaluations::entities::{AiEvaluation, EvaluationStatus, NewAiEvaluation};
use crate::models::questions::entities::AssignmentQuestion;
use crate::models::submissions::entities::Submission;
use crate::storage::Storage;

/// 为新提交创建 pending 评估并在后台执行
pub async fn schedule_for_submission(
    storage: Arc<dyn Storage>,
    grader: Arc<AiGrader>,
    dispatcher: EventDispatcher,
    submission: &Submission,
    question: &AssignmentQuestion,
) -> Result<AiEvaluation> {
    let evaluation = storage
        .create_ai_evaluation(NewAiEvaluation {
            submission_id: submission.id,
            assignment_id: submission.assignment_id,
            question_id: submission.question_id,
            student_id: submission.student_id,
            question_text: question.title.clone(),
            student_answer: submission.answer_text().to_string(),
            model_name: grader.model_name().to_string(),
        })
        .await?;

    spawn_evaluation(storage, grader, dispatcher, evaluation.id);
    Ok(evaluation)
}

pub fn spawn_evaluation(
    storage: Arc<dyn Storage>,
    grader: Arc<AiGrader>,
    dispatcher: EventDispatcher,
    evaluation_id: i64,
) -> JoinHandle<()> {
    debug!("Spawning AI evaluation {}", evaluation_id);
    tokio::spawn(async move {
        run_evaluation(storage, grader, dispatcher, evaluation_id).await;
    })
}

/// 执行一次评估并写入终态，错误只记录日志
pub async fn run_evaluation(
    storage: Arc<dyn Storage>,
    grader: Arc<AiGrader>,
    dispatcher: EventDispatcher,
    evaluation_id: i64,
) {
    let evaluation = match storage.get_ai_evaluation_by_id(evaluation_id).await {
        Ok(Some(evaluation)) => evaluation,
        Ok(None) => {
            warn!("AI evaluation {} not found, skipping", evaluation_id);
            return;
        }
        Err(e) => {
            error!("Failed to load AI evaluation {}: {}", evaluation_id, e);
            return;
        }
    };

    if evaluation.status != EvaluationStatus::Pending {
        debug!(
            "AI evaluation {} already {}, skipping",
            evaluation_id, evaluation.status
        );
        return;
    }

    match grader
        .evaluate(&evaluation.question_text, &evaluation.student_answer)
        .await
    {
        Ok(verdict) => {
            let raw = match serde_json::to_value(&verdict) {
                Ok(raw) => raw,
                Err(e) => {
                    error!("Failed to serialize verdict {}: {}", evaluation_id, e);
                    serde_json::Value::Null
                }
            };

            match storage
                .complete_ai_evaluation(evaluation_id, &verdict, raw)
                .await
            {
                Ok(true) => {
                    info!(
                        "AI evaluation {} done: {} ({}/10)",
                        evaluation_id, verdict.mistake_type, verdict.score
                    );
                    dispatcher
                        .dispatch(GradingEvent::EvaluationCompleted {
                            evaluation_id,
                            submission_id: evaluation.submission_id,
                            assignment_id: evaluation.assignment_id,
                            student_id: evaluation.student_id,
                            score: verdict.score,
                        })
                        .await;
                }
                Ok(false) => {
                    debug!(
                        "AI evaluation {} left pending before completion",
                        evaluation_id
                    );
                }
                Err(e) => error!("Failed to store AI evaluation {}: {}", evaluation_id, e),
            }
        }
        Err(e) => {
            warn!("AI evaluation {} failed: {}", evaluation_id, e.message());
            if let Err(store_err) = storage.fail_ai_evaluation(evaluation_id, e.message()).await {
                error!(
                    "Failed to mark AI evaluation {} as error: {}",
                    evaluation_id, store_err
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::grader::tests::ScriptedModel;
    use crate::errors::AssignEaseError;
    use crate::models::ai_evaluations::entities::MistakeType;
    use crate::models::notifications::requests::NotificationListQuery;
    use crate::models::submissions::requests::CreateSubmissionRequest;
    use crate::storage::sea_orm_storage::{memory_storage, seed_question};
    use std::time::Duration;

    async fn fixture(
        replies: Vec<Result<String>>,
    ) -> (Arc<dyn Storage>, Arc<AiGrader>, EventDispatcher, Submission, AssignmentQuestion) {
        let storage = memory_storage().await;
        let (assignment, question) = seed_question(&storage, Some("python"), 10.0).await;
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let submission = storage
            .create_submission(CreateSubmissionRequest {
                student_id: 7,
                assignment_id: assignment.id,
                question_id: question.id,
                code: Some("print('hi')".to_string()),
                text_submission: None,
            })
            .await
            .unwrap();
        let grader = Arc::new(AiGrader::new(
            Arc::new(ScriptedModel::new(replies)),
            1,
            Duration::ZERO,
        ));
        let dispatcher = EventDispatcher::new(storage.clone(), 8);
        (storage, grader, dispatcher, submission, question)
    }

    #[tokio::test]
    async fn test_successful_evaluation_reaches_done_and_notifies() {
        let (storage, grader, dispatcher, submission, question) = fixture(vec![Ok(
            r#"{"mistake_type":"none","confidence":0.95,"score":9,"feedback":"Correct."}"#
                .to_string(),
        )])
        .await;
        let mut events = dispatcher.subscribe();

        let evaluation = storage
            .create_ai_evaluation(NewAiEvaluation {
                submission_id: submission.id,
                assignment_id: submission.assignment_id,
                question_id: question.id,
                student_id: submission.student_id,
                question_text: question.title.clone(),
                student_answer: submission.answer_text().to_string(),
                model_name: grader.model_name().to_string(),
            })
            .await
            .unwrap();

        spawn_evaluation(storage.clone(), grader, dispatcher, evaluation.id)
            .await
            .unwrap();

        let stored = storage
            .get_ai_evaluation_by_id(evaluation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, EvaluationStatus::Done);
        assert_eq!(stored.mistake_type, Some(MistakeType::None));
        assert_eq!(stored.ai_score, Some(9.0));
        assert_eq!(stored.feedback.as_deref(), Some("Correct."));
        assert!(stored.completed_at.is_some());
        assert_eq!(stored.raw_response.as_ref().unwrap()["score"], 9);

        match events.recv().await.unwrap() {
            GradingEvent::EvaluationCompleted {
                evaluation_id,
                score,
                ..
            } => {
                assert_eq!(evaluation_id, evaluation.id);
                assert_eq!(score, 9);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_evaluation_records_error_without_event() {
        let (storage, grader, dispatcher, submission, question) = fixture(vec![
            Err(AssignEaseError::ai_grading("LLM HTTP 500: down")),
            Err(AssignEaseError::ai_grading("LLM HTTP 500: still down")),
        ])
        .await;

        let evaluation =
            schedule_for_submission(storage.clone(), grader.clone(), dispatcher.clone(), &submission, &question)
                .await
                .unwrap();
        assert_eq!(evaluation.status, EvaluationStatus::Pending);
        assert_eq!(evaluation.student_answer, "print('hi')");
        assert_eq!(evaluation.question_text, "Echo the input");

        // 等待后台任务写入终态
        let mut stored = evaluation.clone();
        for _ in 0..100 {
            stored = storage
                .get_ai_evaluation_by_id(evaluation.id)
                .await
                .unwrap()
                .unwrap();
            if stored.status != EvaluationStatus::Pending {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(stored.status, EvaluationStatus::Error);
        assert_eq!(
            stored.error.as_deref(),
            Some("AI grading failed: LLM HTTP 500: still down")
        );
        assert!(stored.ai_score.is_none());

        let notifications = storage
            .list_notifications(NotificationListQuery {
                event_type: Some("evaluation_completed".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(notifications.is_empty());
    }

    #[tokio::test]
    async fn test_terminal_evaluation_is_not_rerun() {
        let (storage, grader, dispatcher, submission, question) = fixture(vec![]).await;
        let evaluation = storage
            .create_ai_evaluation(NewAiEvaluation {
                submission_id: submission.id,
                assignment_id: submission.assignment_id,
                question_id: question.id,
                student_id: submission.student_id,
                question_text: question.title.clone(),
                student_answer: String::new(),
                model_name: "scripted".to_string(),
            })
            .await
            .unwrap();
        storage
            .fail_ai_evaluation(evaluation.id, "earlier failure")
            .await
            .unwrap();

        run_evaluation(storage.clone(), grader, dispatcher, evaluation.id).await;

        let stored = storage
            .get_ai_evaluation_by_id(evaluation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.error.as_deref(), Some("earlier failure"));
    }
}
