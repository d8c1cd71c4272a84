//! 通知事件边界
//!
//! 评测流程中产生的事件：记录日志、写入通知出站表，并广播给进程内订阅者。
//! 通知的格式化与投递（邮件等）不在本服务内完成。

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::models::notifications::entities::NewNotification;
use crate::storage::Storage;

/// 默认广播缓冲区大小
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GradingEvent {
    AssignmentCreated {
        assignment_id: i64,
        class_id: i64,
        teacher_id: i64,
        title: String,
    },
    SubmissionCreated {
        submission_id: i64,
        assignment_id: i64,
        question_id: i64,
        student_id: i64,
    },
    EvaluationCompleted {
        evaluation_id: i64,
        submission_id: i64,
        assignment_id: i64,
        student_id: i64,
        score: i64,
    },
}

impl GradingEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            GradingEvent::AssignmentCreated { .. } => "assignment_created",
            GradingEvent::SubmissionCreated { .. } => "submission_created",
            GradingEvent::EvaluationCompleted { .. } => "evaluation_completed",
        }
    }

    /// 关联对象 (类型, ID)
    pub fn reference(&self) -> (&'static str, i64) {
        match self {
            GradingEvent::AssignmentCreated { assignment_id, .. } => ("assignment", *assignment_id),
            GradingEvent::SubmissionCreated { submission_id, .. } => ("submission", *submission_id),
            GradingEvent::EvaluationCompleted { evaluation_id, .. } => {
                ("ai_evaluation", *evaluation_id)
            }
        }
    }
}

/// 事件分发器
///
/// `dispatch` 永不返回错误，失败只记录日志，不影响触发事件的操作。
#[derive(Clone)]
pub struct EventDispatcher {
    storage: Arc<dyn Storage>,
    sender: broadcast::Sender<GradingEvent>,
}

impl EventDispatcher {
    pub fn new(storage: Arc<dyn Storage>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { storage, sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GradingEvent> {
        self.sender.subscribe()
    }

    pub async fn dispatch(&self, event: GradingEvent) {
        let (reference_type, reference_id) = event.reference();
        info!(
            "Dispatching {} event for {} {}",
            event.event_type(),
            reference_type,
            reference_id
        );

        let payload = match serde_json::to_value(&event) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialize {} event: {}", event.event_type(), e);
                serde_json::Value::Null
            }
        };

        if let Err(e) = self
            .storage
            .record_notification(NewNotification {
                event_type: event.event_type().to_string(),
                reference_type: reference_type.to_string(),
                reference_id,
                payload,
            })
            .await
        {
            warn!(
                "Failed to record {} notification for {} {}: {}",
                event.event_type(),
                reference_type,
                reference_id,
                e
            );
        }

        // 没有订阅者时 send 返回错误，属于正常情况
        if self.sender.send(event).is_err() {
            debug!("No in-process subscribers for grading events");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notifications::requests::NotificationListQuery;
    use crate::storage::sea_orm_storage::memory_storage;

    #[test]
    fn test_event_type_and_reference() {
        let event = GradingEvent::EvaluationCompleted {
            evaluation_id: 7,
            submission_id: 3,
            assignment_id: 1,
            student_id: 42,
            score: 9,
        };
        assert_eq!(event.event_type(), "evaluation_completed");
        assert_eq!(event.reference(), ("ai_evaluation", 7));

        let payload = serde_json::to_value(&event).unwrap();
        assert_eq!(payload["event"], "evaluation_completed");
        assert_eq!(payload["score"], 9);
    }

    #[tokio::test]
    async fn test_dispatch_records_and_broadcasts() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let dispatcher = EventDispatcher::new(storage.clone(), DEFAULT_CHANNEL_CAPACITY);
        let mut receiver = dispatcher.subscribe();

        let event = GradingEvent::SubmissionCreated {
            submission_id: 5,
            assignment_id: 1,
            question_id: 2,
            student_id: 42,
        };
        dispatcher.dispatch(event.clone()).await;

        assert_eq!(receiver.recv().await.unwrap(), event);

        let rows = storage
            .list_notifications(NotificationListQuery {
                reference_type: Some("submission".to_string()),
                reference_id: Some(5),
                event_type: None,
            })
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].event_type, "submission_created");
        assert_eq!(rows[0].payload["student_id"], 42);
    }

    #[tokio::test]
    async fn test_dispatch_without_subscribers_does_not_fail() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let dispatcher = EventDispatcher::new(storage.clone(), 1);

        dispatcher
            .dispatch(GradingEvent::AssignmentCreated {
                assignment_id: 1,
                class_id: 2,
                teacher_id: 3,
                title: "Loops".to_string(),
            })
            .await;

        let rows = storage
            .list_notifications(NotificationListQuery::default())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }
}
