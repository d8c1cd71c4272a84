//! 通知出站存储操作

use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{AssignEaseError, Result};
use crate::models::notifications::{
    entities::{NewNotification, Notification},
    requests::NotificationListQuery,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 记录通知
    pub async fn record_notification_impl(&self, req: NewNotification) -> Result<Notification> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            event_type: Set(req.event_type),
            reference_type: Set(req.reference_type),
            reference_id: Set(req.reference_id),
            payload: Set(serde_json::to_string(&req.payload)?),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("创建通知失败: {e}")))?;

        Ok(result.into_notification())
    }

    /// 列出通知（按写入顺序）
    pub async fn list_notifications_impl(
        &self,
        query: NotificationListQuery,
    ) -> Result<Vec<Notification>> {
        let mut select = Notifications::find();

        if let Some(ref reference_type) = query.reference_type {
            select = select.filter(Column::ReferenceType.eq(reference_type.as_str()));
        }
        if let Some(reference_id) = query.reference_id {
            select = select.filter(Column::ReferenceId.eq(reference_id));
        }
        if let Some(ref event_type) = query.event_type {
            select = select.filter(Column::EventType.eq(event_type.as_str()));
        }

        let result = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询通知列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_notification()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use super::*;

    #[tokio::test]
    async fn test_record_and_filter() {
        let storage = memory_storage().await;
        for (event, id) in [("submission_created", 1), ("evaluation_completed", 1)] {
            storage
                .record_notification_impl(NewNotification {
                    event_type: event.to_string(),
                    reference_type: "submission".to_string(),
                    reference_id: id,
                    payload: serde_json::json!({ "submission_id": id }),
                })
                .await
                .unwrap();
        }

        let all = storage
            .list_notifications_impl(NotificationListQuery {
                reference_type: Some("submission".to_string()),
                reference_id: Some(1),
                event_type: None,
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].payload["submission_id"], 1);

        let completed = storage
            .list_notifications_impl(NotificationListQuery {
                event_type: Some("evaluation_completed".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
    }
}
