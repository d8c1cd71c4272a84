use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 通知出站记录，每个已分发事件一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "notification.ts")]
pub struct Notification {
    pub id: i64,
    // 事件类型，如 "submission_created"
    pub event_type: String,
    // 关联对象类型，如 "submission"
    pub reference_type: String,
    pub reference_id: i64,
    pub payload: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 待写入的通知
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub event_type: String,
    pub reference_type: String,
    pub reference_id: i64,
    pub payload: serde_json::Value,
}
