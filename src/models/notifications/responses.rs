use serde::Serialize;
use ts_rs::TS;

use super::entities::Notification;

/// 通知列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "notification.ts")]
pub struct NotificationListResponse {
    pub items: Vec<Notification>,
    pub total: usize,
}
