use serde::Deserialize;
use ts_rs::TS;

/// 通知列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "notification.ts")]
pub struct NotificationListQuery {
    pub reference_type: Option<String>,
    pub reference_id: Option<i64>,
    pub event_type: Option<String>,
}
