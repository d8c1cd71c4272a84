use serde::Deserialize;
use ts_rs::TS;

/// 创建编程语言请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "language.ts")]
pub struct CreateLanguageRequest {
    pub display_name: String,
    pub language_name: Option<String>,
    pub piston_name: Option<String>,
    pub piston_version: Option<String>,
    pub judge0_language_id: Option<i32>,
    pub is_active: Option<bool>,
}
