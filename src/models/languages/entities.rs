use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 编程语言
///
/// 作业的 `language` 字段是自由文本，评测前通过此表解析为沙箱可识别的语言名。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "language.ts")]
pub struct ProgrammingLanguage {
    pub id: i64,
    // 展示名称，如 "Python 3"
    pub display_name: String,
    // 通用语言名，如 "python"
    pub language_name: Option<String>,
    // Piston 运行时名称
    pub piston_name: Option<String>,
    // Piston 运行时版本
    pub piston_version: Option<String>,
    // Judge0 语言 ID
    pub judge0_language_id: Option<i32>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ProgrammingLanguage {
    /// 沙箱使用的语言名：piston_name > language_name > display_name
    pub fn runtime_name(&self) -> &str {
        self.piston_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.language_name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&self.display_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn language(piston: Option<&str>, name: Option<&str>, display: &str) -> ProgrammingLanguage {
        ProgrammingLanguage {
            id: 1,
            display_name: display.to_string(),
            language_name: name.map(str::to_string),
            piston_name: piston.map(str::to_string),
            piston_version: None,
            judge0_language_id: None,
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_runtime_name_priority() {
        assert_eq!(
            language(Some("python"), Some("py"), "Python").runtime_name(),
            "python"
        );
        assert_eq!(language(None, Some("py"), "Python").runtime_name(), "py");
        assert_eq!(language(None, None, "Python").runtime_name(), "Python");
    }
}
