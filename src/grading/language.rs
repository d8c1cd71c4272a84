use std::sync::Arc;

use tracing::debug;

use crate::errors::{AssignEaseError, Result};
use crate::models::assignments::entities::Assignment;
use crate::models::languages::entities::ProgrammingLanguage;
use crate::sandbox::LanguageTarget;
use crate::storage::Storage;

/// 作业语言 -> 沙箱语言
///
/// 作业未配置语言时返回 `LanguageNotConfigured`。
pub async fn resolve_assignment_language(
    storage: &Arc<dyn Storage>,
    assignment: &Assignment,
) -> Result<LanguageTarget> {
    let language = assignment
        .language
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            AssignEaseError::language_not_configured("No language configured for assignment")
        })?;

    resolve_language(storage, language, assignment.language_version.as_deref()).await
}

/// 按名称解析语言；找不到对应记录时原样使用传入的名称
pub async fn resolve_language(
    storage: &Arc<dyn Storage>,
    name: &str,
    version: Option<&str>,
) -> Result<LanguageTarget> {
    let version = version.map(str::trim).filter(|s| !s.is_empty());

    match storage.find_language_by_name(name).await? {
        Some(row) => {
            let target = target_from_row(&row, version);
            debug!(
                "Resolved language '{}' to {} {} (judge0: {:?})",
                name, target.name, target.version, target.judge0_id
            );
            Ok(target)
        }
        None => {
            debug!("Language '{}' not registered, using it verbatim", name);
            Ok(LanguageTarget {
                name: name.trim().to_string(),
                version: version.unwrap_or_default().to_string(),
                judge0_id: None,
            })
        }
    }
}

fn target_from_row(row: &ProgrammingLanguage, version: Option<&str>) -> LanguageTarget {
    let version = version
        .or(row.piston_version.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or_default();

    LanguageTarget {
        name: row.runtime_name().to_string(),
        version: version.to_string(),
        judge0_id: row.judge0_language_id,
    }
}
