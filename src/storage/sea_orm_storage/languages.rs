//! 编程语言存储操作

use super::SeaOrmStorage;
use crate::entity::programming_languages::{ActiveModel, Column, Entity as ProgrammingLanguages};
use crate::errors::{AssignEaseError, Result};
use crate::models::languages::{entities::ProgrammingLanguage, requests::CreateLanguageRequest};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建编程语言
    pub async fn create_language_impl(
        &self,
        req: CreateLanguageRequest,
    ) -> Result<ProgrammingLanguage> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            display_name: Set(req.display_name),
            language_name: Set(req.language_name),
            piston_name: Set(req.piston_name),
            piston_version: Set(req.piston_version),
            judge0_language_id: Set(req.judge0_language_id),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("创建编程语言失败: {e}")))?;

        Ok(result.into_language())
    }

    /// 列出启用的编程语言
    pub async fn list_active_languages_impl(&self) -> Result<Vec<ProgrammingLanguage>> {
        let result = ProgrammingLanguages::find()
            .filter(Column::IsActive.eq(true))
            .order_by_asc(Column::DisplayName)
            .all(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询编程语言失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_language()).collect())
    }

    /// 按别名查找编程语言（忽略大小写，取 ID 最小的一条）
    pub async fn find_language_by_name_impl(
        &self,
        name: &str,
    ) -> Result<Option<ProgrammingLanguage>> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }

        let lower_eq = |column: Column| {
            sea_orm::sea_query::ExprTrait::eq(
                Expr::expr(Func::lower(Expr::col(column))),
                needle.clone(),
            )
        };
        let result = ProgrammingLanguages::find()
            .filter(
                Condition::any()
                    .add(lower_eq(Column::PistonName))
                    .add(lower_eq(Column::DisplayName))
                    .add(lower_eq(Column::LanguageName)),
            )
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询编程语言失败: {e}")))?;

        Ok(result.map(|m| m.into_language()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use super::*;

    fn request(display: &str, piston: Option<&str>, active: bool) -> CreateLanguageRequest {
        CreateLanguageRequest {
            display_name: display.to_string(),
            language_name: None,
            piston_name: piston.map(str::to_string),
            piston_version: Some("3.10.0".to_string()),
            judge0_language_id: Some(71),
            is_active: Some(active),
        }
    }

    #[tokio::test]
    async fn test_list_only_active() {
        let storage = memory_storage().await;
        storage
            .create_language_impl(request("Python 3", Some("python"), true))
            .await
            .unwrap();
        storage
            .create_language_impl(request("Cobol", None, false))
            .await
            .unwrap();

        let active = storage.list_active_languages_impl().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].display_name, "Python 3");
    }

    #[tokio::test]
    async fn test_find_by_any_alias() {
        let storage = memory_storage().await;
        storage
            .create_language_impl(request("Python 3", Some("python"), true))
            .await
            .unwrap();

        let found = storage
            .find_language_by_name_impl("PYTHON")
            .await
            .unwrap()
            .expect("matched by piston name");
        assert_eq!(found.judge0_language_id, Some(71));

        assert!(
            storage
                .find_language_by_name_impl("python 3")
                .await
                .unwrap()
                .is_some()
        );
        assert!(
            storage
                .find_language_by_name_impl("rust")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            storage
                .find_language_by_name_impl("  ")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_find_by_language_name_prefers_lowest_id() {
        let storage = memory_storage().await;
        let mut first = request("CPython", None, true);
        first.language_name = Some("Py".to_string());
        let first = storage.create_language_impl(first).await.unwrap();
        storage
            .create_language_impl(request("PyPy", Some("py"), true))
            .await
            .unwrap();

        let found = storage
            .find_language_by_name_impl(" pY ")
            .await
            .unwrap()
            .expect("matched by language name");
        assert_eq!(found.id, first.id);
    }
}
