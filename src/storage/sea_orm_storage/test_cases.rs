//! 测试用例存储操作

use super::SeaOrmStorage;
use crate::entity::test_cases::{ActiveModel, Column, Entity as TestCases};
use crate::errors::{AssignEaseError, Result};
use crate::models::test_cases::{
    entities::{
        DEFAULT_MARKS, DEFAULT_MEMORY_LIMIT_KB, DEFAULT_TIMEOUT_SECS, TestCase, TestCaseVisibility,
    },
    requests::CreateTestCaseRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 为题目添加测试用例
    pub async fn create_test_case_impl(
        &self,
        question_id: i64,
        req: CreateTestCaseRequest,
    ) -> Result<TestCase> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            question_id: Set(question_id),
            input: Set(req.input),
            expected_output: Set(req.expected_output),
            marks: Set(req.marks.unwrap_or(DEFAULT_MARKS)),
            visibility: Set(req.visibility.unwrap_or_default().to_string()),
            timeout: Set(req.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            memory_limit: Set(req.memory_limit.unwrap_or(DEFAULT_MEMORY_LIMIT_KB)),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("创建测试用例失败: {e}")))?;

        Ok(result.into_test_case())
    }

    /// 列出题目的测试用例（按创建顺序）
    pub async fn list_test_cases_impl(
        &self,
        question_id: i64,
        visibility: Option<TestCaseVisibility>,
    ) -> Result<Vec<TestCase>> {
        let mut select = TestCases::find().filter(Column::QuestionId.eq(question_id));

        if let Some(visibility) = visibility {
            select = select.filter(Column::Visibility.eq(visibility.to_string()));
        }

        let result = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询测试用例失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_test_case()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{memory_storage, seed_question};
    use super::*;

    fn case(input: &str, visibility: Option<TestCaseVisibility>) -> CreateTestCaseRequest {
        CreateTestCaseRequest {
            input: input.to_string(),
            expected_output: input.to_string(),
            marks: None,
            visibility,
            timeout: None,
            memory_limit: None,
        }
    }

    #[tokio::test]
    async fn test_defaults_applied() {
        let storage = memory_storage().await;
        let (_, question) = seed_question(&storage, Some("python"), 10.0).await;

        let tc = storage
            .create_test_case_impl(question.id, case("1", None))
            .await
            .unwrap();
        assert_eq!(tc.marks, 1);
        assert_eq!(tc.visibility, TestCaseVisibility::Hidden);
        assert_eq!(tc.timeout, 2);
        assert_eq!(tc.memory_limit, 128_000);
    }

    #[tokio::test]
    async fn test_filter_by_visibility() {
        let storage = memory_storage().await;
        let (_, question) = seed_question(&storage, Some("python"), 10.0).await;

        for (input, vis) in [
            ("a", Some(TestCaseVisibility::Public)),
            ("b", None),
            ("c", Some(TestCaseVisibility::Public)),
        ] {
            storage
                .create_test_case_impl(question.id, case(input, vis))
                .await
                .unwrap();
        }

        let all = storage.list_test_cases_impl(question.id, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let public = storage
            .list_test_cases_impl(question.id, Some(TestCaseVisibility::Public))
            .await
            .unwrap();
        let inputs: Vec<_> = public.iter().map(|t| t.input.as_str()).collect();
        assert_eq!(inputs, vec!["a", "c"]);
    }
}
