//! 测试用例结果存储操作

use super::SeaOrmStorage;
use crate::entity::test_case_results::{ActiveModel, Column, Entity as TestCaseResults};
use crate::errors::{AssignEaseError, Result};
use crate::models::test_case_results::entities::{TestCaseResult, UpsertTestCaseResult};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 写入或覆盖 (提交, 用例) 的评测结果
    pub async fn upsert_test_case_result_impl(
        &self,
        result: UpsertTestCaseResult,
    ) -> Result<TestCaseResult> {
        let now = chrono::Utc::now().timestamp();
        let submission_id = result.submission_id;
        let test_case_id = result.test_case_id;

        let model = ActiveModel {
            submission_id: Set(submission_id),
            test_case_id: Set(test_case_id),
            status: Set(result.status.to_string()),
            actual_output: Set(result.actual_output),
            execution_time: Set(result.execution_time),
            memory_used: Set(result.memory_used),
            judge0_token: Set(result.judge0_token),
            error_message: Set(result.error_message),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        TestCaseResults::insert(model)
            .on_conflict(
                OnConflict::columns([Column::SubmissionId, Column::TestCaseId])
                    .update_columns([
                        Column::Status,
                        Column::ActualOutput,
                        Column::ExecutionTime,
                        Column::MemoryUsed,
                        Column::Judge0Token,
                        Column::ErrorMessage,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("写入测试结果失败: {e}")))?;

        let stored = TestCaseResults::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .filter(Column::TestCaseId.eq(test_case_id))
            .one(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询测试结果失败: {e}")))?
            .ok_or_else(|| {
                AssignEaseError::database_operation(format!(
                    "测试结果写入后未找到: submission={submission_id}, test_case={test_case_id}"
                ))
            })?;

        Ok(stored.into_test_case_result())
    }

    /// 列出提交的全部评测结果
    pub async fn list_test_case_results_impl(
        &self,
        submission_id: i64,
    ) -> Result<Vec<TestCaseResult>> {
        let result = TestCaseResults::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .order_by_asc(Column::TestCaseId)
            .all(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询测试结果失败: {e}")))?;

        Ok(result
            .into_iter()
            .map(|m| m.into_test_case_result())
            .collect())
    }
}
