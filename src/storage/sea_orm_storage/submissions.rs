//! 提交存储操作

use super::{SeaOrmStorage, write_error};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{AssignEaseError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建提交
    ///
    /// 每个 (学生, 作业, 题目) 只允许一条提交，重复时返回 Conflict。
    pub async fn create_submission_impl(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        let existing = Submissions::find()
            .filter(Column::StudentId.eq(req.student_id))
            .filter(Column::AssignmentId.eq(req.assignment_id))
            .filter(Column::QuestionId.eq(req.question_id))
            .one(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询提交失败: {e}")))?;

        if existing.is_some() {
            return Err(AssignEaseError::conflict(format!(
                "学生 {} 已提交过作业 {} 的题目 {}",
                req.student_id, req.assignment_id, req.question_id
            )));
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            assignment_id: Set(req.assignment_id),
            question_id: Set(req.question_id),
            code: Set(req.code),
            text_submission: Set(req.text_submission),
            status: Set(SubmissionStatus::Submitted.to_string()),
            feedback: Set(None),
            auto_marks: Set(0.0),
            custom_marks: Set(None),
            total_testcases: Set(0),
            passed_testcases: Set(0),
            submitted_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        // 并发提交由唯一索引兜底
        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| write_error("创建提交失败", e))?;

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(&self, id: i64) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出提交
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let (page, size) = query.pagination().normalized();

        let mut select = Submissions::find();

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(question_id) = query.question_id {
            select = select.filter(Column::QuestionId.eq(question_id));
        }

        // 排序
        select = select
            .order_by_desc(Column::SubmittedAt)
            .order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询提交总数失败: {e}")))?;

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(SubmissionListResponse {
            items: submissions
                .into_iter()
                .map(|m| m.into_submission())
                .collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 列出作业的全部提交
    pub async fn list_submissions_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        let result = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 更新提交状态
    pub async fn update_submission_status_impl(
        &self,
        id: i64,
        status: SubmissionStatus,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        // 先检查提交是否存在
        if self.get_submission_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(feedback) = feedback {
            model.feedback = Set(Some(feedback));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("更新提交状态失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }

    /// 更新教师手动给分
    pub async fn update_custom_marks_impl(
        &self,
        id: i64,
        custom_marks: Option<f64>,
    ) -> Result<Option<Submission>> {
        if self.get_submission_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            custom_marks: Set(custom_marks),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("更新手动给分失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }

    /// 写入评测汇总，三个字段一次更新
    pub async fn update_grading_totals_impl(
        &self,
        id: i64,
        total_testcases: i32,
        passed_testcases: i32,
        auto_marks: f64,
    ) -> Result<Option<Submission>> {
        if self.get_submission_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            total_testcases: Set(total_testcases),
            passed_testcases: Set(passed_testcases),
            auto_marks: Set(auto_marks),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("更新评测结果失败: {e}")))?;

        Ok(Some(result.into_submission()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{memory_storage, seed_question};
    use super::*;

    fn request(student_id: i64, assignment_id: i64, question_id: i64) -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            student_id,
            assignment_id,
            question_id,
            code: Some("print(input())".to_string()),
            text_submission: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_submission_conflicts() {
        let storage = memory_storage().await;
        let (assignment, question) = seed_question(&storage, Some("python"), 10.0).await;

        let first = storage
            .create_submission_impl(request(5, assignment.id, question.id))
            .await
            .unwrap();
        assert_eq!(first.status, SubmissionStatus::Submitted);
        assert_eq!(first.auto_marks, 0.0);

        let err = storage
            .create_submission_impl(request(5, assignment.id, question.id))
            .await
            .unwrap_err();
        assert!(err.is_unique_violation());

        // 其他学生不受影响
        storage
            .create_submission_impl(request(6, assignment.id, question.id))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_grading_totals_keep_custom_marks() {
        let storage = memory_storage().await;
        let (assignment, question) = seed_question(&storage, Some("python"), 10.0).await;
        let submission = storage
            .create_submission_impl(request(5, assignment.id, question.id))
            .await
            .unwrap();

        storage
            .update_custom_marks_impl(submission.id, Some(8.5))
            .await
            .unwrap();
        let updated = storage
            .update_grading_totals_impl(submission.id, 3, 2, 20.0 / 3.0)
            .await
            .unwrap()
            .expect("submission exists");

        assert_eq!(updated.total_testcases, 3);
        assert_eq!(updated.passed_testcases, 2);
        assert!((updated.auto_marks - 6.6667).abs() < 1e-3);
        assert_eq!(updated.custom_marks, Some(8.5));
    }

    #[tokio::test]
    async fn test_update_status_missing_returns_none() {
        let storage = memory_storage().await;
        let result = storage
            .update_submission_status_impl(404, SubmissionStatus::Checked, None)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let storage = memory_storage().await;
        let (assignment, question) = seed_question(&storage, Some("python"), 10.0).await;
        for student in 1..=3 {
            storage
                .create_submission_impl(request(student, assignment.id, question.id))
                .await
                .unwrap();
        }

        let page = storage
            .list_submissions_with_pagination_impl(SubmissionListQuery {
                page: Some(1),
                size: Some(2),
                assignment_id: Some(assignment.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 2);

        let mine = storage
            .list_submissions_with_pagination_impl(SubmissionListQuery {
                student_id: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mine.items.len(), 1);
        assert_eq!(mine.items[0].student_id, 2);
    }
}
