//! 作业与题目存储操作

use super::SeaOrmStorage;
use crate::entity::assignment_questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as AssignmentQuestions,
};
use crate::entity::assignments::{ActiveModel, Entity as Assignments};
use crate::errors::{AssignEaseError, Result};
use crate::models::{
    assignments::{
        entities::{Assignment, AssignmentType, SubmissionType},
        requests::CreateAssignmentRequest,
    },
    questions::{
        entities::{AssignmentQuestion, DEFAULT_TOTAL_MARKS},
        requests::CreateQuestionRequest,
    },
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(req.class_id),
            teacher_id: Set(req.teacher_id),
            title: Set(req.title),
            description: Set(req.description.unwrap_or_default()),
            due_date: Set(req.due_date.map(|d| d.timestamp())),
            assignment_type: Set(req
                .assignment_type
                .unwrap_or(AssignmentType::Coding)
                .to_string()),
            submission_type: Set(req
                .submission_type
                .unwrap_or(SubmissionType::TextOnly)
                .to_string()),
            language: Set(req.language.filter(|s| !s.trim().is_empty())),
            language_version: Set(req.language_version.filter(|s| !s.trim().is_empty())),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(&self, id: i64) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 为作业添加题目
    pub async fn create_question_impl(
        &self,
        assignment_id: i64,
        req: CreateQuestionRequest,
    ) -> Result<AssignmentQuestion> {
        let now = chrono::Utc::now().timestamp();

        let model = QuestionActiveModel {
            assignment_id: Set(assignment_id),
            title: Set(req.title),
            total_marks: Set(req.total_marks.unwrap_or(DEFAULT_TOTAL_MARKS)),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_question())
    }

    /// 通过 ID 获取题目
    pub async fn get_question_by_id_impl(&self, id: i64) -> Result<Option<AssignmentQuestion>> {
        let result = AssignmentQuestions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 列出作业的全部题目
    pub async fn list_questions_by_assignment_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentQuestion>> {
        let result = AssignmentQuestions::find()
            .filter(QuestionColumn::AssignmentId.eq(assignment_id))
            .order_by_asc(QuestionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("查询题目列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_question()).collect())
    }
}
