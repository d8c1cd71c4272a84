use std::sync::Arc;

use crate::models::{
    ai_evaluations::{
        entities::{AiEvaluation, EvaluationVerdict, NewAiEvaluation},
        requests::AiEvaluationListQuery,
    },
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    languages::{entities::ProgrammingLanguage, requests::CreateLanguageRequest},
    notifications::{
        entities::{NewNotification, Notification},
        requests::NotificationListQuery,
    },
    questions::{entities::AssignmentQuestion, requests::CreateQuestionRequest},
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
    test_case_results::entities::{TestCaseResult, UpsertTestCaseResult},
    test_cases::{
        entities::{TestCase, TestCaseVisibility},
        requests::CreateTestCaseRequest,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 编程语言管理方法
    // 创建编程语言
    async fn create_language(&self, req: CreateLanguageRequest) -> Result<ProgrammingLanguage>;
    // 列出启用的编程语言
    async fn list_active_languages(&self) -> Result<Vec<ProgrammingLanguage>>;
    // 按名称（piston_name / display_name / language_name，忽略大小写）查找
    async fn find_language_by_name(&self, name: &str) -> Result<Option<ProgrammingLanguage>>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;

    /// 题目管理方法
    // 为作业添加题目
    async fn create_question(
        &self,
        assignment_id: i64,
        req: CreateQuestionRequest,
    ) -> Result<AssignmentQuestion>;
    // 通过ID获取题目
    async fn get_question_by_id(&self, id: i64) -> Result<Option<AssignmentQuestion>>;
    // 列出作业的全部题目
    async fn list_questions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentQuestion>>;

    /// 测试用例管理方法
    // 为题目添加测试用例
    async fn create_test_case(&self, question_id: i64, req: CreateTestCaseRequest)
    -> Result<TestCase>;
    // 列出题目的测试用例，可按可见性过滤
    async fn list_test_cases(
        &self,
        question_id: i64,
        visibility: Option<TestCaseVisibility>,
    ) -> Result<Vec<TestCase>>;

    /// 提交管理方法
    // 创建提交，重复提交返回 Conflict
    async fn create_submission(&self, req: CreateSubmissionRequest) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    // 分页列出提交
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 列出作业的全部提交
    async fn list_submissions_by_assignment(&self, assignment_id: i64) -> Result<Vec<Submission>>;
    // 更新提交状态（可附带评语）
    async fn update_submission_status(
        &self,
        id: i64,
        status: SubmissionStatus,
        feedback: Option<String>,
    ) -> Result<Option<Submission>>;
    // 更新教师手动给分
    async fn update_custom_marks(
        &self,
        id: i64,
        custom_marks: Option<f64>,
    ) -> Result<Option<Submission>>;
    // 一次性写入评测汇总（不修改 custom_marks）
    async fn update_grading_totals(
        &self,
        id: i64,
        total_testcases: i32,
        passed_testcases: i32,
        auto_marks: f64,
    ) -> Result<Option<Submission>>;

    /// 测试用例结果方法
    // 写入或覆盖 (提交, 用例) 的结果
    async fn upsert_test_case_result(&self, result: UpsertTestCaseResult)
    -> Result<TestCaseResult>;
    // 列出提交的全部结果
    async fn list_test_case_results(&self, submission_id: i64) -> Result<Vec<TestCaseResult>>;

    /// AI 评估方法
    // 创建 pending 状态的评估
    async fn create_ai_evaluation(&self, req: NewAiEvaluation) -> Result<AiEvaluation>;
    // 通过ID获取评估
    async fn get_ai_evaluation_by_id(&self, id: i64) -> Result<Option<AiEvaluation>>;
    // 列出评估
    async fn list_ai_evaluations(&self, query: AiEvaluationListQuery) -> Result<Vec<AiEvaluation>>;
    // pending -> done，仅当仍为 pending 时生效
    async fn complete_ai_evaluation(
        &self,
        id: i64,
        verdict: &EvaluationVerdict,
        raw_response: serde_json::Value,
    ) -> Result<bool>;
    // pending -> error，仅当仍为 pending 时生效
    async fn fail_ai_evaluation(&self, id: i64, error: &str) -> Result<bool>;

    /// 通知出站方法
    // 记录一条通知
    async fn record_notification(&self, notification: NewNotification) -> Result<Notification>;
    // 列出通知
    async fn list_notifications(&self, query: NotificationListQuery) -> Result<Vec<Notification>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
