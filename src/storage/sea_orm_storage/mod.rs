//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod ai_evaluations;
mod assignments;
mod languages;
mod notifications;
mod submissions;
mod test_case_results;
mod test_cases;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{AssignEaseError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect_with(&AppConfig::get().database).await
    }

    /// 按给定数据库配置连接并运行迁移
    pub async fn connect_with(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AssignEaseError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AssignEaseError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存数据库不支持 WAL，且每个连接各自独立
        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        let max_connections = if in_memory { 1 } else { config.pool_size };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(if in_memory {
                None
            } else {
                Some(Duration::from_secs(300))
            })
            .max_lifetime(if in_memory { None } else { Some(Duration::from_secs(1800)) })
            .connect_with(opt)
            .await
            .map_err(|e| AssignEaseError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AssignEaseError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AssignEaseError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 写入错误转换，唯一约束冲突单独映射为 Conflict
pub(crate) fn write_error(context: &str, err: DbErr) -> AssignEaseError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            AssignEaseError::conflict(format!("{context}: {msg}"))
        }
        _ => AssignEaseError::database_operation(format!("{context}: {err}")),
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 编程语言模块
    async fn create_language(&self, req: CreateLanguageRequest) -> Result<ProgrammingLanguage> {
        self.create_language_impl(req).await
    }

    async fn list_active_languages(&self) -> Result<Vec<ProgrammingLanguage>> {
        self.list_active_languages_impl().await
    }

    async fn find_language_by_name(&self, name: &str) -> Result<Option<ProgrammingLanguage>> {
        self.find_language_by_name_impl(name).await
    }

    // 作业模块
    async fn create_assignment(&self, req: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(req).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn create_question(
        &self,
        assignment_id: i64,
        req: CreateQuestionRequest,
    ) -> Result<AssignmentQuestion> {
        self.create_question_impl(assignment_id, req).await
    }

    async fn get_question_by_id(&self, id: i64) -> Result<Option<AssignmentQuestion>> {
        self.get_question_by_id_impl(id).await
    }

    async fn list_questions_by_assignment(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<AssignmentQuestion>> {
        self.list_questions_by_assignment_impl(assignment_id).await
    }

    // 测试用例模块
    async fn create_test_case(
        &self,
        question_id: i64,
        req: CreateTestCaseRequest,
    ) -> Result<TestCase> {
        self.create_test_case_impl(question_id, req).await
    }

    async fn list_test_cases(
        &self,
        question_id: i64,
        visibility: Option<TestCaseVisibility>,
    ) -> Result<Vec<TestCase>> {
        self.list_test_cases_impl(question_id, visibility).await
    }

    // 提交模块
    async fn create_submission(&self, req: CreateSubmissionRequest) -> Result<Submission> {
        self.create_submission_impl(req).await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn list_submissions_by_assignment(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_assignment_impl(assignment_id)
            .await
    }

    async fn update_submission_status(
        &self,
        id: i64,
        status: SubmissionStatus,
        feedback: Option<String>,
    ) -> Result<Option<Submission>> {
        self.update_submission_status_impl(id, status, feedback)
            .await
    }

    async fn update_custom_marks(
        &self,
        id: i64,
        custom_marks: Option<f64>,
    ) -> Result<Option<Submission>> {
        self.update_custom_marks_impl(id, custom_marks).await
    }

    async fn update_grading_totals(
        &self,
        id: i64,
        total_testcases: i32,
        passed_testcases: i32,
        auto_marks: f64,
    ) -> Result<Option<Submission>> {
        self.update_grading_totals_impl(id, total_testcases, passed_testcases, auto_marks)
            .await
    }

    // 测试用例结果模块
    async fn upsert_test_case_result(
        &self,
        result: UpsertTestCaseResult,
    ) -> Result<TestCaseResult> {
        self.upsert_test_case_result_impl(result).await
    }

    async fn list_test_case_results(&self, submission_id: i64) -> Result<Vec<TestCaseResult>> {
        self.list_test_case_results_impl(submission_id).await
    }

    // AI 评估模块
    async fn create_ai_evaluation(&self, req: NewAiEvaluation) -> Result<AiEvaluation> {
        self.create_ai_evaluation_impl(req).await
    }

    async fn get_ai_evaluation_by_id(&self, id: i64) -> Result<Option<AiEvaluation>> {
        self.get_ai_evaluation_by_id_impl(id).await
    }

    async fn list_ai_evaluations(
        &self,
        query: AiEvaluationListQuery,
    ) -> Result<Vec<AiEvaluation>> {
        self.list_ai_evaluations_impl(query).await
    }

    async fn complete_ai_evaluation(
        &self,
        id: i64,
        verdict: &EvaluationVerdict,
        raw_response: serde_json::Value,
    ) -> Result<bool> {
        self.complete_ai_evaluation_impl(id, verdict, raw_response)
            .await
    }

    async fn fail_ai_evaluation(&self, id: i64, error: &str) -> Result<bool> {
        self.fail_ai_evaluation_impl(id, error).await
    }

    // 通知模块
    async fn record_notification(&self, notification: NewNotification) -> Result<Notification> {
        self.record_notification_impl(notification).await
    }

    async fn list_notifications(&self, query: NotificationListQuery) -> Result<Vec<Notification>> {
        self.list_notifications_impl(query).await
    }
}

/// 测试用：内存 SQLite，已运行迁移
#[cfg(test)]
pub(crate) async fn memory_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::connect_with(&config)
        .await
        .expect("in-memory sqlite should connect")
}

/// 测试用：创建一个作业及其下的一道题目
#[cfg(test)]
pub(crate) async fn seed_question(
    storage: &SeaOrmStorage,
    language: Option<&str>,
    total_marks: f64,
) -> (Assignment, AssignmentQuestion) {
    let assignment = storage
        .create_assignment_impl(CreateAssignmentRequest {
            class_id: 1,
            teacher_id: 10,
            title: "Warmup".to_string(),
            description: None,
            due_date: None,
            assignment_type: None,
            submission_type: None,
            language: language.map(str::to_string),
            language_version: None,
        })
        .await
        .expect("assignment created");
    let question = storage
        .create_question_impl(
            assignment.id,
            CreateQuestionRequest {
                title: "Echo the input".to_string(),
                total_marks: Some(total_marks),
            },
        )
        .await
        .expect("question created");
    (assignment, question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("grader.db").unwrap(),
            "sqlite://grader.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/db").unwrap(),
            "postgres://u:p@localhost/db"
        );
        assert!(SeaOrmStorage::build_database_url("redis://localhost").is_err());
    }

    #[tokio::test]
    async fn test_memory_storage_runs_migrations() {
        let storage = memory_storage().await;
        let languages = storage.list_active_languages_impl().await.unwrap();
        assert!(languages.is_empty());
    }
}
