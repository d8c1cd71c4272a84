//! 数据模型定义
//!
//! 业务实体、请求与响应结构，和数据库实体（`entity`）分离。

pub mod ai_evaluations;
pub mod assignments;
pub mod common;
pub mod languages;
pub mod notifications;
pub mod questions;
pub mod submissions;
pub mod test_case_results;
pub mod test_cases;

use serde::{Deserialize, Serialize};

pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 编程语言
    LanguageNotFound = 2000,
    LanguageCreationFailed = 2001,
    LanguageNotConfigured = 2002,

    // 作业与题目
    AssignmentNotFound = 3000,
    AssignmentCreationFailed = 3001,
    QuestionNotFound = 3010,
    QuestionCreationFailed = 3011,
    TestCaseCreationFailed = 3020,

    // 提交
    SubmissionNotFound = 4000,
    SubmissionCreationFailed = 4001,
    SubmissionAlreadyExists = 4002,
    SubmissionUpdateFailed = 4003,
    SubmissionStatusInvalid = 4004,

    // 评测
    GradingFailed = 5000,
    SandboxUnavailable = 5001,

    // AI 评估
    AiEvaluationNotFound = 6000,
}
