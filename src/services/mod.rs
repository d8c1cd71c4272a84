pub mod ai_evaluations;
pub mod assignments;
pub mod languages;
pub mod notifications;
pub mod submissions;
pub mod test_cases;

pub use ai_evaluations::AiEvaluationService;
pub use assignments::AssignmentService;
pub use languages::LanguageService;
pub use notifications::NotificationService;
pub use submissions::SubmissionService;
pub use test_cases::TestCaseService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use tracing::error;

use crate::ai::AiGrader;
use crate::errors::AssignEaseError;
use crate::events::EventDispatcher;
use crate::models::{ApiResponse, ErrorCode};
use crate::sandbox::CodeExecutor;

pub(crate) fn executor_from(request: &HttpRequest) -> Arc<dyn CodeExecutor> {
    request
        .app_data::<web::Data<Arc<dyn CodeExecutor>>>()
        .expect("Code executor not found in app data")
        .get_ref()
        .clone()
}

pub(crate) fn grader_from(request: &HttpRequest) -> Arc<AiGrader> {
    request
        .app_data::<web::Data<Arc<AiGrader>>>()
        .expect("AI grader not found in app data")
        .get_ref()
        .clone()
}

pub(crate) fn dispatcher_from(request: &HttpRequest) -> EventDispatcher {
    request
        .app_data::<web::Data<EventDispatcher>>()
        .expect("Event dispatcher not found in app data")
        .get_ref()
        .clone()
}

/// 通用错误响应
///
/// 未找到 -> 404，校验失败与语言未配置 -> 400，唯一冲突 -> 409，其余 -> 500（使用 `code`）。
pub(crate) fn error_response(err: &AssignEaseError, code: ErrorCode) -> HttpResponse {
    match err {
        AssignEaseError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        AssignEaseError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        }
        AssignEaseError::LanguageNotConfigured(msg) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::LanguageNotConfigured, msg),
        ),
        AssignEaseError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg))
        }
        other => {
            error!("{}", other.format_simple());
            HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(code, other.message()))
        }
    }
}
