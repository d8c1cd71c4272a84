use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::errors::AssignEaseError;
use crate::grading::{grade_submission, round_marks};
use crate::models::submissions::responses::GradingSummary;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, executor_from};

pub async fn evaluate_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let executor = executor_from(request);

    match grade_submission(&storage, &executor, submission_id).await {
        // 存储值不舍入，仅响应展示保留两位小数
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradingSummary {
                auto_marks: round_marks(summary.auto_marks),
                percentage: round_marks(summary.percentage),
                ..summary
            },
            "Submission evaluated successfully",
        ))),
        Err(AssignEaseError::NotFound(msg)) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::SubmissionNotFound, msg),
        )),
        Err(e) => Ok(error_response(&e, ErrorCode::GradingFailed)),
    }
}
