use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubmissionService;
use crate::models::submissions::requests::{
    UpdateCustomMarksRequest, UpdateSubmissionStatusRequest,
};
use crate::models::submissions::responses::CustomMarksResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn update_status(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    req: UpdateSubmissionStatusRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let status = req.status;

    match storage
        .update_submission_status(submission_id, status, req.feedback)
        .await
    {
        Ok(Some(submission)) => {
            info!("Submission {} marked as {}", submission_id, status);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                submission,
                "Submission status updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::SubmissionUpdateFailed)),
    }
}

pub async fn update_custom_marks(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    req: UpdateCustomMarksRequest,
) -> ActixResult<HttpResponse> {
    if let Some(marks) = req.custom_marks
        && (!marks.is_finite() || marks < 0.0)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "custom_marks 必须为非负数",
        )));
    }

    let storage = service.get_storage(request);

    match storage
        .update_custom_marks(submission_id, req.custom_marks)
        .await
    {
        Ok(Some(submission)) => {
            info!(
                "Submission {} custom marks set to {:?}",
                submission_id, submission.custom_marks
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                CustomMarksResponse {
                    submission_id: submission.id,
                    auto_marks: submission.auto_marks,
                    custom_marks: submission.custom_marks,
                },
                "Custom marks updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::SubmissionUpdateFailed)),
    }
}
