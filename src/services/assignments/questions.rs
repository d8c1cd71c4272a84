use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::models::questions::requests::CreateQuestionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn create_question(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    req: CreateQuestionRequest,
) -> ActixResult<HttpResponse> {
    if req.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "题目标题不能为空",
        )));
    }
    if let Some(marks) = req.total_marks
        && (!marks.is_finite() || marks < 0.0)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "total_marks 必须为非负数",
        )));
    }

    let storage = service.get_storage(request);

    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
    }

    match storage.create_question(assignment_id, req).await {
        Ok(question) => {
            info!(
                "Question {} added to assignment {}",
                question.id, assignment_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(question, "Question created successfully")))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::QuestionCreationFailed)),
    }
}
