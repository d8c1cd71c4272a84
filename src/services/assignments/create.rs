use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AssignmentService;
use crate::events::GradingEvent;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{dispatcher_from, error_response};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    if req.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "作业标题不能为空",
        )));
    }

    let storage = service.get_storage(request);
    let assignment = match storage.create_assignment(req).await {
        Ok(assignment) => assignment,
        Err(e) => return Ok(error_response(&e, ErrorCode::AssignmentCreationFailed)),
    };

    info!(
        "Assignment {} '{}' created for class {}",
        assignment.id, assignment.title, assignment.class_id
    );

    dispatcher_from(request)
        .dispatch(GradingEvent::AssignmentCreated {
            assignment_id: assignment.id,
            class_id: assignment.class_id,
            teacher_id: assignment.teacher_id,
            title: assignment.title.clone(),
        })
        .await;

    Ok(HttpResponse::Created().json(ApiResponse::success(
        assignment,
        "Assignment created successfully",
    )))
}
