use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TestCaseService;
use crate::models::assignments::entities::AssignmentType;
use crate::models::test_cases::requests::CreateTestCaseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn create_test_case(
    service: &TestCaseService,
    request: &HttpRequest,
    question_id: i64,
    req: CreateTestCaseRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_limits(&req) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            msg,
        )));
    }

    let storage = service.get_storage(request);

    let question = match storage.get_question_by_id(question_id).await {
        Ok(Some(question)) => question,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "题目不存在",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
    };

    // 只有编程作业的题目可以添加测试用例
    match storage.get_assignment_by_id(question.assignment_id).await {
        Ok(Some(assignment)) if assignment.assignment_type == AssignmentType::Coding => {}
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "只能为编程作业的题目添加测试用例",
            )));
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
    }

    match storage.create_test_case(question_id, req).await {
        Ok(case) => {
            info!(
                "Test case {} ({}) added to question {}",
                case.id, case.visibility, question_id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(case, "Test case created successfully")))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::TestCaseCreationFailed)),
    }
}

fn validate_limits(req: &CreateTestCaseRequest) -> Result<(), &'static str> {
    if req.marks.is_some_and(|m| m < 0) {
        return Err("marks 不能为负数");
    }
    if req.timeout.is_some_and(|t| t <= 0) {
        return Err("timeout 必须大于 0");
    }
    if req.memory_limit.is_some_and(|m| m <= 0) {
        return Err("memory_limit 必须大于 0");
    }
    Ok(())
}
