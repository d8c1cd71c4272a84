use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TestCaseService;
use crate::models::test_cases::requests::TestCaseListQuery;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn list_test_cases(
    service: &TestCaseService,
    request: &HttpRequest,
    question_id: i64,
    query: TestCaseListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_question_by_id(question_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "题目不存在",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
    }

    match storage.list_test_cases(question_id, query.visibility).await {
        Ok(cases) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            cases,
            "Test cases retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::InternalServerError)),
    }
}
