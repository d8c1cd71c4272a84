use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::TestCaseService;
use crate::grading::run_public_testcases;
use crate::models::test_cases::requests::RunTestCasesRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{error_response, executor_from};

pub async fn run_test_cases(
    service: &TestCaseService,
    request: &HttpRequest,
    req: RunTestCasesRequest,
) -> ActixResult<HttpResponse> {
    if [&req.source_code, &req.language_name, &req.language_version]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "source_code、language_name 和 language_version 均不能为空",
        )));
    }

    let storage = service.get_storage(request);
    let executor = executor_from(request);
    let question_id = req.question_id;

    match run_public_testcases(&storage, &executor, req).await {
        Ok(response) => {
            debug!(
                "Public run for question {}: {}/{} passed",
                question_id, response.passed, response.total
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Test cases executed successfully",
            )))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::GradingFailed)),
    }
}
