use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::responses::SubmissionTestcaseResultsResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn get_testcase_results(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
    };

    let question = match storage.get_question_by_id(submission.question_id).await {
        Ok(question) => question.map(|q| q.title).unwrap_or_default(),
        Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
    };

    let results = match storage.list_test_case_results(submission_id).await {
        Ok(results) => results,
        Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SubmissionTestcaseResultsResponse {
            submission_id: submission.id,
            student_id: submission.student_id,
            question,
            code: submission.code,
            total_testcases: submission.total_testcases,
            passed_testcases: submission.passed_testcases,
            auto_marks: submission.auto_marks,
            custom_marks: submission.custom_marks,
            results,
        },
        "Test case results retrieved successfully",
    )))
}
