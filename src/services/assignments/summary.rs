use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::AssignmentService;
use crate::models::assignments::responses::{AssignmentTestcaseSummary, SubmissionGradingRow};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn get_testcase_summary(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
    };

    let titles: HashMap<i64, String> = match storage
        .list_questions_by_assignment(assignment_id)
        .await
    {
        Ok(questions) => questions.into_iter().map(|q| (q.id, q.title)).collect(),
        Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
    };

    let submissions = match storage.list_submissions_by_assignment(assignment_id).await {
        Ok(submissions) => submissions,
        Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
    };

    let rows: Vec<SubmissionGradingRow> = submissions
        .into_iter()
        .map(|s| SubmissionGradingRow {
            submission_id: s.id,
            student_id: s.student_id,
            question_id: s.question_id,
            question_title: titles.get(&s.question_id).cloned().unwrap_or_default(),
            total_testcases: s.total_testcases,
            passed_testcases: s.passed_testcases,
            auto_marks: s.auto_marks,
            custom_marks: s.custom_marks,
            status: s.status,
            submitted_at: s.submitted_at,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentTestcaseSummary {
            assignment_id: assignment.id,
            assignment_title: assignment.title,
            total_submissions: rows.len(),
            submissions: rows,
        },
        "Testcase summary retrieved successfully",
    )))
}
