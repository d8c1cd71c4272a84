use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubmissionService;
use crate::ai::schedule_for_submission;
use crate::errors::AssignEaseError;
use crate::events::GradingEvent;
use crate::models::assignments::entities::{Assignment, AssignmentType, SubmissionType};
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{dispatcher_from, error_response, grader_from};

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 题目必须属于提交指定的作业
    let question = match storage.get_question_by_id(req.question_id).await {
        Ok(Some(question)) => question,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "题目不存在",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
    };
    if question.assignment_id != req.assignment_id {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "题目不属于该作业",
        )));
    }

    let assignment = match storage.get_assignment_by_id(req.assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::InternalServerError)),
    };
    if let Err(msg) = check_content(&assignment, &req) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            msg,
        )));
    }

    let submission = match storage.create_submission(req).await {
        Ok(submission) => submission,
        Err(AssignEaseError::Conflict(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::SubmissionAlreadyExists,
                "该学生已提交过此题目",
            )));
        }
        Err(e) => return Ok(error_response(&e, ErrorCode::SubmissionCreationFailed)),
    };

    info!(
        "Submission {} created by student {} for question {}",
        submission.id, submission.student_id, submission.question_id
    );

    let dispatcher = dispatcher_from(request);
    dispatcher
        .dispatch(GradingEvent::SubmissionCreated {
            submission_id: submission.id,
            assignment_id: submission.assignment_id,
            question_id: submission.question_id,
            student_id: submission.student_id,
        })
        .await;

    // AI 评估失败不影响提交本身
    if let Err(e) = schedule_for_submission(
        storage.clone(),
        grader_from(request),
        dispatcher,
        &submission,
        &question,
    )
    .await
    {
        error!(
            "Failed to schedule AI evaluation for submission {}: {}",
            submission.id, e
        );
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        submission,
        "Submission created successfully",
    )))
}

/// 按作业类型与提交方式检查提交内容
///
/// 编程作业必须带代码；非编程作业在 `text_only` / `text_and_files` 下必须带文本。
fn check_content(assignment: &Assignment, req: &CreateSubmissionRequest) -> Result<(), &'static str> {
    let present = |value: &Option<String>| value.as_deref().is_some_and(|s| !s.trim().is_empty());

    match assignment.assignment_type {
        AssignmentType::Coding if !present(&req.code) => Err("编程作业的提交必须包含代码"),
        AssignmentType::NonCoding
            if matches!(
                assignment.submission_type,
                SubmissionType::TextOnly | SubmissionType::TextAndFiles
            ) && !present(&req.text_submission) =>
        {
            Err("该作业的提交必须包含文本内容")
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(assignment_type: AssignmentType, submission_type: SubmissionType) -> Assignment {
        Assignment {
            id: 1,
            class_id: 1,
            teacher_id: 10,
            title: "Essay".to_string(),
            description: String::new(),
            due_date: None,
            assignment_type,
            submission_type,
            language: None,
            language_version: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn request(code: Option<&str>, text: Option<&str>) -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            student_id: 7,
            assignment_id: 1,
            question_id: 1,
            code: code.map(str::to_string),
            text_submission: text.map(str::to_string),
        }
    }

    #[test]
    fn test_coding_assignment_requires_code() {
        let coding = assignment(AssignmentType::Coding, SubmissionType::TextOnly);
        assert!(check_content(&coding, &request(Some("print(1)"), None)).is_ok());
        assert!(check_content(&coding, &request(None, Some("prose"))).is_err());
        assert!(check_content(&coding, &request(Some("  "), None)).is_err());
    }

    #[test]
    fn test_text_policies_require_text() {
        for policy in [SubmissionType::TextOnly, SubmissionType::TextAndFiles] {
            let essay = assignment(AssignmentType::NonCoding, policy);
            assert!(check_content(&essay, &request(None, Some("my answer"))).is_ok());
            assert!(check_content(&essay, &request(None, None)).is_err());
            assert!(check_content(&essay, &request(Some("x = 1"), Some(""))).is_err());
        }

        let files = assignment(AssignmentType::NonCoding, SubmissionType::FilesOnly);
        assert!(check_content(&files, &request(None, None)).is_ok());
    }
}
