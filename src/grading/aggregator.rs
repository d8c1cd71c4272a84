//! 提交评测聚合
//!
//! 逐个执行测试用例、写入结果，并在提交上一次性更新通过数与自动得分。

use std::sync::Arc;

use tracing::{info, warn};

use super::language::{resolve_assignment_language, resolve_language};
use super::{auto_marks, percentage};
use crate::errors::{AssignEaseError, Result};
use crate::models::submissions::responses::GradingSummary;
use crate::models::test_case_results::entities::UpsertTestCaseResult;
use crate::models::test_cases::entities::{TestCase, TestCaseVisibility};
use crate::models::test_cases::requests::RunTestCasesRequest;
use crate::models::test_cases::responses::{RunTestCaseResult, RunTestCasesResponse};
use crate::sandbox::{CodeExecutor, ExecutionRequest, LanguageTarget};
use crate::storage::Storage;

fn execution_request(case: &TestCase, source_code: &str, language: &LanguageTarget) -> ExecutionRequest {
    ExecutionRequest {
        source_code: source_code.to_string(),
        language: language.clone(),
        stdin: case.input.clone(),
        expected_output: case.expected_output.clone(),
        timeout: case.timeout,
        memory_limit: case.memory_limit,
    }
}

/// 评测一次提交
///
/// 题目没有测试用例时直接返回零值，不写入任何数据。
pub async fn grade_submission(
    storage: &Arc<dyn Storage>,
    executor: &Arc<dyn CodeExecutor>,
    submission_id: i64,
) -> Result<GradingSummary> {
    let submission = storage
        .get_submission_by_id(submission_id)
        .await?
        .ok_or_else(|| AssignEaseError::not_found(format!("提交不存在: {submission_id}")))?;

    let question = storage
        .get_question_by_id(submission.question_id)
        .await?
        .ok_or_else(|| {
            AssignEaseError::not_found(format!("题目不存在: {}", submission.question_id))
        })?;

    let assignment = storage
        .get_assignment_by_id(submission.assignment_id)
        .await?
        .ok_or_else(|| {
            AssignEaseError::not_found(format!("作业不存在: {}", submission.assignment_id))
        })?;

    let cases = storage.list_test_cases(question.id, None).await?;
    if cases.is_empty() {
        info!(
            "Submission {} has no test cases to run, skipping",
            submission_id
        );
        return Ok(GradingSummary {
            submission_id,
            total_testcases: 0,
            passed_testcases: 0,
            auto_marks: 0.0,
            percentage: 0.0,
        });
    }

    let language = resolve_assignment_language(storage, &assignment).await?;
    let source_code = submission.code.clone().unwrap_or_default();

    info!(
        "Grading submission {} with {} test case(s) on {} ({})",
        submission_id,
        cases.len(),
        executor.name(),
        language.name
    );

    let mut passed: i32 = 0;
    for case in &cases {
        let outcome = executor
            .execute(&execution_request(case, &source_code, &language))
            .await;

        if outcome.passed {
            passed += 1;
        } else if let Some(message) = &outcome.error_message {
            warn!(
                "Submission {} test case {} did not pass: {}",
                submission_id, case.id, message
            );
        }

        storage
            .upsert_test_case_result(UpsertTestCaseResult {
                submission_id,
                test_case_id: case.id,
                status: outcome.status,
                actual_output: Some(outcome.actual_output),
                execution_time: outcome.execution_time,
                memory_used: outcome.memory_used,
                judge0_token: outcome.token,
                error_message: outcome.error_message,
            })
            .await?;
    }

    let total = cases.len() as i32;
    let marks = auto_marks(passed, total, question.total_marks);

    storage
        .update_grading_totals(submission_id, total, passed, marks)
        .await?
        .ok_or_else(|| AssignEaseError::not_found(format!("提交不存在: {submission_id}")))?;

    info!(
        "Submission {} graded: {}/{} passed, auto marks {:.2}",
        submission_id, passed, total, marks
    );

    Ok(GradingSummary {
        submission_id,
        total_testcases: total,
        passed_testcases: passed,
        auto_marks: marks,
        percentage: percentage(passed, total),
    })
}

/// 学生提交前试运行公开用例，不落库
pub async fn run_public_testcases(
    storage: &Arc<dyn Storage>,
    executor: &Arc<dyn CodeExecutor>,
    request: RunTestCasesRequest,
) -> Result<RunTestCasesResponse> {
    if request.language_name.trim().is_empty() {
        return Err(AssignEaseError::validation("language_name 不能为空"));
    }

    storage
        .get_question_by_id(request.question_id)
        .await?
        .ok_or_else(|| AssignEaseError::not_found(format!("题目不存在: {}", request.question_id)))?;

    let cases = storage
        .list_test_cases(request.question_id, Some(TestCaseVisibility::Public))
        .await?;

    let language = resolve_language(
        storage,
        &request.language_name,
        Some(request.language_version.as_str()),
    )
    .await?;

    let mut results = Vec::with_capacity(cases.len());
    for case in cases {
        let outcome = executor
            .execute(&execution_request(&case, &request.source_code, &language))
            .await;

        results.push(RunTestCaseResult {
            testcase_id: case.id,
            input: case.input,
            expected_output: case.expected_output,
            actual_output: outcome.actual_output,
            error_message: outcome.error_message.unwrap_or_default(),
            passed: outcome.passed,
        });
    }

    let passed = results.iter().filter(|r| r.passed).count();
    Ok(RunTestCasesResponse {
        total: results.len(),
        passed,
        results,
    })
}
