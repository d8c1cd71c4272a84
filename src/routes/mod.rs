pub mod ai_evaluations;

pub mod assignments;

pub mod languages;

pub mod notifications;

pub mod submissions;

pub mod test_cases;

pub use ai_evaluations::configure_ai_evaluation_routes;
pub use assignments::configure_assignment_routes;
pub use languages::configure_language_routes;
pub use notifications::configure_notification_routes;
pub use submissions::configure_submission_routes;
pub use test_cases::configure_test_case_routes;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::ai::AiGrader;
    use crate::ai::grader::tests::ScriptedModel;
    use crate::events::EventDispatcher;
    use crate::models::test_case_results::entities::TestCaseResultStatus;
    use crate::sandbox::{CodeExecutor, ExecutionOutcome, ExecutionRequest};
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::memory_storage;
    use crate::utils::{json_error_handler, query_error_handler};

    /// 输出即 stdin 的执行器
    struct EchoExecutor;

    #[async_trait::async_trait]
    impl CodeExecutor for EchoExecutor {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn execute(&self, request: &ExecutionRequest) -> ExecutionOutcome {
            let passed = request.stdin.trim() == request.expected_output.trim();
            ExecutionOutcome {
                status: if passed {
                    TestCaseResultStatus::Passed
                } else {
                    TestCaseResultStatus::Failed
                },
                passed,
                actual_output: request.stdin.clone(),
                execution_time: None,
                memory_used: None,
                error_message: None,
                token: None,
            }
        }
    }

    macro_rules! grading_app {
        ($storage:expr) => {{
            let storage: Arc<dyn Storage> = $storage;
            let executor: Arc<dyn CodeExecutor> = Arc::new(EchoExecutor);
            let model = Arc::new(ScriptedModel::new(vec![Ok(
                r#"{"mistake_type":"none","confidence":0.9,"score":9,"feedback":"ok"}"#.to_string(),
            )]));
            let grader = Arc::new(AiGrader::new(model, 0, Duration::from_millis(1)));
            let dispatcher = EventDispatcher::new(storage.clone(), 16);
            test::init_service(
                App::new()
                    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                    .app_data(web::Data::new(storage))
                    .app_data(web::Data::new(executor))
                    .app_data(web::Data::new(grader))
                    .app_data(web::Data::new(dispatcher))
                    .configure(configure_language_routes)
                    .configure(configure_assignment_routes)
                    .configure(configure_test_case_routes)
                    .configure(configure_submission_routes)
                    .configure(configure_ai_evaluation_routes)
                    .configure(configure_notification_routes),
            )
            .await
        }};
    }

    macro_rules! post_json {
        ($app:expr, $uri:expr, $body:expr) => {{
            let req = test::TestRequest::post()
                .uri(&$uri)
                .set_json($body)
                .to_request();
            let resp = test::call_service(&$app, req).await;
            let status = resp.status();
            let body: Value = test::read_body_json(resp).await;
            (status, body)
        }};
    }

    macro_rules! get_json {
        ($app:expr, $uri:expr) => {{
            let req = test::TestRequest::get().uri(&$uri).to_request();
            let resp = test::call_service(&$app, req).await;
            let status = resp.status();
            let body: Value = test::read_body_json(resp).await;
            (status, body)
        }};
    }

    #[actix_web::test]
    async fn test_full_grading_flow_over_http() {
        let app = grading_app!(Arc::new(memory_storage().await));

        let (status, _) = post_json!(
            app,
            "/api/v1/languages".to_string(),
            json!({"display_name": "Python", "piston_name": "python", "piston_version": "3.10.0"})
        );
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = post_json!(
            app,
            "/api/v1/assignments".to_string(),
            json!({"class_id": 1, "teacher_id": 10, "title": "Loops", "language": "python"})
        );
        assert_eq!(status, StatusCode::CREATED);
        let assignment_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = post_json!(
            app,
            format!("/api/v1/assignments/{assignment_id}/questions"),
            json!({"title": "Echo", "total_marks": 9.0})
        );
        assert_eq!(status, StatusCode::CREATED);
        let question_id = body["data"]["id"].as_i64().unwrap();

        for (input, expected) in [("a", "a"), ("b", "b"), ("c", "x")] {
            let (status, _) = post_json!(
                app,
                format!("/api/v1/questions/{question_id}/testcases"),
                json!({"input": input, "expected_output": expected})
            );
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = post_json!(
            app,
            "/api/v1/submissions".to_string(),
            json!({
                "student_id": 7,
                "assignment_id": assignment_id,
                "question_id": question_id,
                "code": "print(input())"
            })
        );
        assert_eq!(status, StatusCode::CREATED);
        let submission_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = post_json!(
            app,
            format!("/api/v1/submissions/{submission_id}/evaluate"),
            json!({})
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_testcases"], 3);
        assert_eq!(body["data"]["passed_testcases"], 2);
        assert_eq!(body["data"]["auto_marks"].as_f64().unwrap(), 6.0);

        let (status, body) = get_json!(
            app,
            format!("/api/v1/submissions/{submission_id}/testcase-results")
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["results"].as_array().unwrap().len(), 3);

        let (status, body) = get_json!(
            app,
            format!("/api/v1/notifications?event_type=submission_created&reference_id={submission_id}")
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 1);
    }

    #[actix_web::test]
    async fn test_duplicate_submission_conflicts() {
        let storage = memory_storage().await;
        let (assignment, question) =
            crate::storage::sea_orm_storage::seed_question(&storage, Some("python"), 10.0).await;
        let app = grading_app!(Arc::new(storage));

        let body = json!({
            "student_id": 7,
            "assignment_id": assignment.id,
            "question_id": question.id,
            "code": "while True: pass"
        });
        let (status, _) = post_json!(app, "/api/v1/submissions".to_string(), body.clone());
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = post_json!(app, "/api/v1/submissions".to_string(), body);
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_non_coding_assignment_rejects_test_cases_and_empty_text() {
        let app = grading_app!(Arc::new(memory_storage().await));

        let (status, body) = post_json!(
            app,
            "/api/v1/assignments".to_string(),
            json!({
                "class_id": 1,
                "teacher_id": 10,
                "title": "Essay",
                "assignment_type": "non_coding",
                "submission_type": "text_only"
            })
        );
        assert_eq!(status, StatusCode::CREATED);
        let assignment_id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = post_json!(
            app,
            format!("/api/v1/assignments/{assignment_id}/questions"),
            json!({"title": "Explain recursion", "total_marks": 5.0})
        );
        assert_eq!(status, StatusCode::CREATED);
        let question_id = body["data"]["id"].as_i64().unwrap();

        let (status, _) = post_json!(
            app,
            format!("/api/v1/questions/{question_id}/testcases"),
            json!({"input": "1", "expected_output": "1"})
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json!(
            app,
            "/api/v1/submissions".to_string(),
            json!({"student_id": 7, "assignment_id": assignment_id, "question_id": question_id})
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json!(
            app,
            "/api/v1/submissions".to_string(),
            json!({
                "student_id": 7,
                "assignment_id": assignment_id,
                "question_id": question_id,
                "text_submission": "A function that calls itself."
            })
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn test_coding_submission_without_code_is_rejected() {
        let storage = memory_storage().await;
        let (assignment, question) =
            crate::storage::sea_orm_storage::seed_question(&storage, Some("python"), 10.0).await;
        let app = grading_app!(Arc::new(storage));

        let (status, _) = post_json!(
            app,
            "/api/v1/submissions".to_string(),
            json!({
                "student_id": 7,
                "assignment_id": assignment.id,
                "question_id": question.id,
                "text_submission": "I would use a loop"
            })
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_and_invalid_ids() {
        let app = grading_app!(Arc::new(memory_storage().await));

        let (status, _) = get_json!(app, "/api/v1/submissions/999".to_string());
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_json!(app, "/api/v1/ai-evaluations/999".to_string());
        assert_eq!(status, StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/v1/assignments/not-a-number")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let app = grading_app!(Arc::new(memory_storage().await));

        let req = test::TestRequest::post()
            .uri("/api/v1/testcases/run")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"question_id\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
