//! Judge0 执行后端
//!
//! 同步提交（`wait=true`），通过判定：Judge0 状态为 Accepted(3) 且输出一致。

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use super::{
    CodeExecutor, ExecutionOutcome, ExecutionRequest, LanguageTarget, non_empty, outputs_match,
};
use crate::config::SandboxEndpointConfig;
use crate::errors::{AssignEaseError, Result};
use crate::models::test_case_results::entities::TestCaseResultStatus;

/// Judge0 中 "Accepted" 的状态 ID
pub const STATUS_ACCEPTED: i32 = 3;

/// 未知语言时使用的默认语言（Python 3）
pub const DEFAULT_LANGUAGE_ID: i32 = 71;

/// 常用语言名到 Judge0 语言 ID
const LANGUAGE_IDS: &[(&str, i32)] = &[
    ("python", 71),
    ("javascript", 63),
    ("java", 62),
    ("cpp", 54),
    ("c", 50),
    ("csharp", 51),
    ("php", 68),
    ("typescript", 74),
];

#[derive(Debug, Serialize)]
struct SubmissionPayload<'a> {
    source_code: &'a str,
    language_id: i32,
    stdin: &'a str,
    cpu_time_limit: i32,
    memory_limit: i32,
}

/// Judge0 返回的提交结果
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Judge0Submission {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    // 秒，Judge0 以字符串返回
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub time: Option<f64>,
    // KB
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub memory: Option<i64>,
    #[serde(default)]
    pub status: Option<Judge0Status>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Judge0Status {
    pub id: i32,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(n) => Some(*n),
            NumberOrString::Text(s) => s.trim().parse().ok(),
        }
    }
}

fn deserialize_lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

fn deserialize_lenient_i64<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()).map(|n| n.round() as i64))
}

/// Judge0 执行后端
pub struct Judge0Executor {
    client: reqwest::Client,
    base_url: String,
}

impl Judge0Executor {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &SandboxEndpointConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// 解析 Judge0 语言 ID：显式 ID > 数字字符串 > 名称映射 > 默认 71
    pub fn language_id(target: &LanguageTarget) -> i32 {
        if let Some(id) = target.judge0_id {
            return id;
        }
        let name = target.name.trim();
        if let Ok(id) = name.parse::<i32>() {
            return id;
        }
        let lower = name.to_lowercase();
        LANGUAGE_IDS
            .iter()
            .find(|(key, _)| *key == lower)
            .map(|(_, id)| *id)
            .unwrap_or(DEFAULT_LANGUAGE_ID)
    }

    async fn submit(&self, request: &ExecutionRequest) -> Result<Judge0Submission> {
        let url = format!("{}/submissions?base64_encoded=false&wait=true", self.base_url);
        let payload = SubmissionPayload {
            source_code: &request.source_code,
            language_id: Self::language_id(&request.language),
            stdin: &request.stdin,
            cpu_time_limit: request.timeout,
            memory_limit: request.memory_limit,
        };

        let submission = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json::<Judge0Submission>()
            .await?;

        Ok(submission)
    }

    /// 按 token 查询提交结果（同步评测路径不使用）
    pub async fn lookup(&self, token: &str) -> Result<Judge0Submission> {
        let token = uuid::Uuid::parse_str(token)
            .map_err(|e| AssignEaseError::validation(format!("无效的 Judge0 token: {e}")))?;
        let url = format!("{}/submissions/{}?base64_encoded=false", self.base_url, token);

        let submission = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<Judge0Submission>()
            .await?;

        Ok(submission)
    }

    /// 把 Judge0 结果规范化
    pub fn outcome(submission: Judge0Submission, expected_output: &str) -> ExecutionOutcome {
        let (status_id, status_description) = submission
            .status
            .map(|s| (Some(s.id), s.description))
            .unwrap_or((None, "Unknown".to_string()));
        let accepted = status_id == Some(STATUS_ACCEPTED);

        let stdout = submission.stdout.unwrap_or_default();
        let passed = accepted && outputs_match(&stdout, expected_output);

        let error_message = non_empty(submission.stderr)
            .or(non_empty(submission.compile_output))
            .or_else(|| (!accepted).then_some(status_description));

        ExecutionOutcome {
            status: if passed {
                TestCaseResultStatus::Passed
            } else {
                TestCaseResultStatus::Failed
            },
            passed,
            actual_output: stdout,
            execution_time: submission.time,
            memory_used: submission.memory,
            error_message,
            token: submission.token,
        }
    }
}

#[async_trait::async_trait]
impl CodeExecutor for Judge0Executor {
    fn name(&self) -> &'static str {
        "judge0"
    }

    async fn execute(&self, request: &ExecutionRequest) -> ExecutionOutcome {
        match self.submit(request).await {
            Ok(submission) => {
                debug!(
                    "Judge0 submission {:?} finished with status {:?}",
                    submission.token,
                    submission.status.as_ref().map(|s| s.id)
                );
                Self::outcome(submission, &request.expected_output)
            }
            Err(e) => {
                warn!("Judge0 execution failed: {}", e);
                ExecutionOutcome::from_error(e.message())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, HttpServer, web};
    use serde_json::{Value, json};

    fn target(name: &str, judge0_id: Option<i32>) -> LanguageTarget {
        LanguageTarget {
            name: name.to_string(),
            version: String::new(),
            judge0_id,
        }
    }

    fn request(language: LanguageTarget, stdin: &str, expected: &str) -> ExecutionRequest {
        ExecutionRequest {
            source_code: "print(input())".to_string(),
            language,
            stdin: stdin.to_string(),
            expected_output: expected.to_string(),
            timeout: 2,
            memory_limit: 128_000,
        }
    }

    #[test]
    fn test_language_id_resolution() {
        assert_eq!(Judge0Executor::language_id(&target("python", Some(92))), 92);
        assert_eq!(Judge0Executor::language_id(&target("62", None)), 62);
        assert_eq!(Judge0Executor::language_id(&target("JavaScript", None)), 63);
        assert_eq!(Judge0Executor::language_id(&target("cpp", None)), 54);
        assert_eq!(Judge0Executor::language_id(&target("brainfuck", None)), 71);
    }

    #[test]
    fn test_accepted_with_matching_output_passes() {
        let submission: Judge0Submission = serde_json::from_value(json!({
            "token": "d85cd024-1548-4165-96c7-7bc88673f194",
            "stdout": "4\n",
            "stderr": null,
            "compile_output": null,
            "time": "0.012",
            "memory": 3120,
            "status": { "id": 3, "description": "Accepted" }
        }))
        .unwrap();

        let outcome = Judge0Executor::outcome(submission, "4");
        assert!(outcome.passed);
        assert_eq!(outcome.status, TestCaseResultStatus::Passed);
        // 原始输出保留换行
        assert_eq!(outcome.actual_output, "4\n");
        assert_eq!(outcome.execution_time, Some(0.012));
        assert_eq!(outcome.memory_used, Some(3120));
        assert!(outcome.error_message.is_none());
    }

    #[test]
    fn test_accepted_with_wrong_output_fails_without_message() {
        let submission: Judge0Submission = serde_json::from_value(json!({
            "stdout": "5",
            "status": { "id": 3, "description": "Accepted" }
        }))
        .unwrap();

        let outcome = Judge0Executor::outcome(submission, "4");
        assert!(!outcome.passed);
        assert_eq!(outcome.status, TestCaseResultStatus::Failed);
        assert!(outcome.error_message.is_none());
    }

    #[test]
    fn test_error_message_precedence() {
        let compile_error: Judge0Submission = serde_json::from_value(json!({
            "stdout": null,
            "stderr": "",
            "compile_output": "main.c:1: error",
            "status": { "id": 6, "description": "Compilation Error" }
        }))
        .unwrap();
        assert_eq!(
            Judge0Executor::outcome(compile_error, "")
                .error_message
                .as_deref(),
            Some("main.c:1: error")
        );

        let runtime_error: Judge0Submission = serde_json::from_value(json!({
            "stderr": "Traceback",
            "compile_output": "ignored",
            "status": { "id": 11, "description": "Runtime Error (NZEC)" }
        }))
        .unwrap();
        assert_eq!(
            Judge0Executor::outcome(runtime_error, "")
                .error_message
                .as_deref(),
            Some("Traceback")
        );

        let timeout: Judge0Submission = serde_json::from_value(json!({
            "time": 2.5,
            "status": { "id": 5, "description": "Time Limit Exceeded" }
        }))
        .unwrap();
        let outcome = Judge0Executor::outcome(timeout, "");
        // 输出一致但未 Accepted 也不算通过
        assert!(!outcome.passed);
        assert_eq!(outcome.execution_time, Some(2.5));
        assert_eq!(
            outcome.error_message.as_deref(),
            Some("Time Limit Exceeded")
        );
    }

    async fn fake_submission(body: web::Json<Value>) -> HttpResponse {
        let language_id = body["language_id"].as_i64().unwrap_or_default();
        if language_id != 71 || body["cpu_time_limit"] != 2 || body["memory_limit"] != 128_000 {
            return HttpResponse::Ok().json(json!({
                "status": { "id": 6, "description": "Compilation Error" },
                "compile_output": format!("unexpected payload: {body:?}")
            }));
        }
        HttpResponse::Ok().json(json!({
            "token": "9f0f4a5e-0000-4000-8000-000000000001",
            "stdout": format!("{}\n", body["stdin"].as_str().unwrap_or_default()),
            "time": "0.01",
            "memory": 1024,
            "status": { "id": 3, "description": "Accepted" }
        }))
    }

    fn spawn_fake_judge0() -> String {
        let server = HttpServer::new(|| {
            App::new()
                .route("/submissions", web::post().to(fake_submission))
                .route(
                    "/submissions/{token}",
                    web::get().to(|path: web::Path<String>| async move {
                        HttpResponse::Ok().json(json!({
                            "token": path.into_inner(),
                            "stdout": "cached",
                            "status": { "id": 3, "description": "Accepted" }
                        }))
                    }),
                )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind fake judge0");
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{addr}")
    }

    #[actix_web::test]
    async fn test_execute_against_fake_server() {
        let base = spawn_fake_judge0();
        let executor = Judge0Executor::new(base, Duration::from_secs(5)).unwrap();

        let outcome = executor
            .execute(&request(target("python", None), "hello", "hello"))
            .await;
        assert!(outcome.passed, "unexpected outcome: {outcome:?}");
        assert_eq!(
            outcome.token.as_deref(),
            Some("9f0f4a5e-0000-4000-8000-000000000001")
        );

        let lookup = executor
            .lookup("9f0f4a5e-0000-4000-8000-000000000001")
            .await
            .unwrap();
        assert_eq!(lookup.stdout.as_deref(), Some("cached"));

        assert!(executor.lookup("not-a-token").await.is_err());
    }

    #[actix_web::test]
    async fn test_unreachable_host_becomes_error_outcome() {
        let executor =
            Judge0Executor::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let outcome = executor
            .execute(&request(target("python", None), "1", "1"))
            .await;
        assert_eq!(outcome.status, TestCaseResultStatus::Error);
        assert!(!outcome.passed);
        assert!(outcome.error_message.is_some());
    }
}
