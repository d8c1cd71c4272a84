//! Piston 执行后端
//!
//! 通过判定：去除首尾空白后输出一致，且 stderr 为空。

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{CodeExecutor, ExecutionOutcome, ExecutionRequest, non_empty, outputs_match};
use crate::config::SandboxEndpointConfig;
use crate::errors::Result;
use crate::models::test_case_results::entities::TestCaseResultStatus;

#[derive(Debug, Serialize)]
struct PistonFile<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ExecutePayload<'a> {
    language: &'a str,
    version: &'a str,
    files: Vec<PistonFile<'a>>,
    stdin: &'a str,
}

/// Piston 的单个阶段（compile / run）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PistonStage {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub signal: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PistonResponse {
    #[serde(default)]
    pub run: Option<PistonStage>,
    #[serde(default)]
    pub compile: Option<PistonStage>,
}

/// Piston 执行后端
pub struct PistonExecutor {
    client: reqwest::Client,
    base_url: String,
}

impl PistonExecutor {
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

    async fn run(&self, request: &ExecutionRequest) -> Result<PistonResponse> {
        let url = format!("{}/api/v2/execute", self.base_url);
        let payload = ExecutePayload {
            language: &request.language.name,
            version: &request.language.version,
            files: vec![PistonFile {
                content: &request.source_code,
            }],
            stdin: &request.stdin,
        };

        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json::<PistonResponse>()
            .await?;

        Ok(response)
    }

    /// 把 Piston 结果规范化
    pub fn outcome(response: PistonResponse, expected_output: &str) -> ExecutionOutcome {
        let run = response.run.unwrap_or_default();
        let passed = run.stderr.is_empty() && outputs_match(&run.stdout, expected_output);

        // 编译失败时没有 run 阶段的输出
        let error_message = non_empty(Some(run.stderr))
            .or_else(|| non_empty(response.compile.map(|c| c.stderr)));

        ExecutionOutcome {
            status: if passed {
                TestCaseResultStatus::Passed
            } else {
                TestCaseResultStatus::Failed
            },
            passed,
            actual_output: run.stdout.trim().to_string(),
            execution_time: None,
            memory_used: None,
            error_message,
            token: None,
        }
    }
}

#[async_trait::async_trait]
impl CodeExecutor for PistonExecutor {
    fn name(&self) -> &'static str {
        "piston"
    }

    async fn execute(&self, request: &ExecutionRequest) -> ExecutionOutcome {
        match self.run(request).await {
            Ok(response) => {
                debug!(
                    "Piston run finished with exit code {:?}",
                    response.run.as_ref().and_then(|r| r.code)
                );
                Self::outcome(response, &request.expected_output)
            }
            Err(e) => {
                warn!("Piston execution failed: {}", e);
                ExecutionOutcome::from_error(e.message())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::LanguageTarget;
    use actix_web::{App, HttpResponse, HttpServer, web};
    use serde_json::{Value, json};

    fn response(value: Value) -> PistonResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_matching_output_passes_and_is_trimmed() {
        let outcome = PistonExecutor::outcome(
            response(json!({ "run": { "stdout": "  hello\n", "stderr": "", "code": 0 } })),
            "hello",
        );
        assert!(outcome.passed);
        assert_eq!(outcome.status, TestCaseResultStatus::Passed);
        assert_eq!(outcome.actual_output, "hello");
        assert!(outcome.error_message.is_none());
    }

    #[test]
    fn test_stderr_fails_even_when_output_matches() {
        let outcome = PistonExecutor::outcome(
            response(json!({ "run": { "stdout": "hello", "stderr": "DeprecationWarning", "code": 0 } })),
            "hello",
        );
        assert!(!outcome.passed);
        assert_eq!(outcome.status, TestCaseResultStatus::Failed);
        assert_eq!(outcome.error_message.as_deref(), Some("DeprecationWarning"));
    }

    #[test]
    fn test_compile_failure_reports_compile_stderr() {
        let outcome = PistonExecutor::outcome(
            response(json!({ "compile": { "stdout": "", "stderr": "error: expected ';'", "code": 1 } })),
            "1",
        );
        assert!(!outcome.passed);
        assert_eq!(outcome.actual_output, "");
        assert_eq!(outcome.error_message.as_deref(), Some("error: expected ';'"));
    }

    async fn fake_execute(body: web::Json<Value>) -> HttpResponse {
        if body["language"] == "teapot" {
            return HttpResponse::InternalServerError().body("runtime unavailable");
        }
        // 回显 stdin，并把语言与版本写入 stderr 以便断言
        let stderr = if body["language"] == "python" && body["version"] == "3.10.0" {
            String::new()
        } else {
            format!("unexpected runtime {} {}", body["language"], body["version"])
        };
        HttpResponse::Ok().json(json!({
            "language": body["language"],
            "version": body["version"],
            "run": {
                "stdout": format!("{}\n", body["stdin"].as_str().unwrap_or_default()),
                "stderr": stderr,
                "code": 0,
                "signal": null,
                "output": ""
            }
        }))
    }

    fn spawn_fake_piston() -> String {
        let server = HttpServer::new(|| {
            App::new().route("/api/v2/execute", web::post().to(fake_execute))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind fake piston");
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{addr}")
    }

    fn request(name: &str, version: &str, stdin: &str, expected: &str) -> ExecutionRequest {
        ExecutionRequest {
            source_code: "print(input())".to_string(),
            language: LanguageTarget {
                name: name.to_string(),
                version: version.to_string(),
                judge0_id: None,
            },
            stdin: stdin.to_string(),
            expected_output: expected.to_string(),
            timeout: 2,
            memory_limit: 128_000,
        }
    }

    #[actix_web::test]
    async fn test_execute_against_fake_server() {
        let base = spawn_fake_piston();
        let executor = PistonExecutor::new(base, Duration::from_secs(5)).unwrap();

        let passed = executor
            .execute(&request("python", "3.10.0", "5", "5"))
            .await;
        assert!(passed.passed, "unexpected outcome: {passed:?}");
        assert_eq!(passed.actual_output, "5");

        let failed = executor
            .execute(&request("python", "3.10.0", "5", "6"))
            .await;
        assert!(!failed.passed);
        assert_eq!(failed.status, TestCaseResultStatus::Failed);

        let errored = executor.execute(&request("teapot", "", "5", "5")).await;
        assert_eq!(errored.status, TestCaseResultStatus::Error);
        assert!(errored.error_message.is_some());
    }

    #[actix_web::test]
    async fn test_unreachable_host_becomes_error_outcome() {
        let executor =
            PistonExecutor::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let outcome = executor
            .execute(&request("python", "3.10.0", "1", "1"))
            .await;
        assert_eq!(outcome.status, TestCaseResultStatus::Error);
        assert!(!outcome.passed);
        assert!(outcome.actual_output.is_empty());
        assert!(outcome.error_message.is_some());
    }
}
