use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::config::LlmConfig;
use crate::errors::{AssignEaseError, Result};

/// 文本生成模型
#[async_trait::async_trait]
pub trait LanguageModel: Send + Sync {
    fn model_name(&self) -> &str;

    /// 返回去除首尾空白后的生成文本，空文本视为错误
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f64,
    top_p: f64,
    repeat_penalty: f64,
    num_predict: u32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

/// Ollama `/api/generate` 客户端
pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    num_predict: u32,
}

impl OllamaClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
        num_predict: u32,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            num_predict,
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            Duration::from_secs(config.request_timeout),
            config.num_predict,
        )
    }
}

#[async_trait::async_trait]
impl LanguageModel for OllamaClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        // 确定性输出
        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: 0.0,
                top_p: 1.0,
                repeat_penalty: 1.0,
                num_predict: self.num_predict,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.endpoint))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if status != reqwest::StatusCode::OK {
            return Err(AssignEaseError::ai_grading(format!(
                "LLM HTTP {}: {}",
                status.as_u16(),
                body
            )));
        }

        let data: Value = serde_json::from_str(&body)?;
        if let Some(error) = data.get("error") {
            return Err(AssignEaseError::ai_grading(format!("LLM error: {error}")));
        }

        let text = data
            .get("response")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim();
        if text.is_empty() {
            return Err(AssignEaseError::ai_grading("AI returned empty response"));
        }

        Ok(text.to_string())
    }
}
