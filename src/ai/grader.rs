use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use super::client::{LanguageModel, OllamaClient};
use super::extract::extract_json_object;
use super::normalize::normalize_verdict;
use super::prompt::build_prompt;
use crate::config::LlmConfig;
use crate::errors::{AssignEaseError, Result};
use crate::models::ai_evaluations::entities::EvaluationVerdict;

/// AI 评分器：调用模型、解析并规范化输出，失败时按配置重试
pub struct AiGrader {
    model: Arc<dyn LanguageModel>,
    retries: u32,
    backoff: Duration,
}

impl AiGrader {
    pub fn new(model: Arc<dyn LanguageModel>, retries: u32, backoff: Duration) -> Self {
        Self {
            model,
            retries,
            backoff,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let client = OllamaClient::from_config(config)?;
        Ok(Self::new(
            Arc::new(client),
            config.retries,
            Duration::from_millis(config.retry_backoff_ms),
        ))
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    pub async fn evaluate(&self, question: &str, answer: &str) -> Result<EvaluationVerdict> {
        let prompt = build_prompt(question, answer);
        let mut attempt: u32 = 0;

        loop {
            match self.attempt(&prompt).await {
                Ok(verdict) => return Ok(verdict),
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    warn!(
                        "AI grading attempt {} failed: {}, retrying",
                        attempt,
                        e.message()
                    );
                    tokio::time::sleep(self.backoff).await;
                }
                Err(e) => {
                    return Err(AssignEaseError::ai_grading(format!(
                        "AI grading failed: {}",
                        e.message()
                    )));
                }
            }
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<EvaluationVerdict> {
        let text = self.model.generate(prompt).await?;
        debug!("LLM response: {}", text);

        let json = extract_json_object(&text).ok_or_else(|| {
            let preview: String = text.chars().take(500).collect();
            AssignEaseError::ai_grading(format!("No JSON found in AI response: {preview}"))
        })?;

        let value: Value = serde_json::from_str(json).map_err(|e| {
            AssignEaseError::ai_grading(format!("Invalid JSON in AI response: {e}"))
        })?;

        match value {
            Value::Object(map) => normalize_verdict(&map),
            other => Err(AssignEaseError::ai_grading(format!(
                "Incomplete AI response: {other}"
            ))),
        }
    }
}
