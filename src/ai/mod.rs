//! AI 定性评估
//!
//! - `client`: 模型调用（Ollama）
//! - `extract` / `normalize`: 输出解析与规范化
//! - `grader`: 带重试的评分入口
//! - `worker`: 后台执行与状态迁移

pub mod client;
pub mod extract;
pub mod grader;
pub mod normalize;
pub mod prompt;
pub mod worker;

pub use client::{LanguageModel, OllamaClient};
pub use grader::AiGrader;
pub use worker::{schedule_for_submission, spawn_evaluation};
