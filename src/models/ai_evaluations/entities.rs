use serde::{Deserialize, Serialize};
use ts_rs::TS;

// AI 评估状态，pending 只会迁移一次到 done 或 error
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "ai_evaluation.ts")]
pub enum EvaluationStatus {
    #[default]
    Pending,
    Done,
    Error,
}

impl EvaluationStatus {
    pub const PENDING: &'static str = "pending";
    pub const DONE: &'static str = "done";
    pub const ERROR: &'static str = "error";
}

impl std::fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationStatus::Pending => write!(f, "{}", EvaluationStatus::PENDING),
            EvaluationStatus::Done => write!(f, "{}", EvaluationStatus::DONE),
            EvaluationStatus::Error => write!(f, "{}", EvaluationStatus::ERROR),
        }
    }
}

impl std::str::FromStr for EvaluationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            EvaluationStatus::PENDING => Ok(EvaluationStatus::Pending),
            EvaluationStatus::DONE => Ok(EvaluationStatus::Done),
            EvaluationStatus::ERROR => Ok(EvaluationStatus::Error),
            _ => Err(format!("Invalid evaluation status: {s}")),
        }
    }
}

// 错误类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "ai_evaluation.ts")]
pub enum MistakeType {
    Syntax, // 语法错误
    Logic,  // 逻辑错误
    Output, // 输出格式错误
    None,   // 完全正确
}

impl MistakeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MistakeType::Syntax => "syntax",
            MistakeType::Logic => "logic",
            MistakeType::Output => "output",
            MistakeType::None => "none",
        }
    }
}

impl std::fmt::Display for MistakeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MistakeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "syntax" => Ok(MistakeType::Syntax),
            "logic" => Ok(MistakeType::Logic),
            "output" => Ok(MistakeType::Output),
            "none" => Ok(MistakeType::None),
            _ => Err(format!("Invalid mistake type: {s}")),
        }
    }
}

/// AI 评估记录，与提交一一对应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ai_evaluation.ts")]
pub struct AiEvaluation {
    pub id: i64,
    pub submission_id: i64,
    pub assignment_id: i64,
    pub question_id: i64,
    pub student_id: i64,
    pub question_text: String,
    pub student_answer: String,
    pub mistake_type: Option<MistakeType>,
    pub ai_score: Option<f64>,
    pub confidence: Option<f64>,
    pub feedback: Option<String>,
    // 规范化后的模型输出
    pub raw_response: Option<serde_json::Value>,
    pub model_name: String,
    pub status: EvaluationStatus,
    pub error: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 新建 pending 状态的 AI 评估
#[derive(Debug, Clone)]
pub struct NewAiEvaluation {
    pub submission_id: i64,
    pub assignment_id: i64,
    pub question_id: i64,
    pub student_id: i64,
    pub question_text: String,
    pub student_answer: String,
    pub model_name: String,
}

/// 规范化后的评分结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "ai_evaluation.ts")]
pub struct EvaluationVerdict {
    pub mistake_type: MistakeType,
    // 0..=10 的整数分
    pub score: i64,
    // [0, 1]
    pub confidence: f64,
    pub feedback: String,
}
