//! 模型输出规范化
//!
//! 无论模型返回什么，写入数据库的评分都满足：
//! confidence 在 [0, 1]，score 在 [0, 10]，none 至少 8 分，其它类型至多 7 分，syntax 至多 4 分。

use serde_json::{Map, Value};

use crate::errors::{AssignEaseError, Result};
use crate::models::ai_evaluations::entities::{EvaluationVerdict, MistakeType};

pub const REQUIRED_KEYS: [&str; 4] = ["mistake_type", "confidence", "score", "feedback"];
pub const DEFAULT_CONFIDENCE: f64 = 0.5;
pub const EMPTY_FEEDBACK: &str = "No explanation provided.";

pub fn normalize_verdict(result: &Map<String, Value>) -> Result<EvaluationVerdict> {
    if REQUIRED_KEYS.iter().any(|key| !result.contains_key(*key)) {
        return Err(AssignEaseError::ai_grading(format!(
            "Incomplete AI response: {}",
            Value::Object(result.clone())
        )));
    }

    let mistake_type = result["mistake_type"]
        .as_str()
        .and_then(|s| s.parse::<MistakeType>().ok())
        .unwrap_or(MistakeType::Logic);

    let confidence = lenient_f64(&result["confidence"])
        .unwrap_or(DEFAULT_CONFIDENCE)
        .clamp(0.0, 1.0);

    let mut score = lenient_f64(&result["score"])
        .map(|n| n.trunc() as i64)
        .unwrap_or(0)
        .clamp(0, 10);
    score = match mistake_type {
        MistakeType::None => score.max(8),
        MistakeType::Syntax => score.min(4),
        MistakeType::Logic | MistakeType::Output => score.min(7),
    };

    let feedback = match &result["feedback"] {
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        Value::Null | Value::String(_) => EMPTY_FEEDBACK.to_string(),
        other => other.to_string(),
    };

    Ok(EvaluationVerdict {
        mistake_type,
        score,
        confidence,
        feedback,
    })
}

/// 数字或数字字符串；NaN 与无穷视为无效
fn lenient_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: Value) -> Result<EvaluationVerdict> {
        match value {
            Value::Object(map) => normalize_verdict(&map),
            _ => panic!("test input must be an object"),
        }
    }

    #[test]
    fn test_syntax_score_is_capped_at_four() {
        let verdict = normalize(json!({
            "mistake_type": "syntax",
            "confidence": 0.9,
            "score": 9,
            "feedback": "missing colon"
        }))
        .unwrap();
        assert_eq!(verdict.mistake_type, MistakeType::Syntax);
        assert_eq!(verdict.score, 4);
    }

    #[test]
    fn test_none_score_is_raised_to_eight() {
        let verdict = normalize(json!({
            "mistake_type": "none",
            "confidence": "0.8",
            "score": "3.9",
            "feedback": "correct"
        }))
        .unwrap();
        assert_eq!(verdict.score, 8);
        assert_eq!(verdict.confidence, 0.8);
    }

    #[test]
    fn test_other_types_are_capped_at_seven() {
        let verdict = normalize(json!({
            "mistake_type": "output",
            "confidence": 1,
            "score": 10,
            "feedback": "off by one"
        }))
        .unwrap();
        assert_eq!(verdict.score, 7);
    }

    #[test]
    fn test_unknown_type_and_bad_numbers_fall_back() {
        let verdict = normalize(json!({
            "mistake_type": "typo",
            "confidence": "very",
            "score": "ten",
            "feedback": ""
        }))
        .unwrap();
        assert_eq!(verdict.mistake_type, MistakeType::Logic);
        assert_eq!(verdict.confidence, 0.5);
        assert_eq!(verdict.score, 0);
        assert_eq!(verdict.feedback, EMPTY_FEEDBACK);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let verdict = normalize(json!({
            "mistake_type": "none",
            "confidence": 4.2,
            "score": 99,
            "feedback": "great"
        }))
        .unwrap();
        assert_eq!(verdict.confidence, 1.0);
        assert_eq!(verdict.score, 10);

        let verdict = normalize(json!({
            "mistake_type": "logic",
            "confidence": -1,
            "score": -5.5,
            "feedback": "wrong loop"
        }))
        .unwrap();
        assert_eq!(verdict.confidence, 0.0);
        assert_eq!(verdict.score, 0);
    }

    #[test]
    fn test_feedback_text_is_kept_verbatim() {
        let feedback = "Printed 3 instead of 4, and used print instead of return";
        let verdict = normalize(json!({
            "mistake_type": "output",
            "confidence": 0.7,
            "score": 5,
            "feedback": feedback
        }))
        .unwrap();
        assert_eq!(verdict.feedback, feedback);
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let err = normalize(json!({
            "mistake_type": "none",
            "confidence": 0.5,
            "score": 10
        }))
        .unwrap_err();
        assert!(err.message().starts_with("Incomplete AI response"));
    }
}
