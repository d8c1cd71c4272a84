//! 测试用例评测
//!
//! - `aggregator`: 提交评测与公开用例试运行
//! - `language`: 作业语言解析

pub mod aggregator;
pub mod language;

pub use aggregator::{grade_submission, run_public_testcases};
pub use language::{resolve_assignment_language, resolve_language};

/// 自动得分：通过比例乘以题目总分，不做舍入
pub fn auto_marks(passed: i32, total: i32, total_marks: f64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    f64::from(passed) / f64::from(total) * total_marks
}

/// 通过率（百分比）
pub fn percentage(passed: i32, total: i32) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    f64::from(passed) / f64::from(total) * 100.0
}

/// 展示用，保留两位小数
pub fn round_marks(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
