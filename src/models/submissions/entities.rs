use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "submission.ts")]
pub enum SubmissionStatus {
    #[default]
    Submitted, // 已提交
    Checked,    // 已批改
    Reassigned, // 退回重做
    Rejected,   // 已拒绝
}

impl SubmissionStatus {
    pub const SUBMITTED: &'static str = "submitted";
    pub const CHECKED: &'static str = "checked";
    pub const REASSIGNED: &'static str = "reassigned";
    pub const REJECTED: &'static str = "rejected";
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: submitted, checked, reassigned, rejected"
            ))
        })
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Submitted => write!(f, "{}", SubmissionStatus::SUBMITTED),
            SubmissionStatus::Checked => write!(f, "{}", SubmissionStatus::CHECKED),
            SubmissionStatus::Reassigned => write!(f, "{}", SubmissionStatus::REASSIGNED),
            SubmissionStatus::Rejected => write!(f, "{}", SubmissionStatus::REJECTED),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SubmissionStatus::SUBMITTED => Ok(SubmissionStatus::Submitted),
            SubmissionStatus::CHECKED => Ok(SubmissionStatus::Checked),
            SubmissionStatus::REASSIGNED => Ok(SubmissionStatus::Reassigned),
            SubmissionStatus::REJECTED => Ok(SubmissionStatus::Rejected),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

/// 学生对某道题的提交，每个 (学生, 作业, 题目) 仅一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "submission.ts")]
pub struct Submission {
    pub id: i64,
    pub student_id: i64,
    pub assignment_id: i64,
    pub question_id: i64,
    pub code: Option<String>,
    pub text_submission: Option<String>,
    pub status: SubmissionStatus,
    // 教师评语
    pub feedback: Option<String>,
    // 以下三项每次评测整体覆盖
    pub total_testcases: i32,
    pub passed_testcases: i32,
    pub auto_marks: f64,
    // 教师手动给分，评测不会修改
    pub custom_marks: Option<f64>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Submission {
    /// 交给 AI 评估的作答内容：代码优先，其次文本
    pub fn answer_text(&self) -> &str {
        self.code
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.text_submission.as_deref())
            .unwrap_or("")
    }
}
