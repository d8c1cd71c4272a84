use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 作业类型
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "assignment.ts")]
pub enum AssignmentType {
    Coding,    // 编程题
    NonCoding, // 非编程题
}

impl<'de> Deserialize<'de> for AssignmentType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的作业类型: '{s}'. 支持的类型: coding, non_coding"
            ))
        })
    }
}

impl std::fmt::Display for AssignmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentType::Coding => write!(f, "coding"),
            AssignmentType::NonCoding => write!(f, "non_coding"),
        }
    }
}

impl std::str::FromStr for AssignmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "coding" => Ok(AssignmentType::Coding),
            "non_coding" => Ok(AssignmentType::NonCoding),
            _ => Err(format!("Invalid assignment type: {s}")),
        }
    }
}

// 提交内容策略
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "assignment.ts")]
pub enum SubmissionType {
    TextOnly,
    FilesOnly,
    TextAndFiles,
}

impl<'de> Deserialize<'de> for SubmissionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的提交类型: '{s}'. 支持的类型: text_only, files_only, text_and_files"
            ))
        })
    }
}

impl std::fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionType::TextOnly => write!(f, "text_only"),
            SubmissionType::FilesOnly => write!(f, "files_only"),
            SubmissionType::TextAndFiles => write!(f, "text_and_files"),
        }
    }
}

impl std::str::FromStr for SubmissionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text_only" => Ok(SubmissionType::TextOnly),
            "files_only" => Ok(SubmissionType::FilesOnly),
            "text_and_files" => Ok(SubmissionType::TextAndFiles),
            _ => Err(format!("Invalid submission type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "assignment.ts")]
pub struct Assignment {
    pub id: i64,
    // 所属班级 ID
    pub class_id: i64,
    // 布置作业的教师 ID
    pub teacher_id: i64,
    pub title: String,
    pub description: String,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub assignment_type: AssignmentType,
    pub submission_type: SubmissionType,
    // 自由文本语言名，评测时解析
    pub language: Option<String>,
    pub language_version: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignment_type_round_trip_strings() {
        assert_eq!("coding".parse::<AssignmentType>(), Ok(AssignmentType::Coding));
        assert_eq!(AssignmentType::NonCoding.to_string(), "non_coding");
        assert!("quiz".parse::<AssignmentType>().is_err());
    }

    #[test]
    fn test_submission_type_rejects_unknown_json() {
        let ok: SubmissionType = serde_json::from_str("\"text_and_files\"").expect("valid");
        assert_eq!(ok, SubmissionType::TextAndFiles);

        let err = serde_json::from_str::<SubmissionType>("\"zip\"").unwrap_err();
        assert!(err.to_string().contains("无效的提交类型"));
    }
}
