use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_MARKS: i32 = 1;
pub const DEFAULT_TIMEOUT_SECS: i32 = 2;
pub const DEFAULT_MEMORY_LIMIT_KB: i32 = 128_000;

// 测试用例可见性
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "test_case.ts")]
pub enum TestCaseVisibility {
    Public, // 学生提交前可运行
    #[default]
    Hidden, // 仅用于评测
}

impl<'de> Deserialize<'de> for TestCaseVisibility {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!("无效的可见性: '{s}'. 支持: public, hidden"))
        })
    }
}

impl std::fmt::Display for TestCaseVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestCaseVisibility::Public => write!(f, "public"),
            TestCaseVisibility::Hidden => write!(f, "hidden"),
        }
    }
}

impl std::str::FromStr for TestCaseVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(TestCaseVisibility::Public),
            "hidden" => Ok(TestCaseVisibility::Hidden),
            _ => Err(format!("Invalid test case visibility: {s}")),
        }
    }
}

/// 测试用例，评测后不再修改
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "test_case.ts")]
pub struct TestCase {
    pub id: i64,
    pub question_id: i64,
    pub input: String,
    pub expected_output: String,
    pub marks: i32,
    pub visibility: TestCaseVisibility,
    // 秒
    pub timeout: i32,
    // KB
    pub memory_limit: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
