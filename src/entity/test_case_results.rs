//! 测试用例结果实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "test_case_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub submission_id: i64,
    pub test_case_id: i64,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub actual_output: Option<String>,
    pub execution_time: Option<f64>,
    pub memory_used: Option<i64>,
    pub judge0_token: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub error_message: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
    #[sea_orm(
        belongs_to = "super::test_cases::Entity",
        from = "Column::TestCaseId",
        to = "super::test_cases::Column::Id"
    )]
    TestCase,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::test_cases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestCase.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_test_case_result(
        self,
    ) -> crate::models::test_case_results::entities::TestCaseResult {
        use crate::models::test_case_results::entities::{TestCaseResult, TestCaseResultStatus};
        use chrono::{DateTime, Utc};

        TestCaseResult {
            id: self.id,
            submission_id: self.submission_id,
            test_case_id: self.test_case_id,
            status: self.status.parse().unwrap_or(TestCaseResultStatus::Error),
            actual_output: self.actual_output,
            execution_time: self.execution_time,
            memory_used: self.memory_used,
            judge0_token: self.judge0_token,
            error_message: self.error_message,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
