//! 测试用例实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "test_cases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub question_id: i64,
    #[sea_orm(column_type = "Text")]
    pub input: String,
    #[sea_orm(column_type = "Text")]
    pub expected_output: String,
    pub marks: i32,
    pub visibility: String,
    pub timeout: i32,
    pub memory_limit: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment_questions::Entity",
        from = "Column::QuestionId",
        to = "super::assignment_questions::Column::Id"
    )]
    Question,
    #[sea_orm(has_many = "super::test_case_results::Entity")]
    Results,
}

impl Related<super::assignment_questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::test_case_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_test_case(self) -> crate::models::test_cases::entities::TestCase {
        use crate::models::test_cases::entities::TestCase;
        use chrono::{DateTime, Utc};

        TestCase {
            id: self.id,
            question_id: self.question_id,
            input: self.input,
            expected_output: self.expected_output,
            marks: self.marks,
            visibility: self.visibility.parse().unwrap_or_default(),
            timeout: self.timeout,
            memory_limit: self.memory_limit,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
