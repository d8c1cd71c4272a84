//! 提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub assignment_id: i64,
    pub question_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub code: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub text_submission: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub auto_marks: f64,
    pub custom_marks: Option<f64>,
    pub total_testcases: i32,
    pub passed_testcases: i32,
    pub submitted_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::assignment_questions::Entity",
        from = "Column::QuestionId",
        to = "super::assignment_questions::Column::Id"
    )]
    Question,
    #[sea_orm(has_many = "super::test_case_results::Entity")]
    TestCaseResults,
    #[sea_orm(has_one = "super::ai_evaluations::Entity")]
    AiEvaluation,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::assignment_questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::test_case_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TestCaseResults.def()
    }
}

impl Related<super::ai_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AiEvaluation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use crate::models::submissions::entities::Submission;
        use chrono::{DateTime, Utc};

        Submission {
            id: self.id,
            student_id: self.student_id,
            assignment_id: self.assignment_id,
            question_id: self.question_id,
            code: self.code,
            text_submission: self.text_submission,
            status: self.status.parse().unwrap_or_default(),
            feedback: self.feedback,
            total_testcases: self.total_testcases,
            passed_testcases: self.passed_testcases,
            auto_marks: self.auto_marks,
            custom_marks: self.custom_marks,
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0)
                .unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
