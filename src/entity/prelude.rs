//! 预导入模块，方便使用

pub use super::ai_evaluations::{
    ActiveModel as AiEvaluationActiveModel, Entity as AiEvaluations, Model as AiEvaluationModel,
};
pub use super::assignment_questions::{
    ActiveModel as QuestionActiveModel, Entity as AssignmentQuestions, Model as QuestionModel,
};
pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::programming_languages::{
    ActiveModel as LanguageActiveModel, Entity as ProgrammingLanguages, Model as LanguageModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::test_case_results::{
    ActiveModel as TestCaseResultActiveModel, Entity as TestCaseResults,
    Model as TestCaseResultModel,
};
pub use super::test_cases::{
    ActiveModel as TestCaseActiveModel, Entity as TestCases, Model as TestCaseModel,
};
