use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建编程语言表
        manager
            .create_table(
                Table::create()
                    .table(ProgrammingLanguages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProgrammingLanguages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ProgrammingLanguages::DisplayName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ProgrammingLanguages::LanguageName).string().null())
                    .col(ColumnDef::new(ProgrammingLanguages::PistonName).string().null())
                    .col(ColumnDef::new(ProgrammingLanguages::PistonVersion).string().null())
                    .col(
                        ColumnDef::new(ProgrammingLanguages::Judge0LanguageId)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ProgrammingLanguages::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ProgrammingLanguages::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProgrammingLanguages::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assignments::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().not_null())
                    .col(ColumnDef::new(Assignments::DueDate).big_integer().null())
                    .col(ColumnDef::new(Assignments::AssignmentType).string().not_null())
                    .col(ColumnDef::new(Assignments::SubmissionType).string().not_null())
                    .col(ColumnDef::new(Assignments::Language).string().null())
                    .col(ColumnDef::new(Assignments::LanguageVersion).string().null())
                    .col(ColumnDef::new(Assignments::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Assignments::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建作业题目表
        manager
            .create_table(
                Table::create()
                    .table(AssignmentQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssignmentQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssignmentQuestions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssignmentQuestions::Title).text().not_null())
                    .col(
                        ColumnDef::new(AssignmentQuestions::TotalMarks)
                            .double()
                            .not_null()
                            .default(10.0),
                    )
                    .col(
                        ColumnDef::new(AssignmentQuestions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssignmentQuestions::Table, AssignmentQuestions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建测试用例表
        manager
            .create_table(
                Table::create()
                    .table(TestCases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestCases::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TestCases::QuestionId).big_integer().not_null())
                    .col(ColumnDef::new(TestCases::Input).text().not_null().default(""))
                    .col(
                        ColumnDef::new(TestCases::ExpectedOutput)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(TestCases::Marks).integer().not_null().default(1))
                    .col(
                        ColumnDef::new(TestCases::Visibility)
                            .string()
                            .not_null()
                            .default("hidden"),
                    )
                    .col(ColumnDef::new(TestCases::Timeout).integer().not_null().default(2))
                    .col(
                        ColumnDef::new(TestCases::MemoryLimit)
                            .integer()
                            .not_null()
                            .default(128000),
                    )
                    .col(ColumnDef::new(TestCases::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TestCases::Table, TestCases::QuestionId)
                            .to(AssignmentQuestions::Table, AssignmentQuestions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submissions::StudentId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Submissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::QuestionId).big_integer().not_null())
                    .col(ColumnDef::new(Submissions::Code).text().null())
                    .col(ColumnDef::new(Submissions::TextSubmission).text().null())
                    .col(ColumnDef::new(Submissions::Status).string().not_null())
                    .col(ColumnDef::new(Submissions::Feedback).text().null())
                    .col(
                        ColumnDef::new(Submissions::AutoMarks)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Submissions::CustomMarks).double().null())
                    .col(
                        ColumnDef::new(Submissions::TotalTestcases)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Submissions::PassedTestcases)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::QuestionId)
                            .to(AssignmentQuestions::Table, AssignmentQuestions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建测试用例结果表
        manager
            .create_table(
                Table::create()
                    .table(TestCaseResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TestCaseResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TestCaseResults::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestCaseResults::TestCaseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TestCaseResults::Status).string().not_null())
                    .col(ColumnDef::new(TestCaseResults::ActualOutput).text().null())
                    .col(ColumnDef::new(TestCaseResults::ExecutionTime).double().null())
                    .col(ColumnDef::new(TestCaseResults::MemoryUsed).big_integer().null())
                    .col(ColumnDef::new(TestCaseResults::Judge0Token).string().null())
                    .col(ColumnDef::new(TestCaseResults::ErrorMessage).text().null())
                    .col(
                        ColumnDef::new(TestCaseResults::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TestCaseResults::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TestCaseResults::Table, TestCaseResults::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TestCaseResults::Table, TestCaseResults::TestCaseId)
                            .to(TestCases::Table, TestCases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 AI 评估表
        manager
            .create_table(
                Table::create()
                    .table(AiEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiEvaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AiEvaluations::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiEvaluations::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiEvaluations::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiEvaluations::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AiEvaluations::QuestionText).text().not_null())
                    .col(ColumnDef::new(AiEvaluations::StudentAnswer).text().not_null())
                    .col(ColumnDef::new(AiEvaluations::MistakeType).string().null())
                    .col(ColumnDef::new(AiEvaluations::AiScore).double().null())
                    .col(ColumnDef::new(AiEvaluations::Confidence).double().null())
                    .col(ColumnDef::new(AiEvaluations::Feedback).text().null())
                    .col(ColumnDef::new(AiEvaluations::RawResponse).text().null())
                    .col(ColumnDef::new(AiEvaluations::ModelName).string().not_null())
                    .col(
                        ColumnDef::new(AiEvaluations::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(AiEvaluations::Error).text().null())
                    .col(
                        ColumnDef::new(AiEvaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AiEvaluations::CompletedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(AiEvaluations::Table, AiEvaluations::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 每个学生每道题只能提交一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_submissions_student_assignment_question")
                    .table(Submissions::Table)
                    .col(Submissions::StudentId)
                    .col(Submissions::AssignmentId)
                    .col(Submissions::QuestionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 每个提交的每个测试用例只保留一条结果
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_test_case_results_submission_test_case")
                    .table(TestCaseResults::Table)
                    .col(TestCaseResults::SubmissionId)
                    .col(TestCaseResults::TestCaseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // AI 评估与提交一一对应
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_ai_evaluations_submission_id")
                    .table(AiEvaluations::Table)
                    .col(AiEvaluations::SubmissionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignment_questions_assignment_id")
                    .table(AssignmentQuestions::Table)
                    .col(AssignmentQuestions::AssignmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_test_cases_question_id")
                    .table(TestCases::Table)
                    .col(TestCases::QuestionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_assignment_id")
                    .table(Submissions::Table)
                    .col(Submissions::AssignmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_ai_evaluations_student_id")
                    .table(AiEvaluations::Table)
                    .col(AiEvaluations::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(AiEvaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TestCaseResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TestCases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssignmentQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProgrammingLanguages::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum ProgrammingLanguages {
    #[sea_orm(iden = "programming_languages")]
    Table,
    Id,
    DisplayName,
    LanguageName,
    PistonName,
    PistonVersion,
    Judge0LanguageId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    ClassId,
    TeacherId,
    Title,
    Description,
    DueDate,
    AssignmentType,
    SubmissionType,
    Language,
    LanguageVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AssignmentQuestions {
    #[sea_orm(iden = "assignment_questions")]
    Table,
    Id,
    AssignmentId,
    Title,
    TotalMarks,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TestCases {
    #[sea_orm(iden = "test_cases")]
    Table,
    Id,
    QuestionId,
    Input,
    ExpectedOutput,
    Marks,
    Visibility,
    Timeout,
    MemoryLimit,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    StudentId,
    AssignmentId,
    QuestionId,
    Code,
    TextSubmission,
    Status,
    Feedback,
    AutoMarks,
    CustomMarks,
    TotalTestcases,
    PassedTestcases,
    SubmittedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TestCaseResults {
    #[sea_orm(iden = "test_case_results")]
    Table,
    Id,
    SubmissionId,
    TestCaseId,
    Status,
    ActualOutput,
    ExecutionTime,
    MemoryUsed,
    #[sea_orm(iden = "judge0_token")]
    Judge0Token,
    ErrorMessage,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AiEvaluations {
    #[sea_orm(iden = "ai_evaluations")]
    Table,
    Id,
    SubmissionId,
    AssignmentId,
    QuestionId,
    StudentId,
    QuestionText,
    StudentAnswer,
    MistakeType,
    AiScore,
    Confidence,
    Feedback,
    RawResponse,
    ModelName,
    Status,
    Error,
    CreatedAt,
    CompletedAt,
}
