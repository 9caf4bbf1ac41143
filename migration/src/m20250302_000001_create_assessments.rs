use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_tables::{Courses, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 考试定义 ====================
        manager
            .create_table(
                Table::create()
                    .table(ExamDefinitions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamDefinitions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExamDefinitions::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExamDefinitions::Title).string().not_null())
                    .col(ColumnDef::new(ExamDefinitions::Description).text().null())
                    .col(
                        ColumnDef::new(ExamDefinitions::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ExamDefinitions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExamDefinitions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamDefinitions::Table, ExamDefinitions::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 考试题目 ====================
        manager
            .create_table(
                Table::create()
                    .table(ExamQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ExamQuestions::ExamDefinitionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExamQuestions::Statement).text().not_null())
                    .col(
                        ColumnDef::new(ExamQuestions::QuestionType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExamQuestions::Options).text().not_null())
                    .col(
                        ColumnDef::new(ExamQuestions::CorrectAnswer)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExamQuestions::Points).double().not_null())
                    .col(ColumnDef::new(ExamQuestions::Sequence).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExamQuestions::Table, ExamQuestions::ExamDefinitionId)
                            .to(ExamDefinitions::Table, ExamDefinitions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 考试记录（课程评价 / 考试作答） ====================
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exams::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Exams::Kind).string().not_null())
                    .col(ColumnDef::new(Exams::ExamDefinitionId).big_integer().null())
                    .col(ColumnDef::new(Exams::Grade).double().not_null())
                    .col(ColumnDef::new(Exams::Comment).text().null())
                    .col(ColumnDef::new(Exams::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Exams::Table, Exams::ExamDefinitionId)
                            .to(ExamDefinitions::Table, ExamDefinitions::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 疑问 ====================
        manager
            .create_table(
                Table::create()
                    .table(Doubts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Doubts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Doubts::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Doubts::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Doubts::Question).text().not_null())
                    .col(ColumnDef::new(Doubts::Answer).text().null())
                    .col(ColumnDef::new(Doubts::ProfessorId).big_integer().null())
                    .col(ColumnDef::new(Doubts::Status).string().not_null())
                    .col(ColumnDef::new(Doubts::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Doubts::AnsweredAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Doubts::Table, Doubts::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Doubts::Table, Doubts::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 评论 ====================
        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comments::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Comments::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Comments::Content).text().not_null())
                    .col(ColumnDef::new(Comments::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Comments::Table, Comments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Comments::Table, Comments::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 邮件订阅 ====================
        manager
            .create_table(
                Table::create()
                    .table(NewsletterInscriptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NewsletterInscriptions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NewsletterInscriptions::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(NewsletterInscriptions::Name).string().null())
                    .col(
                        ColumnDef::new(NewsletterInscriptions::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(NewsletterInscriptions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NewsletterInscriptions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 访客提问 ====================
        manager
            .create_table(
                Table::create()
                    .table(VisitorQuestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VisitorQuestions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VisitorQuestions::Name).string().not_null())
                    .col(ColumnDef::new(VisitorQuestions::Email).string().not_null())
                    .col(ColumnDef::new(VisitorQuestions::Message).text().not_null())
                    .col(ColumnDef::new(VisitorQuestions::Answer).text().null())
                    .col(
                        ColumnDef::new(VisitorQuestions::Answered)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(VisitorQuestions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VisitorQuestions::AnsweredAt)
                            .big_integer()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 索引 ====================
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exam_definitions_course_id")
                    .table(ExamDefinitions::Table)
                    .col(ExamDefinitions::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exam_questions_definition_id")
                    .table(ExamQuestions::Table)
                    .col(ExamQuestions::ExamDefinitionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_exams_student_course")
                    .table(Exams::Table)
                    .col(Exams::StudentId)
                    .col(Exams::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_doubts_course_id")
                    .table(Doubts::Table)
                    .col(Doubts::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comments_course_id")
                    .table(Comments::Table)
                    .col(Comments::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VisitorQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NewsletterInscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Doubts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamQuestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ExamDefinitions::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum ExamDefinitions {
    #[sea_orm(iden = "exam_definitions")]
    Table,
    Id,
    CourseId,
    Title,
    Description,
    Published,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ExamQuestions {
    #[sea_orm(iden = "exam_questions")]
    Table,
    Id,
    ExamDefinitionId,
    Statement,
    QuestionType,
    Options,
    CorrectAnswer,
    Points,
    Sequence,
}

#[derive(DeriveIden)]
enum Exams {
    #[sea_orm(iden = "exams")]
    Table,
    Id,
    StudentId,
    CourseId,
    Kind,
    ExamDefinitionId,
    Grade,
    Comment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Doubts {
    #[sea_orm(iden = "doubts")]
    Table,
    Id,
    CourseId,
    StudentId,
    Question,
    Answer,
    ProfessorId,
    Status,
    CreatedAt,
    AnsweredAt,
}

#[derive(DeriveIden)]
enum Comments {
    #[sea_orm(iden = "comments")]
    Table,
    Id,
    CourseId,
    StudentId,
    Content,
    CreatedAt,
}

#[derive(DeriveIden)]
enum NewsletterInscriptions {
    #[sea_orm(iden = "newsletter_inscriptions")]
    Table,
    Id,
    Email,
    Name,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum VisitorQuestions {
    #[sea_orm(iden = "visitor_questions")]
    Table,
    Id,
    Name,
    Email,
    Message,
    Answer,
    Answered,
    CreatedAt,
    AnsweredAt,
}
