//! 考试题目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_definition_id: i64,
    #[sea_orm(column_type = "Text")]
    pub statement: String,
    pub question_type: String,
    #[sea_orm(column_type = "Text")]
    pub options: String,
    #[sea_orm(column_type = "Text")]
    pub correct_answer: String,
    pub points: f64,
    pub sequence: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exam_definitions::Entity",
        from = "Column::ExamDefinitionId",
        to = "super::exam_definitions::Column::Id"
    )]
    ExamDefinition,
}

impl Related<super::exam_definitions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamDefinition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam_question(self) -> crate::models::exams::entities::ExamQuestion {
        use crate::models::common::{QuestionType, question_type::decode_options};
        use crate::models::exams::entities::ExamQuestion;

        ExamQuestion {
            id: self.id,
            exam_definition_id: self.exam_definition_id,
            statement: self.statement,
            question_type: self
                .question_type
                .parse::<QuestionType>()
                .unwrap_or(QuestionType::Essay),
            options: decode_options(&self.options),
            correct_answer: self.correct_answer,
            points: self.points,
            sequence: self.sequence,
        }
    }
}
