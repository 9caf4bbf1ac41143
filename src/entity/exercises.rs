//! 练习实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exercises")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub classroom_id: i64,
    #[sea_orm(column_type = "Text")]
    pub statement: String,
    pub question_type: String,
    // JSON 数组文本
    #[sea_orm(column_type = "Text")]
    pub options: String,
    #[sea_orm(column_type = "Text")]
    pub correct_answer: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classrooms::Entity",
        from = "Column::ClassroomId",
        to = "super::classrooms::Column::Id"
    )]
    Classroom,
    #[sea_orm(has_many = "super::student_exercise_answers::Entity")]
    Answers,
}

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classroom.def()
    }
}

impl Related<super::student_exercise_answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exercise(self) -> crate::models::exercises::entities::Exercise {
        use crate::models::common::{QuestionType, question_type::decode_options};
        use crate::models::exercises::entities::Exercise;
        use chrono::{DateTime, Utc};

        Exercise {
            id: self.id,
            classroom_id: self.classroom_id,
            statement: self.statement,
            question_type: self
                .question_type
                .parse::<QuestionType>()
                .unwrap_or(QuestionType::Essay),
            options: decode_options(&self.options),
            correct_answer: self.correct_answer,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
