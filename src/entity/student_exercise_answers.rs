//! 学生练习作答实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_exercise_answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub exercise_id: i64,
    #[sea_orm(column_type = "Text")]
    pub answer: String,
    pub correct: bool,
    pub grade: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub answered_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exercises::Entity",
        from = "Column::ExerciseId",
        to = "super::exercises::Column::Id"
    )]
    Exercise,
}

impl Related<super::exercises::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exercise.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_answer(self) -> crate::models::exercises::entities::StudentExerciseAnswer {
        use crate::models::exercises::entities::StudentExerciseAnswer;
        use chrono::{DateTime, Utc};

        StudentExerciseAnswer {
            id: self.id,
            student_id: self.student_id,
            exercise_id: self.exercise_id,
            answer: self.answer,
            correct: self.correct,
            grade: self.grade,
            feedback: self.feedback,
            answered_at: DateTime::<Utc>::from_timestamp(self.answered_at, 0).unwrap_or_default(),
        }
    }
}
