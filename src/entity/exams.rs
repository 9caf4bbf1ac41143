//! 成绩实体（课程评价与考试作答）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub kind: String,
    pub exam_definition_id: Option<i64>,
    pub grade: f64,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::exam_definitions::Entity",
        from = "Column::ExamDefinitionId",
        to = "super::exam_definitions::Column::Id"
    )]
    ExamDefinition,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::exam_definitions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamDefinition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_exam(self) -> crate::models::exams::entities::Exam {
        use crate::models::exams::entities::{Exam, ExamKind};
        use chrono::{DateTime, Utc};

        Exam {
            id: self.id,
            student_id: self.student_id,
            course_id: self.course_id,
            kind: self.kind.parse::<ExamKind>().unwrap_or(ExamKind::Attempt),
            exam_definition_id: self.exam_definition_id,
            grade: self.grade,
            comment: self.comment,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
