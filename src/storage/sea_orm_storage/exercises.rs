//! 练习与作答存储操作

use super::SeaOrmStorage;
use crate::entity::exercises::{ActiveModel, Column, Entity as Exercises};
use crate::entity::student_exercise_answers::{
    ActiveModel as AnswerActiveModel, Column as AnswerColumn, Entity as ExerciseAnswers,
};
use crate::errors::{ElearningError, Result};
use crate::models::common::question_type::encode_options;
use crate::models::exercises::{
    entities::{Exercise, StudentExerciseAnswer},
    requests::{CreateExerciseRequest, SaveExerciseAnswerRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建练习
    pub async fn create_exercise_impl(&self, req: CreateExerciseRequest) -> Result<Exercise> {
        let now = chrono::Utc::now().timestamp();
        let fields = req.fields;

        let model = ActiveModel {
            classroom_id: Set(req.classroom_id),
            statement: Set(fields.statement),
            question_type: Set(fields.question_type.to_string()),
            options: Set(encode_options(&fields.options)),
            correct_answer: Set(fields.correct_answer),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("创建练习失败: {e}")))?;

        Ok(result.into_exercise())
    }

    /// 通过 ID 获取练习
    pub async fn get_exercise_by_id_impl(&self, exercise_id: i64) -> Result<Option<Exercise>> {
        let result = Exercises::find_by_id(exercise_id)
            .one(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询练习失败: {e}")))?;

        Ok(result.map(|m| m.into_exercise()))
    }

    /// 课时下的练习
    pub async fn list_classroom_exercises_impl(&self, classroom_id: i64) -> Result<Vec<Exercise>> {
        let exercises = Exercises::find()
            .filter(Column::ClassroomId.eq(classroom_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询练习列表失败: {e}")))?;

        Ok(exercises.into_iter().map(|m| m.into_exercise()).collect())
    }

    /// 删除练习
    pub async fn delete_exercise_impl(&self, exercise_id: i64) -> Result<bool> {
        let result = Exercises::delete_by_id(exercise_id)
            .exec(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("删除练习失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 保存作答：已有记录则覆盖
    pub async fn save_exercise_answer_impl(
        &self,
        req: SaveExerciseAnswerRequest,
    ) -> Result<StudentExerciseAnswer> {
        let now = chrono::Utc::now().timestamp();

        let existing = ExerciseAnswers::find()
            .filter(
                Condition::all()
                    .add(AnswerColumn::StudentId.eq(req.student_id))
                    .add(AnswerColumn::ExerciseId.eq(req.exercise_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询作答记录失败: {e}")))?;

        let mut model = AnswerActiveModel {
            student_id: Set(req.student_id),
            exercise_id: Set(req.exercise_id),
            answer: Set(req.answer),
            correct: Set(req.correct),
            grade: Set(req.grade),
            feedback: Set(req.feedback),
            answered_at: Set(now),
            ..Default::default()
        };

        let result = match existing {
            Some(existing) => {
                model.id = Set(existing.id);
                model.update(&self.db).await
            }
            None => model.insert(&self.db).await,
        }
        .map_err(|e| ElearningError::database_operation(format!("保存作答失败: {e}")))?;

        Ok(result.into_answer())
    }

    /// 学生在某一课时下的作答
    pub async fn list_student_exercise_answers_impl(
        &self,
        student_id: i64,
        classroom_id: i64,
    ) -> Result<Vec<StudentExerciseAnswer>> {
        let exercise_ids: Vec<i64> = self
            .list_classroom_exercises_impl(classroom_id)
            .await?
            .into_iter()
            .map(|e| e.id)
            .collect();

        if exercise_ids.is_empty() {
            return Ok(vec![]);
        }

        let answers = ExerciseAnswers::find()
            .filter(
                Condition::all()
                    .add(AnswerColumn::StudentId.eq(student_id))
                    .add(AnswerColumn::ExerciseId.is_in(exercise_ids)),
            )
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询作答记录失败: {e}")))?;

        Ok(answers.into_iter().map(|m| m.into_answer()).collect())
    }
}
