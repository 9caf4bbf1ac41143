pub mod answer;
pub mod delete;
pub mod save;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{ElearningError, Result};
use crate::models::exercises::entities::Exercise;
use crate::models::exercises::requests::{AnswerExerciseForm, ExerciseForm};
use crate::storage::Storage;

pub struct ExerciseService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExerciseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn save_exercise(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        form: ExerciseForm,
    ) -> ActixResult<HttpResponse> {
        save::save_exercise(self, request, classroom_id, form).await
    }

    pub async fn delete_exercise(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        exercise_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_exercise(self, request, classroom_id, exercise_id).await
    }

    // 学生作答，重复作答覆盖上一次
    pub async fn answer_exercise(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
        exercise_id: i64,
        form: AnswerExerciseForm,
    ) -> ActixResult<HttpResponse> {
        answer::answer_exercise(self, request, classroom_id, exercise_id, form).await
    }
}

/// 读取练习并确认它属于给定课时
pub(crate) async fn load_classroom_exercise(
    storage: &Arc<dyn Storage>,
    classroom_id: i64,
    exercise_id: i64,
) -> Result<Exercise> {
    storage
        .get_exercise_by_id(exercise_id)
        .await?
        .filter(|exercise| exercise.classroom_id == classroom_id)
        .ok_or_else(|| ElearningError::not_found("Exercício não encontrado"))
}
