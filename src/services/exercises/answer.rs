use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::debug;

use crate::errors::Result;
use crate::models::Flash;
use crate::models::exercises::entities::StudentExerciseAnswer;
use crate::models::exercises::requests::{AnswerExerciseForm, SaveExerciseAnswerRequest};
use crate::services::classrooms::{classroom_path, load_course_classroom};
use crate::services::{failure_redirect, login_redirect, session_and_course};
use crate::storage::Storage;
use crate::utils::view::redirect_with_flash;

use super::{ExerciseService, load_classroom_exercise};

async fn grade_and_save(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    course_id: i64,
    classroom_id: i64,
    exercise_id: i64,
    answer: &str,
) -> Result<StudentExerciseAnswer> {
    load_course_classroom(storage, course_id, classroom_id).await?;
    let exercise = load_classroom_exercise(storage, classroom_id, exercise_id).await?;
    let request =
        SaveExerciseAnswerRequest::grade(student_id, exercise.id, answer, &exercise.correct_answer)?;
    storage.save_exercise_answer(request).await
}

pub async fn answer_exercise(
    service: &ExerciseService,
    request: &HttpRequest,
    classroom_id: i64,
    exercise_id: i64,
    form: AnswerExerciseForm,
) -> ActixResult<HttpResponse> {
    let Some((student, course)) = session_and_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let location = classroom_path(course.id, classroom_id);

    match grade_and_save(
        &storage,
        student.id,
        course.id,
        classroom_id,
        exercise_id,
        &form.answer,
    )
    .await
    {
        Ok(saved) => {
            debug!(
                "Student {} answered exercise {} (correct: {})",
                student.id, exercise_id, saved.correct
            );
            let flash = if saved.correct {
                Flash::success(saved.feedback.unwrap_or_default())
            } else {
                Flash::info(saved.feedback.unwrap_or_default())
            };
            Ok(redirect_with_flash(&location, flash))
        }
        Err(e) => Ok(failure_redirect(&location, "Erro técnico ao enviar a resposta", &e)),
    }
}
