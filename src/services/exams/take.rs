use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{ElearningError, Result};
use crate::models::courses::entities::Course;
use crate::models::exams::entities::{ExamDefinition, ExamQuestion};
use crate::models::exams::responses::TakeExamPage;
use crate::services::{failure_redirect, login_redirect, session_and_course};
use crate::storage::Storage;
use crate::utils::view::render;

use super::{ExamService, exams_path, load_course_exam};

/// 学生可作答的考试：已发布且有题目
pub(crate) async fn load_published_exam(
    storage: &Arc<dyn Storage>,
    course: &Course,
    exam_id: i64,
) -> Result<(ExamDefinition, Vec<ExamQuestion>)> {
    let definition = load_course_exam(storage, course.id, exam_id).await?;
    if !definition.published {
        return Err(ElearningError::not_found("Exame não encontrado"));
    }
    let questions = storage.list_exam_questions(definition.id).await?;
    if questions.is_empty() {
        return Err(ElearningError::validation("Este exame ainda não possui questões"));
    }
    Ok((definition, questions))
}

pub async fn take_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let Some((_, course)) = session_and_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;

    match load_published_exam(&storage, &course, exam_id).await {
        Ok((definition, questions)) => Ok(render(
            request,
            "exames/fazer",
            TakeExamPage {
                course,
                definition,
                // 标准答案不下发给学生
                questions: questions.into_iter().map(Into::into).collect(),
            },
        )),
        Err(e) => Ok(failure_redirect(
            &exams_path(course.id),
            "Erro técnico ao carregar o exame",
            &e,
        )),
    }
}
