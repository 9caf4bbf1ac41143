use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::errors::{ElearningError, Result};
use crate::middlewares::RequireCourseAccess;
use crate::models::Flash;
use crate::models::courses::entities::Course;
use crate::models::exams::entities::ExamQuestion;
use crate::models::exams::requests::{CreateExamQuestionRequest, ExamQuestionForm};
use crate::models::exams::responses::ExamQuestionsPage;
use crate::services::{failure_redirect, login_redirect};
use crate::storage::Storage;
use crate::utils::view::{redirect_with_flash, render, render_invalid};

use super::{ExamService, exams_path, load_course_exam, questions_path};

const QUESTIONS_VIEW: &str = "exames/questoes";

async fn load_page(
    storage: &Arc<dyn Storage>,
    course: Course,
    exam_id: i64,
    form: ExamQuestionForm,
    error: Option<String>,
) -> Result<ExamQuestionsPage> {
    let definition = load_course_exam(storage, course.id, exam_id).await?;
    let questions = storage.list_exam_questions(definition.id).await?;
    let total_points = questions.iter().map(|q| q.points).sum();
    Ok(ExamQuestionsPage {
        course,
        definition,
        questions,
        total_points,
        form,
        error,
    })
}

pub async fn questions_page(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let location = exams_path(course.id);

    match load_page(&storage, course, exam_id, ExamQuestionForm::default(), None).await {
        Ok(page) => Ok(render(request, QUESTIONS_VIEW, page)),
        Err(e) => Ok(failure_redirect(
            &location,
            "Erro técnico ao carregar as questões",
            &e,
        )),
    }
}

/// 新题目追加到末尾：序号为当前最大值加一
pub async fn add_question(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    form: ExamQuestionForm,
) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let course_id = course.id;

    let (fields, points) = match form.validate() {
        Ok(validated) => validated,
        Err(e) => {
            let message = e.message().to_string();
            return match load_page(&storage, course, exam_id, form, Some(message)).await {
                Ok(page) => Ok(render_invalid(request, QUESTIONS_VIEW, page)),
                Err(e) => Ok(failure_redirect(
                    &exams_path(course_id),
                    "Erro técnico ao carregar as questões",
                    &e,
                )),
            };
        }
    };

    let location = questions_path(course_id, exam_id);
    let created: Result<ExamQuestion> = async {
        load_course_exam(&storage, course_id, exam_id).await?;
        let sequence = storage.next_exam_question_sequence(exam_id).await?;
        storage
            .create_exam_question(CreateExamQuestionRequest {
                exam_definition_id: exam_id,
                fields,
                points,
                sequence,
            })
            .await
    }
    .await;

    match created {
        Ok(question) => {
            info!(
                "Question {} added to exam definition {} at position {}",
                question.id, exam_id, question.sequence
            );
            Ok(redirect_with_flash(
                &location,
                Flash::success("Questão adicionada com sucesso"),
            ))
        }
        Err(e) => Ok(failure_redirect(&location, "Erro técnico ao adicionar a questão", &e)),
    }
}

pub async fn delete_question(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    question_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let location = questions_path(course.id, exam_id);

    let deleted: Result<bool> = async {
        load_course_exam(&storage, course.id, exam_id).await?;
        storage
            .get_exam_question_by_id(question_id)
            .await?
            .filter(|question| question.exam_definition_id == exam_id)
            .ok_or_else(|| ElearningError::not_found("Questão não encontrada"))?;
        storage.delete_exam_question(question_id).await
    }
    .await;

    match deleted {
        Ok(_) => {
            info!("Question {} deleted from exam definition {}", question_id, exam_id);
            Ok(redirect_with_flash(
                &location,
                Flash::success("Questão excluída com sucesso"),
            ))
        }
        Err(e) => Ok(failure_redirect(&location, "Erro técnico ao excluir a questão", &e)),
    }
}
