use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::errors::{ElearningError, Result};
use crate::middlewares::RequireCourseAccess;
use crate::models::Flash;
use crate::services::{failure_redirect, login_redirect};
use crate::storage::Storage;
use crate::utils::view::redirect_with_flash;

use super::{ExamService, exams_path, load_course_exam};

async fn change_published(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    exam_id: i64,
    published: bool,
) -> Result<()> {
    load_course_exam(storage, course_id, exam_id).await?;
    if published && storage.list_exam_questions(exam_id).await?.is_empty() {
        return Err(ElearningError::validation(
            "Adicione pelo menos uma questão antes de publicar o exame",
        ));
    }
    storage
        .set_exam_definition_published(exam_id, published)
        .await?;
    Ok(())
}

/// 发布需要至少一道题目；取消发布没有限制
pub async fn set_published(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    published: bool,
) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let location = exams_path(course.id);

    match change_published(&storage, course.id, exam_id, published).await {
        Ok(()) => {
            info!("Exam definition {} published: {}", exam_id, published);
            let message = if published {
                "Exame publicado com sucesso"
            } else {
                "Exame despublicado com sucesso"
            };
            Ok(redirect_with_flash(&location, Flash::success(message)))
        }
        Err(e) => Ok(failure_redirect(
            &location,
            "Erro técnico ao alterar a publicação do exame",
            &e,
        )),
    }
}

pub async fn delete_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let location = exams_path(course.id);

    if let Err(e) = load_course_exam(&storage, course.id, exam_id).await {
        return Ok(failure_redirect(&location, "Erro técnico ao excluir o exame", &e));
    }

    match storage.delete_exam_definition(exam_id).await {
        Ok(_) => {
            info!("Exam definition {} deleted from course {}", exam_id, course.id);
            Ok(redirect_with_flash(
                &location,
                Flash::success("Exame excluído com sucesso"),
            ))
        }
        Err(e) => Ok(failure_redirect(&location, "Erro técnico ao excluir o exame", &e)),
    }
}
