use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::errors::{ElearningError, Result};
use crate::models::Flash;
use crate::models::doubts::entities::Doubt;
use crate::models::doubts::requests::AnswerForm;
use crate::models::users::entities::User;
use crate::services::{course_path, failure_redirect, login_redirect, session_and_course};
use crate::storage::Storage;
use crate::utils::view::redirect_with_flash;

use super::DoubtService;

/// 疑问必须属于当前课程；状态转换由 `Doubt::answer` 负责
async fn answer_and_save(
    storage: &Arc<dyn Storage>,
    professor: &User,
    course_id: i64,
    doubt_id: i64,
    text: &str,
) -> Result<Doubt> {
    let mut doubt = storage
        .get_doubt_by_id(doubt_id)
        .await?
        .filter(|doubt| doubt.course_id == course_id)
        .ok_or_else(|| ElearningError::not_found("Dúvida não encontrada"))?;

    doubt.answer(professor, text)?;

    if !storage.save_doubt_answer(&doubt).await? {
        return Err(ElearningError::not_found("Dúvida não encontrada"));
    }
    Ok(doubt)
}

pub async fn answer_doubt(
    service: &DoubtService,
    request: &HttpRequest,
    doubt_id: i64,
    form: AnswerForm,
) -> ActixResult<HttpResponse> {
    let Some((professor, course)) = session_and_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let location = course_path(course.id);

    match answer_and_save(&storage, &professor, course.id, doubt_id, &form.answer).await {
        Ok(doubt) => {
            info!("Professor {} answered doubt {}", professor.id, doubt.id);
            Ok(redirect_with_flash(
                &location,
                Flash::success("Dúvida respondida com sucesso"),
            ))
        }
        Err(e) => Ok(failure_redirect(&location, "Erro técnico ao responder a dúvida", &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::doubts::entities::DoubtStatus;
    use crate::models::doubts::requests::CreateDoubtRequest;
    use crate::test_support::TestContext;

    #[actix_web::test]
    async fn test_second_answer_of_a_stale_copy_is_rejected() {
        let ctx = TestContext::new().await;
        let professor = ctx.professor("prof@educa.com").await;
        let student = ctx.student("aluno@educa.com").await;
        let course = ctx.course(&professor, "Rust Básico").await;

        let doubt = ctx
            .storage
            .create_doubt(CreateDoubtRequest {
                course_id: course.id,
                student_id: student.id,
                question: "O que é ownership?".to_string(),
            })
            .await
            .unwrap();

        // 两份副本都通过内存中的状态检查
        let mut first = doubt.clone();
        let mut second = doubt.clone();
        first.answer(&professor, "Cada valor tem um único dono").unwrap();
        second.answer(&professor, "Resposta atrasada").unwrap();

        assert!(ctx.storage.save_doubt_answer(&first).await.unwrap());
        let err = ctx.storage.save_doubt_answer(&second).await.unwrap_err();
        assert_eq!(err.code(), "E008");

        let stored = ctx.storage.get_doubt_by_id(doubt.id).await.unwrap().unwrap();
        assert_eq!(stored.status, DoubtStatus::Answered);
        assert_eq!(stored.answer.as_deref(), Some("Cada valor tem um único dono"));
    }

    #[actix_web::test]
    async fn test_answer_and_save_requires_doubt_of_the_course() {
        let ctx = TestContext::new().await;
        let professor = ctx.professor("prof@educa.com").await;
        let student = ctx.student("aluno@educa.com").await;
        let course = ctx.course(&professor, "Rust Básico").await;
        let other = ctx.course(&professor, "Go Básico").await;

        let doubt = ctx
            .storage
            .create_doubt(CreateDoubtRequest {
                course_id: other.id,
                student_id: student.id,
                question: "Goroutines?".to_string(),
            })
            .await
            .unwrap();

        let err = answer_and_save(&ctx.storage, &professor, course.id, doubt.id, "Sim")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
    }
}
