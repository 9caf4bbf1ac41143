use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::Flash;
use crate::models::doubts::requests::AnswerForm;
use crate::services::failure_redirect;
use crate::utils::view::redirect_with_flash;

use super::{VISITOR_QUESTIONS_PATH, VisitorQuestionService};

pub async fn answer_question(
    service: &VisitorQuestionService,
    request: &HttpRequest,
    question_id: i64,
    form: AnswerForm,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let answer = form.answer.trim();
    if answer.is_empty() {
        return Ok(redirect_with_flash(
            VISITOR_QUESTIONS_PATH,
            Flash::error("A resposta não pode ser vazia"),
        ));
    }

    match storage.answer_visitor_question(question_id, answer).await {
        Ok(Some(question)) => {
            info!("Visitor question {} answered", question.id);
            Ok(redirect_with_flash(
                VISITOR_QUESTIONS_PATH,
                Flash::success("Resposta registrada"),
            ))
        }
        Ok(None) => Ok(redirect_with_flash(
            VISITOR_QUESTIONS_PATH,
            Flash::error("Pergunta não encontrada"),
        )),
        Err(e) => Ok(failure_redirect(
            VISITOR_QUESTIONS_PATH,
            "Erro técnico ao registrar a resposta",
            &e,
        )),
    }
}
