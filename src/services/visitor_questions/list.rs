use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::visitor_questions::requests::VisitorQuestionQuery;
use crate::models::visitor_questions::responses::VisitorQuestionsPage;
use crate::services::failure_redirect;
use crate::utils::view::render;

use super::VisitorQuestionService;

pub async fn list_questions(
    service: &VisitorQuestionService,
    request: &HttpRequest,
    query: VisitorQuestionQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_visitor_questions(false).await {
        Ok(all) => {
            let pending_count = all.iter().filter(|q| !q.answered).count();
            let questions = if query.pending {
                all.into_iter().filter(|q| !q.answered).collect()
            } else {
                all
            };
            Ok(render(
                request,
                "professor/perguntas-visitantes",
                VisitorQuestionsPage {
                    questions,
                    pending_only: query.pending,
                    pending_count,
                },
            ))
        }
        Err(e) => Ok(failure_redirect(
            "/",
            "Erro técnico ao carregar as perguntas",
            &e,
        )),
    }
}
