use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RateLimit, RequireRole};
use crate::models::doubts::requests::AnswerForm;
use crate::models::users::entities::UserRole;
use crate::models::visitor_questions::requests::{ContactForm, VisitorQuestionQuery};
use crate::services::VisitorQuestionService;
use crate::utils::SafeIDI64;

static VISITOR_QUESTION_SERVICE: Lazy<VisitorQuestionService> =
    Lazy::new(VisitorQuestionService::new_lazy);

pub async fn contact_page(req: HttpRequest) -> ActixResult<HttpResponse> {
    VISITOR_QUESTION_SERVICE.contact_page(&req).await
}

pub async fn send_question(
    req: HttpRequest,
    form: web::Form<ContactForm>,
) -> ActixResult<HttpResponse> {
    VISITOR_QUESTION_SERVICE
        .send_question(&req, form.into_inner())
        .await
}

pub async fn list_questions(
    req: HttpRequest,
    query: web::Query<VisitorQuestionQuery>,
) -> ActixResult<HttpResponse> {
    VISITOR_QUESTION_SERVICE
        .list_questions(&req, query.into_inner())
        .await
}

pub async fn answer_question(
    req: HttpRequest,
    question_id: SafeIDI64,
    form: web::Form<AnswerForm>,
) -> ActixResult<HttpResponse> {
    VISITOR_QUESTION_SERVICE
        .answer_question(&req, question_id.0, form.into_inner())
        .await
}

// 配置路由
pub fn configure_visitor_question_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/contato", web::get().to(contact_page))
        .service(
            web::resource("/enviar")
                .wrap(RateLimit::contact())
                .route(web::post().to(send_question)),
        )
        .service(
            web::scope("/professor/perguntas-visitantes")
                .wrap(RequireRole::new(UserRole::Professor))
                .route("", web::get().to(list_questions))
                .route("/{id}/responder", web::post().to(answer_question)),
        );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};

    use crate::models::FlashKind;
    use crate::test_support::{TestContext, flash_of, location_of, session_cookie};

    #[actix_web::test]
    async fn test_visitor_question_is_answered_by_professor() {
        let ctx = TestContext::new().await;
        let professor = ctx.professor("prof.contato@example.com").await;
        let student = ctx.student("aluno.contato@example.com").await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/enviar")
            .insert_header(("X-Forwarded-For", "10.2.0.1"))
            .set_form([
                ("name", "Carlos Souza"),
                ("email", "carlos@example.com"),
                ("message", "Vocês emitem certificado?"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&resp).as_deref(), Some("/contato"));

        let pending = ctx.storage.list_visitor_questions(true).await.unwrap();
        assert_eq!(pending.len(), 1);
        let question_id = pending[0].id;

        // 学生无权查看
        let req = test::TestRequest::get()
            .uri("/professor/perguntas-visitantes")
            .cookie(session_cookie(&student))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let req = test::TestRequest::get()
            .uri("/professor/perguntas-visitantes")
            .cookie(session_cookie(&professor))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "professor/perguntas-visitantes");
        assert_eq!(body["model"]["pending_count"], 1);

        let req = test::TestRequest::post()
            .uri(&format!("/professor/perguntas-visitantes/{question_id}/responder"))
            .cookie(session_cookie(&professor))
            .set_form([("answer", "Sim, ao concluir o curso")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(flash_of(&resp).map(|f| f.kind), Some(FlashKind::Success));

        assert!(ctx.storage.list_visitor_questions(true).await.unwrap().is_empty());
        let all = ctx.storage.list_visitor_questions(false).await.unwrap();
        assert!(all[0].answered);
        assert_eq!(all[0].answer.as_deref(), Some("Sim, ao concluir o curso"));
        assert!(all[0].answered_at.is_some());
    }

    #[actix_web::test]
    async fn test_invalid_contact_form_is_rerendered() {
        let ctx = TestContext::new().await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/enviar")
            .insert_header(("X-Forwarded-For", "10.2.0.2"))
            .set_form([("name", "Carlos"), ("email", "carlos@example.com"), ("message", " ")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "contato");
        assert_eq!(body["model"]["form"]["name"], "Carlos");
        assert!(ctx.storage.list_visitor_questions(false).await.unwrap().is_empty());
    }
}
