use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::newsletter::requests::NewsletterForm;
use crate::services::NewsletterService;

static NEWSLETTER_SERVICE: Lazy<NewsletterService> = Lazy::new(NewsletterService::new_lazy);

pub async fn subscribe(
    req: HttpRequest,
    form: web::Form<NewsletterForm>,
) -> ActixResult<HttpResponse> {
    NEWSLETTER_SERVICE.subscribe(&req, form.into_inner()).await
}

pub async fn unsubscribe(
    req: HttpRequest,
    form: web::Form<NewsletterForm>,
) -> ActixResult<HttpResponse> {
    NEWSLETTER_SERVICE.unsubscribe(&req, form.into_inner()).await
}

pub fn configure_newsletter_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/newsletter")
            .route("/inscrever", web::post().to(subscribe))
            .route("/cancelar", web::post().to(unsubscribe)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};

    use crate::models::FlashKind;
    use crate::test_support::{TestContext, flash_of, location_of};

    #[actix_web::test]
    async fn test_subscribe_resubscribe_and_unsubscribe() {
        let ctx = TestContext::new().await;
        let app = test::init_service(ctx.app()).await;

        let post = |uri: &'static str, email: &'static str| {
            test::TestRequest::post()
                .uri(uri)
                .set_form([("email", email), ("name", "Ana"), ("redirect_to", "/cursos")])
                .to_request()
        };

        let resp = test::call_service(&app, post("/newsletter/inscrever", "Ana@Example.com")).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&resp).as_deref(), Some("/cursos"));
        assert_eq!(flash_of(&resp).map(|f| f.kind), Some(FlashKind::Success));

        // 重复订阅不会产生第二条记录
        let resp = test::call_service(&app, post("/newsletter/inscrever", "ana@example.com")).await;
        assert_eq!(flash_of(&resp).map(|f| f.kind), Some(FlashKind::Success));

        let resp = test::call_service(&app, post("/newsletter/cancelar", "ana@example.com")).await;
        assert_eq!(
            flash_of(&resp).map(|f| f.message),
            Some("Inscrição cancelada".to_string())
        );

        let resp = test::call_service(&app, post("/newsletter/cancelar", "ana@example.com")).await;
        assert_eq!(flash_of(&resp).map(|f| f.kind), Some(FlashKind::Info));

        // 再次订阅会重新激活原记录
        let first = ctx
            .storage
            .subscribe_newsletter("ana@example.com", None)
            .await
            .unwrap();
        assert!(first.active);
        assert_eq!(first.name.as_deref(), Some("Ana"));
        assert!(ctx.storage.unsubscribe_newsletter("ana@example.com").await.unwrap());
        let again = ctx
            .storage
            .subscribe_newsletter("ana@example.com", None)
            .await
            .unwrap();
        assert_eq!(again.id, first.id);
    }

    #[actix_web::test]
    async fn test_invalid_email_and_external_redirect_are_rejected() {
        let ctx = TestContext::new().await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/newsletter/inscrever")
            .set_form([("email", "sem-arroba"), ("redirect_to", "https://evil.example")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&resp).as_deref(), Some("/"));
        assert_eq!(flash_of(&resp).map(|f| f.kind), Some(FlashKind::Error));
        assert!(!ctx.storage.unsubscribe_newsletter("sem-arroba").await.unwrap());
    }
}
