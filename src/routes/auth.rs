use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::{LoginForm, RegisterForm, UpdateProfileForm};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn login_page(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login_page(&req).await
}

pub async fn login(req: HttpRequest, form: web::Form<LoginForm>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(&req, form.into_inner()).await
}

pub async fn register_page(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register_page(&req).await
}

pub async fn register(
    req: HttpRequest,
    form: web::Form<RegisterForm>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(&req, form.into_inner()).await
}

pub async fn logout(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&req).await
}

pub async fn profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.profile(&req).await
}

pub async fn update_profile(
    req: HttpRequest,
    form: web::Form<UpdateProfileForm>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.update_profile(&req, form.into_inner()).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/login")
            .wrap(middlewares::RateLimit::login())
            .route(web::get().to(login_page))
            .route(web::post().to(login)),
    )
    .service(
        web::resource("/cadastro")
            .wrap(middlewares::RateLimit::register())
            .route(web::get().to(register_page))
            .route(web::post().to(register)),
    )
    .service(
        web::resource("/logout")
            .wrap(middlewares::RequireSession::required())
            .route(web::post().to(logout)),
    )
    .service(
        web::resource("/perfil")
            .wrap(middlewares::RequireSession::required())
            .route(web::get().to(profile))
            .route(web::post().to(update_profile)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::cookie::Cookie;
    use actix_web::{http::StatusCode, test};

    use crate::config::AppConfig;
    use crate::test_support::{TEST_PASSWORD, TestContext, flash_of, location_of};

    fn session_cookie_of<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<Cookie<'static>> {
        let name = &AppConfig::get().session.cookie_name;
        resp.response()
            .cookies()
            .find(|cookie| cookie.name() == name)
            .map(|cookie| Cookie::new(cookie.name().to_string(), cookie.value().to_string()))
    }

    #[actix_web::test]
    async fn test_login_with_valid_and_invalid_credentials() {
        let ctx = TestContext::new().await;
        ctx.student("aluno.login@example.com").await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .insert_header(("X-Forwarded-For", "10.1.0.1"))
            .set_form([("email", "aluno.login@example.com"), ("password", "errada123")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(session_cookie_of(&resp).is_none());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "auth/login");
        assert_eq!(body["model"]["error"], "E-mail ou senha inválidos");

        // 邮箱大小写与空白不影响登录
        let req = test::TestRequest::post()
            .uri("/login")
            .insert_header(("X-Forwarded-For", "10.1.0.1"))
            .set_form([("email", " Aluno.Login@example.com "), ("password", TEST_PASSWORD)])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&resp).as_deref(), Some("/"));
        assert!(session_cookie_of(&resp).is_some_and(|c| !c.value().is_empty()));
        assert_eq!(
            flash_of(&resp).map(|f| f.kind),
            Some(crate::models::FlashKind::Success)
        );
    }

    #[actix_web::test]
    async fn test_logout_revokes_the_session() {
        let ctx = TestContext::new().await;
        ctx.professor("prof.logout@example.com").await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/login")
            .insert_header(("X-Forwarded-For", "10.1.0.2"))
            .set_form([("email", "prof.logout@example.com"), ("password", TEST_PASSWORD)])
            .to_request();
        let resp = test::call_service(&app, req).await;
        let session = session_cookie_of(&resp).expect("session cookie");

        let req = test::TestRequest::get()
            .uri("/perfil")
            .cookie(session.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "perfil");
        assert_eq!(body["user"]["email"], "prof.logout@example.com");

        let req = test::TestRequest::post()
            .uri("/logout")
            .cookie(session.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert!(session_cookie_of(&resp).is_some_and(|c| c.value().is_empty()));

        // 旧 cookie 仍然签名有效，但会话已被撤销
        let req = test::TestRequest::get()
            .uri("/perfil")
            .cookie(session)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&resp).as_deref(), Some("/login"));
    }

    #[actix_web::test]
    async fn test_register_student_and_reject_duplicates() {
        let ctx = TestContext::new().await;
        let app = test::init_service(ctx.app()).await;

        let form = [
            ("name", "Joana Prado"),
            ("email", "Joana@Example.com"),
            ("password", "aprender2024"),
            ("password_confirmation", "aprender2024"),
            ("role", "STUDENT"),
        ];

        let req = test::TestRequest::post()
            .uri("/cadastro")
            .insert_header(("X-Forwarded-For", "10.1.0.3"))
            .set_form(form)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&resp).as_deref(), Some("/login"));

        let user = ctx
            .storage
            .get_user_by_email("joana@example.com")
            .await
            .unwrap()
            .expect("registered user");
        assert!(user.is_student());
        assert_ne!(user.password_hash, "aprender2024");

        let req = test::TestRequest::post()
            .uri("/cadastro")
            .insert_header(("X-Forwarded-For", "10.1.0.3"))
            .set_form(form)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "auth/cadastro");
        assert_eq!(body["model"]["error"], "Este e-mail já está cadastrado");

        let req = test::TestRequest::post()
            .uri("/cadastro")
            .insert_header(("X-Forwarded-For", "10.1.0.3"))
            .set_form([
                ("name", "Pedro Lima"),
                ("email", "pedro@example.com"),
                ("password", "aprender2024"),
                ("password_confirmation", "outra2024"),
                ("role", "PROFESSOR"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(
            ctx.storage
                .get_user_by_email("pedro@example.com")
                .await
                .unwrap()
                .is_none()
        );
    }
}
