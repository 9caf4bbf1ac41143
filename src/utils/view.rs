//! 页面渲染与重定向
//!
//! 浏览器请求（Accept 含 text/html）得到嵌入的前端外壳，其余请求得到
//! `ViewResponse` JSON；外壳会以 JSON 方式重新请求同一地址完成渲染。

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::{StatusCode, header};
use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use base64::prelude::*;
use serde::Serialize;
use ts_rs::TS;

use crate::models::users::entities::User;
use crate::models::{Flash, ViewResponse};

pub const FLASH_COOKIE: &str = "flash";

/// 浏览器导航请求
pub fn wants_html(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// 当前登录用户（由 RequireSession 写入请求扩展）
pub fn current_user(req: &HttpRequest) -> Option<User> {
    req.extensions().get::<User>().cloned()
}

/// 闪存消息以 base64url 编码的 JSON 保存，cookie 值中不能出现引号、空格与非 ASCII 字符
pub fn encode_flash(flash: &Flash) -> String {
    let json = serde_json::to_string(flash).unwrap_or_default();
    BASE64_URL_SAFE_NO_PAD.encode(json)
}

pub fn decode_flash(value: &str) -> Option<Flash> {
    let json = BASE64_URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&json).ok()
}

pub fn read_flash(req: &HttpRequest) -> Option<Flash> {
    req.cookie(FLASH_COOKIE)
        .and_then(|cookie| decode_flash(cookie.value()))
}

pub fn flash_cookie(flash: &Flash) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, encode_flash(flash))
        .path("/")
        .same_site(SameSite::Lax)
        .http_only(true)
        .finish()
}

pub fn clear_flash_cookie() -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, "")
        .path("/")
        .max_age(actix_web::cookie::time::Duration::seconds(0))
        .same_site(SameSite::Lax)
        .http_only(true)
        .finish()
}

pub fn render<T: Serialize + TS>(req: &HttpRequest, view: &str, model: T) -> HttpResponse {
    render_with_status(req, StatusCode::OK, view, model)
}

/// 校验失败时重新渲染表单
pub fn render_invalid<T: Serialize + TS>(req: &HttpRequest, view: &str, model: T) -> HttpResponse {
    render_with_status(req, StatusCode::BAD_REQUEST, view, model)
}

pub fn render_with_status<T: Serialize + TS>(
    req: &HttpRequest,
    status: StatusCode,
    view: &str,
    model: T,
) -> HttpResponse {
    // 外壳随后会以 JSON 请求同一地址，闪存消息留到那次读取
    if wants_html(req) {
        return crate::routes::frontend::index_response(status);
    }

    let flash = read_flash(req);
    let mut builder = HttpResponse::build(status);
    if flash.is_some() {
        builder.cookie(clear_flash_cookie());
    }

    builder.json(
        ViewResponse::new(view, model)
            .with_flash(flash)
            .with_user(current_user(req)),
    )
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

pub fn redirect_with_flash(location: &str, flash: Flash) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .cookie(flash_cookie(&flash))
        .finish()
}

/// 只接受站内相对路径，其余回退到首页
pub fn safe_location(candidate: Option<&str>) -> String {
    match candidate.map(str::trim) {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => "/".to_string(),
    }
}

/// 从 Referer 中取回站内路径
pub fn back_location(req: &HttpRequest) -> String {
    let referer = req
        .headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok());

    let path = referer.map(|referer| match referer.find("://") {
        Some(scheme_end) => {
            let rest = &referer[scheme_end + 3..];
            rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
        }
        None => referer,
    });
    safe_location(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_redirect_with_flash_sets_cookie() {
        let resp = redirect_with_flash("/login", Flash::error("Faça login para continuar"));
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/login");

        let cookie = resp
            .cookies()
            .find(|c| c.name() == FLASH_COOKIE)
            .expect("flash cookie");
        assert!(
            cookie
                .value()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(
            decode_flash(cookie.value()),
            Some(Flash::error("Faça login para continuar"))
        );

        // 原始 Set-Cookie 头可以被重新解析
        let header = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        let parsed = Cookie::parse(header.to_string()).unwrap();
        assert_eq!(
            decode_flash(parsed.value()),
            Some(Flash::error("Faça login para continuar"))
        );
    }

    #[test]
    fn test_read_flash_from_request() {
        let flash = Flash::error("Você precisa estar matriculado, \"aluno\"; tente de novo");
        let req = TestRequest::default()
            .cookie(flash_cookie(&flash))
            .to_http_request();
        assert_eq!(read_flash(&req), Some(flash));

        let garbage = TestRequest::default()
            .cookie(Cookie::new(FLASH_COOKIE, "{oops"))
            .to_http_request();
        assert_eq!(read_flash(&garbage), None);
    }

    #[test]
    fn test_wants_html() {
        let browser = TestRequest::default()
            .insert_header((header::ACCEPT, "text/html,application/xhtml+xml"))
            .to_http_request();
        assert!(wants_html(&browser));
        assert!(!wants_html(&TestRequest::default().to_http_request()));
    }

    #[test]
    fn test_safe_location() {
        assert_eq!(safe_location(Some("/cursos/3")), "/cursos/3");
        assert_eq!(safe_location(Some("//evil.example")), "/");
        assert_eq!(safe_location(Some("https://evil.example")), "/");
        assert_eq!(safe_location(None), "/");

        let req = TestRequest::default()
            .insert_header((header::REFERER, "http://localhost:8080/cursos?page=2"))
            .to_http_request();
        assert_eq!(back_location(&req), "/cursos?page=2");
    }
}
