use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::middlewares::RequireSession;
use crate::middlewares::require_session::revoke_session;
use crate::models::Flash;
use crate::utils::session::SessionUtils;
use crate::utils::view::flash_cookie;

use super::AuthService;

/// 处理用户登出
/// 撤销服务端会话并清除会话 cookie
pub async fn handle_logout(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    if let Some(claims) = RequireSession::extract_claims(request) {
        let cache = service.get_cache(request)?;
        revoke_session(cache.as_ref(), &claims).await;
        info!("Session {} of user {} revoked", claims.sid, claims.sub);
    }

    Ok(HttpResponse::SeeOther()
        .insert_header((actix_web::http::header::LOCATION, "/"))
        .cookie(SessionUtils::empty_session_cookie())
        .cookie(flash_cookie(&Flash::info("Você saiu da sua conta")))
        .finish())
}
