/*!
 * 会话中间件
 *
 * 从会话 cookie 中解析当前用户并写入请求扩展。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireSession;
 *
 * App::new()
 *     .wrap(RequireSession::optional()) // 公共页面：有会话则解析，没有也放行
 *     .service(
 *         web::scope("/perfil")
 *             .wrap(RequireSession::required()) // 必须登录
 *             .route("", web::get().to(profile_handler))
 *     )
 * ```
 *
 * ## 解析流程
 *
 * 1. 校验 cookie 中令牌的签名与过期时间
 * 2. 检查缓存中的 `revoked:{sid}` 撤销标记
 * 3. 先查缓存 `session:{sid}`，未命中时从存储读取用户并回填缓存
 * 4. 将 `User` 与 `SessionClaims` 放入请求扩展
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info};

use crate::cache::traits::{get_json, insert_json};
use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::users::entities::User;
use crate::utils::session::{SessionClaims, SessionUtils};

use super::{LOGIN_PATH, LOGIN_REQUIRED_MESSAGE, app_cache, app_storage, create_redirect_response};

#[derive(Clone)]
pub struct RequireSession {
    required: bool,
}

impl RequireSession {
    /// 解析会话但不强制登录
    pub fn optional() -> Self {
        Self { required: false }
    }

    /// 未登录时重定向到登录页
    pub fn required() -> Self {
        Self { required: true }
    }

    /// 从请求扩展中提取当前用户
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    /// 从请求扩展中提取会话声明
    pub fn extract_claims(req: &actix_web::HttpRequest) -> Option<SessionClaims> {
        req.extensions().get::<SessionClaims>().cloned()
    }
}

/// 撤销会话：在剩余有效期内记住 sid，并清理用户缓存
pub async fn revoke_session(cache: &dyn ObjectCache, claims: &SessionClaims) {
    let ttl = claims.remaining_secs().max(1);
    cache
        .insert_raw(
            SessionUtils::revoked_cache_key(&claims.sid),
            "1".to_string(),
            ttl,
        )
        .await;
    cache.remove(&SessionUtils::user_cache_key(&claims.sid)).await;
}

// 辅助函数：解析并验证会话
async fn resolve_session(req: &ServiceRequest) -> Result<(User, SessionClaims), String> {
    let token = SessionUtils::extract_token(req.request())
        .ok_or_else(|| "Missing session cookie".to_string())?;

    let claims = SessionUtils::verify(&token).map_err(|err| {
        info!("Session token validation failed: {}", err);
        "Invalid session token".to_string()
    })?;

    let cache = app_cache(req).ok_or_else(|| "Cache not found in app data".to_string())?;

    if let CacheResult::Found(_) = cache
        .get_raw(&SessionUtils::revoked_cache_key(&claims.sid))
        .await
    {
        return Err(format!("Session {} was revoked", claims.sid));
    }

    let user_key = SessionUtils::user_cache_key(&claims.sid);
    if let Some(user) = get_json::<User>(cache.as_ref(), &user_key).await {
        return Ok((user, claims));
    }

    let user_id = claims
        .user_id()
        .ok_or_else(|| "Invalid user ID in session".to_string())?;

    let storage = app_storage(req).ok_or_else(|| "Storage not found in app data".to_string())?;
    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| format!("Failed to retrieve user from storage: {e}"))?
        .ok_or_else(|| "User not found".to_string())?;

    // 缓存不超过会话剩余时间
    let ttl = AppConfig::get()
        .cache
        .default_ttl
        .min(claims.remaining_secs())
        .max(1);
    insert_json(cache.as_ref(), user_key, &user, ttl).await;

    Ok((user, claims))
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware {
            service: Rc::new(service),
            required: self.required,
        }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: Rc<S>,
    required: bool,
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required = self.required;

        Box::pin(async move {
            // 外层已解析过
            let already_resolved = req.extensions().contains::<User>();

            if !already_resolved {
                match resolve_session(&req).await {
                    Ok((user, claims)) => {
                        debug!("Session resolved for user ID: {}", user.id);
                        req.extensions_mut().insert(user);
                        req.extensions_mut().insert(claims);
                    }
                    Err(err) => {
                        debug!("No session for request to {}: {}", req.path(), err);
                    }
                }
            }

            if required && !req.extensions().contains::<User>() {
                info!("Login required for request to {}", req.path());
                return Ok(req.into_response(
                    create_redirect_response(LOGIN_PATH, LOGIN_REQUIRED_MESSAGE)
                        .map_into_right_body(),
                ));
            }

            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}
