/*!
 * 基于角色的访问控制中间件
 *
 * 此中间件必须在 RequireSession 之后使用。
 *
 * ```rust,ignore
 * web::resource("/cursos/novo")
 *     .wrap(RequireRole::new(UserRole::Professor).or_redirect("/cursos"))
 *     .route(web::get().to(new_course_form))
 * ```
 *
 * - 未登录：重定向到 `/login` 并提示登录
 * - 角色不符：重定向到配置的地址（默认 `/login`）并提示无权限
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::users::entities::{User, UserRole};

use super::{LOGIN_PATH, LOGIN_REQUIRED_MESSAGE, create_redirect_response};

#[derive(Clone)]
pub struct RequireRole {
    required_role: UserRole,
    denied_redirect: String,
}

impl RequireRole {
    pub fn new(role: UserRole) -> Self {
        Self {
            required_role: role,
            denied_redirect: LOGIN_PATH.to_string(),
        }
    }

    /// 角色不符时的跳转地址
    pub fn or_redirect(mut self, path: &str) -> Self {
        self.denied_redirect = path.to_string();
        self
    }

    fn denied_message(role: UserRole) -> &'static str {
        match role {
            UserRole::Professor => "Acesso restrito a professores",
            UserRole::Student => "Acesso restrito a alunos",
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            required_role: self.required_role,
            denied_redirect: self.denied_redirect.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    required_role: UserRole,
    denied_redirect: String,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let required_role = self.required_role;
        let denied_redirect = self.denied_redirect.clone();

        Box::pin(async move {
            let user_role = req.extensions().get::<User>().map(User::role);

            match user_role {
                Some(role) if role == required_role => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Some(role) => {
                    info!(
                        "Access denied to {} for role {}. Required role: {}",
                        req.path(),
                        role,
                        required_role
                    );
                    Ok(req.into_response(
                        create_redirect_response(
                            &denied_redirect,
                            RequireRole::denied_message(required_role),
                        )
                        .map_into_right_body(),
                    ))
                }
                None => {
                    info!(
                        "Role check failed: no session user on {}. Make sure RequireSession is applied first.",
                        req.path()
                    );
                    Ok(req.into_response(
                        create_redirect_response(LOGIN_PATH, LOGIN_REQUIRED_MESSAGE)
                            .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
