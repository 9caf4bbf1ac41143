/*!
 * 课程级访问控制中间件
 *
 * 必须在 RequireSession 之后使用，作用于路径中含 `{id}` 的课程路由。
 *
 * ```rust,ignore
 * web::scope("/cursos/{id}/aulas")
 *     .wrap(RequireCourseAccess::owner_or_enrolled())
 *     .route("", web::get().to(list_classrooms))
 * ```
 *
 * 通过后把 `Course`（以及学生的 `Enrollment`）放入请求扩展，
 * 处理函数可以直接取用而不必再次查询。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{error, info};

use crate::models::courses::entities::Course;
use crate::models::enrollments::entities::Enrollment;
use crate::models::users::entities::User;

use super::{LOGIN_PATH, LOGIN_REQUIRED_MESSAGE, app_storage, create_redirect_response};

const COURSES_PATH: &str = "/cursos";
const DENIED_MESSAGE: &str = "Você não tem permissão para acessar este recurso";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CourseAccess {
    Owner,
    Enrolled,
    OwnerOrEnrolled,
}

#[derive(Clone)]
pub struct RequireCourseAccess {
    access: CourseAccess,
}

impl RequireCourseAccess {
    /// 课程的授课教授
    pub fn owner() -> Self {
        Self {
            access: CourseAccess::Owner,
        }
    }

    /// 已选课的学生
    pub fn enrolled() -> Self {
        Self {
            access: CourseAccess::Enrolled,
        }
    }

    pub fn owner_or_enrolled() -> Self {
        Self {
            access: CourseAccess::OwnerOrEnrolled,
        }
    }

    /// 从请求扩展中提取已校验的课程
    pub fn extract_course(req: &actix_web::HttpRequest) -> Option<Course> {
        req.extensions().get::<Course>().cloned()
    }

    pub fn extract_enrollment(req: &actix_web::HttpRequest) -> Option<Enrollment> {
        req.extensions().get::<Enrollment>().cloned()
    }
}

enum AccessOutcome {
    Granted(Course, Option<Enrollment>),
    Denied(String, &'static str),
}

async fn check_access(req: &ServiceRequest, user: &User, access: CourseAccess) -> AccessOutcome {
    let Some(course_id) = req
        .match_info()
        .get("id")
        .and_then(|raw| raw.parse::<i64>().ok())
    else {
        return AccessOutcome::Denied(COURSES_PATH.to_string(), "Curso não encontrado");
    };

    let Some(storage) = app_storage(req) else {
        error!("Storage not found in app data");
        return AccessOutcome::Denied(COURSES_PATH.to_string(), "Erro técnico ao carregar o curso");
    };

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return AccessOutcome::Denied(COURSES_PATH.to_string(), "Curso não encontrado");
        }
        Err(e) => {
            error!("Failed to load course {}: {}", course_id, e);
            return AccessOutcome::Denied(
                COURSES_PATH.to_string(),
                "Erro técnico ao carregar o curso",
            );
        }
    };

    let course_page = format!("{COURSES_PATH}/{course_id}");
    let is_owner = user.is_professor() && course.is_owned_by(user.id);

    if is_owner && access != CourseAccess::Enrolled {
        return AccessOutcome::Granted(course, None);
    }
    if access == CourseAccess::Owner || !user.is_student() {
        return AccessOutcome::Denied(course_page, DENIED_MESSAGE);
    }

    match storage.get_enrollment(user.id, course_id).await {
        Ok(Some(enrollment)) => AccessOutcome::Granted(course, Some(enrollment)),
        Ok(None) => AccessOutcome::Denied(
            course_page,
            "Você precisa estar matriculado neste curso",
        ),
        Err(e) => {
            error!(
                "Failed to load enrollment of student {} in course {}: {}",
                user.id, course_id, e
            );
            AccessOutcome::Denied(course_page, "Erro técnico ao verificar a matrícula")
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireCourseAccess
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireCourseAccessMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireCourseAccessMiddleware {
            service: Rc::new(service),
            access: self.access,
        }))
    }
}

pub struct RequireCourseAccessMiddleware<S> {
    service: Rc<S>,
    access: CourseAccess,
}

impl<S, B> Service<ServiceRequest> for RequireCourseAccessMiddleware<S>
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
        let access = self.access;

        Box::pin(async move {
            // 1. 必须已登录
            let Some(user) = req.extensions().get::<User>().cloned() else {
                return Ok(req.into_response(
                    create_redirect_response(LOGIN_PATH, LOGIN_REQUIRED_MESSAGE)
                        .map_into_right_body(),
                ));
            };

            // 2. 校验课程归属或选课关系
            match check_access(&req, &user, access).await {
                AccessOutcome::Granted(course, enrollment) => {
                    req.extensions_mut().insert(course);
                    if let Some(enrollment) = enrollment {
                        req.extensions_mut().insert(enrollment);
                    }
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                AccessOutcome::Denied(location, message) => {
                    info!(
                        "Course access ({:?}) denied for user {} on {}",
                        access,
                        user.id,
                        req.path()
                    );
                    Ok(req.into_response(
                        create_redirect_response(&location, message).map_into_right_body(),
                    ))
                }
            }
        })
    }
}
