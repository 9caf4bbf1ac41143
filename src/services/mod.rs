pub mod auth;
pub mod classrooms;
pub mod courses;
pub mod doubts;
pub mod exams;
pub mod exercises;
pub mod newsletter;
pub mod visitor_questions;

pub use auth::AuthService;
pub use classrooms::ClassroomService;
pub use courses::CourseService;
pub use doubts::DoubtService;
pub use exams::ExamService;
pub use exercises::ExerciseService;
pub use newsletter::NewsletterService;
pub use visitor_questions::VisitorQuestionService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, error::ErrorInternalServerError};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::ElearningError;
use crate::models::Flash;
use crate::models::courses::entities::Course;
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::view::redirect_with_flash;

pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| ErrorInternalServerError("Storage not found in app data"))
}

pub(crate) fn cache_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| ErrorInternalServerError("Cache not found in app data"))
}

/// 业务失败后的重定向：技术错误记录日志并只展示通用提示
pub(crate) fn failure_redirect(
    location: &str,
    technical_message: &str,
    err: &ElearningError,
) -> HttpResponse {
    if err.is_technical() {
        tracing::error!("{}: {}", technical_message, err);
    }
    redirect_with_flash(location, Flash::error(err.user_message(technical_message)))
}

/// 中间件已放入请求扩展的用户与课程
pub(crate) fn session_and_course(request: &HttpRequest) -> Option<(User, Course)> {
    use actix_web::HttpMessage;
    let extensions = request.extensions();
    Some((extensions.get::<User>()?.clone(), extensions.get::<Course>()?.clone()))
}

pub(crate) fn login_redirect() -> HttpResponse {
    redirect_with_flash("/login", Flash::error("Faça login para continuar"))
}

pub(crate) fn course_path(course_id: i64) -> String {
    format!("/cursos/{course_id}")
}
