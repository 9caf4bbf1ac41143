pub mod rate_limit;
pub mod require_course_access;
pub mod require_role;
pub mod require_session;

pub use rate_limit::RateLimit;
pub use require_course_access::RequireCourseAccess;
pub use require_role::RequireRole;
pub use require_session::RequireSession;

use actix_web::{HttpResponse, dev::ServiceRequest, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::Flash;
use crate::storage::Storage;
use crate::utils::view::redirect_with_flash;

pub(crate) const LOGIN_PATH: &str = "/login";
pub(crate) const LOGIN_REQUIRED_MESSAGE: &str = "Faça login para continuar";

// 辅助函数：带闪存消息的重定向响应
pub(crate) fn create_redirect_response(location: &str, message: &str) -> HttpResponse {
    redirect_with_flash(location, Flash::error(message))
}

pub(crate) fn app_storage(req: &ServiceRequest) -> Option<Arc<dyn Storage>> {
    req.app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
}

pub(crate) fn app_cache(req: &ServiceRequest) -> Option<Arc<dyn ObjectCache>> {
    req.app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}
