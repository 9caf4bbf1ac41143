use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use crate::config::AppConfig;
use crate::models::courses::responses::HomePage;
use crate::utils::view::render;

use super::CourseService;

const LATEST_COURSES: u64 = 6;

pub async fn home_page(service: &CourseService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 首页不因课程加载失败而不可用
    let latest_courses = storage
        .list_latest_courses(LATEST_COURSES)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to load latest courses: {}", e);
            Vec::new()
        });

    Ok(render(
        request,
        "index",
        HomePage {
            system_name: AppConfig::get().app.system_name.clone(),
            latest_courses,
        },
    ))
}
