use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use crate::models::Flash;
use crate::models::courses::{
    requests::{CourseListQuery, CourseQueryParams},
    responses::CatalogPage,
};
use crate::utils::view::{redirect_with_flash, render};

use super::CourseService;

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let list_query = CourseListQuery::from(&query);

    let courses = match storage.list_courses_with_pagination(list_query.clone()).await {
        Ok(courses) => courses,
        Err(e) => {
            error!("Failed to list courses: {}", e);
            return Ok(redirect_with_flash(
                "/",
                Flash::error("Erro técnico ao carregar os cursos"),
            ));
        }
    };

    let categories = storage.list_course_categories().await.unwrap_or_else(|e| {
        error!("Failed to list course categories: {}", e);
        Vec::new()
    });

    Ok(render(
        request,
        "cursos/lista",
        CatalogPage {
            courses,
            categories,
            search: list_query.search,
            category: list_query.category,
        },
    ))
}
