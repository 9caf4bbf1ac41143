use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireCourseAccess;
use crate::models::Flash;
use crate::models::courses::responses::CourseFormPage;
use crate::utils::view::{redirect_with_flash, render};

pub const COURSE_FORM_VIEW: &str = "cursos/form";

pub async fn new_course_form(request: &HttpRequest) -> ActixResult<HttpResponse> {
    Ok(render(request, COURSE_FORM_VIEW, CourseFormPage::default()))
}

/// 编辑表单，课程由 RequireCourseAccess::owner() 放入请求扩展
pub async fn edit_course_form(request: &HttpRequest) -> ActixResult<HttpResponse> {
    match RequireCourseAccess::extract_course(request) {
        Some(course) => Ok(render(
            request,
            COURSE_FORM_VIEW,
            CourseFormPage::from_course(&course),
        )),
        None => Ok(redirect_with_flash(
            "/cursos",
            Flash::error("Curso não encontrado"),
        )),
    }
}
