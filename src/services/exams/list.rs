use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::exams::responses::ExamListPage;
use crate::services::{course_path, failure_redirect, login_redirect, session_and_course};
use crate::utils::view::render;

use super::ExamService;

pub async fn list_exams(service: &ExamService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some((user, course)) = session_and_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let is_owner = course.is_owned_by(user.id);

    match storage.list_course_exam_definitions(course.id, !is_owner).await {
        Ok(exams) => Ok(render(
            request,
            "exames/lista",
            ExamListPage {
                course,
                exams,
                is_owner,
            },
        )),
        Err(e) => Ok(failure_redirect(
            &course_path(course.id),
            "Erro técnico ao carregar os exames",
            &e,
        )),
    }
}
