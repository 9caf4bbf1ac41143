use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireCourseAccess;
use crate::models::classrooms::responses::ClassroomListPage;
use crate::services::{course_path, failure_redirect, login_redirect, session_and_course};
use crate::utils::view::render;

use super::ClassroomService;

pub async fn list_classrooms(
    service: &ClassroomService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some((user, course)) = session_and_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;

    match storage.list_course_classrooms(course.id).await {
        Ok(classrooms) => {
            let progress =
                RequireCourseAccess::extract_enrollment(request).map(|enrollment| enrollment.progress);
            Ok(render(
                request,
                "aulas/lista",
                ClassroomListPage {
                    is_owner: course.is_owned_by(user.id),
                    course,
                    classrooms,
                    progress,
                },
            ))
        }
        Err(e) => Ok(failure_redirect(
            &course_path(course.id),
            "Erro técnico ao carregar as aulas",
            &e,
        )),
    }
}
