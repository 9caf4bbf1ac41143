use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::middlewares::RequireSession;
use crate::models::Flash;
use crate::services::{course_path, failure_redirect, login_redirect};
use crate::utils::view::redirect_with_flash;

use super::CourseService;

pub async fn enroll(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(student) = RequireSession::extract_user(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let location = course_path(course_id);

    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(redirect_with_flash(
                "/cursos",
                Flash::error("Curso não encontrado"),
            ));
        }
        Err(e) => return Ok(failure_redirect(&location, "Erro técnico ao realizar a matrícula", &e)),
    }

    match storage.get_enrollment(student.id, course_id).await {
        Ok(Some(_)) => {
            return Ok(redirect_with_flash(
                &location,
                Flash::info("Você já está matriculado neste curso"),
            ));
        }
        Ok(None) => {}
        Err(e) => return Ok(failure_redirect(&location, "Erro técnico ao realizar a matrícula", &e)),
    }

    match storage.enroll_student(student.id, course_id).await {
        Ok(enrollment) => {
            info!(
                "Student {} enrolled in course {} (enrollment {})",
                student.id, course_id, enrollment.id
            );
            Ok(redirect_with_flash(
                &location,
                Flash::success("Matrícula realizada com sucesso"),
            ))
        }
        Err(e) => Ok(failure_redirect(&location, "Erro técnico ao realizar a matrícula", &e)),
    }
}
