use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::middlewares::RequireCourseAccess;
use crate::models::Flash;
use crate::services::classrooms::{classrooms_path, load_course_classroom};
use crate::services::{failure_redirect, login_redirect};
use crate::utils::view::redirect_with_flash;

use super::{ExerciseService, load_classroom_exercise};

pub async fn delete_exercise(
    service: &ExerciseService,
    request: &HttpRequest,
    classroom_id: i64,
    exercise_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;

    if let Err(e) = load_course_classroom(&storage, course.id, classroom_id).await {
        return Ok(failure_redirect(
            &classrooms_path(course.id),
            "Erro técnico ao excluir o exercício",
            &e,
        ));
    }
    let location = format!("/cursos/{}/aulas/{}/editar", course.id, classroom_id);

    if let Err(e) = load_classroom_exercise(&storage, classroom_id, exercise_id).await {
        return Ok(failure_redirect(&location, "Erro técnico ao excluir o exercício", &e));
    }

    match storage.delete_exercise(exercise_id).await {
        Ok(_) => {
            info!("Exercise {} deleted from classroom {}", exercise_id, classroom_id);
            Ok(redirect_with_flash(
                &location,
                Flash::success("Exercício excluído com sucesso"),
            ))
        }
        Err(e) => Ok(failure_redirect(&location, "Erro técnico ao excluir o exercício", &e)),
    }
}
