use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::middlewares::RequireCourseAccess;
use crate::models::Flash;
use crate::models::exercises::requests::{CreateExerciseRequest, ExerciseForm};
use crate::services::classrooms::{classrooms_path, load_course_classroom};
use crate::services::{failure_redirect, login_redirect};
use crate::utils::view::redirect_with_flash;

use super::ExerciseService;

pub async fn save_exercise(
    service: &ExerciseService,
    request: &HttpRequest,
    classroom_id: i64,
    form: ExerciseForm,
) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;

    let classroom = match load_course_classroom(&storage, course.id, classroom_id).await {
        Ok(classroom) => classroom,
        Err(e) => {
            return Ok(failure_redirect(
                &classrooms_path(course.id),
                "Erro técnico ao salvar o exercício",
                &e,
            ));
        }
    };
    let location = format!("/cursos/{}/aulas/{}/editar", course.id, classroom.id);

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(e) => return Ok(redirect_with_flash(&location, Flash::error(e.message()))),
    };

    match storage
        .create_exercise(CreateExerciseRequest {
            classroom_id: classroom.id,
            fields,
        })
        .await
    {
        Ok(exercise) => {
            info!("Exercise {} added to classroom {}", exercise.id, classroom.id);
            Ok(redirect_with_flash(
                &location,
                Flash::success("Exercício adicionado com sucesso"),
            ))
        }
        Err(e) => Ok(failure_redirect(&location, "Erro técnico ao salvar o exercício", &e)),
    }
}
