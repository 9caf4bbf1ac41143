use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::middlewares::RequireCourseAccess;
use crate::models::Flash;
use crate::models::classrooms::requests::DeleteClassroomForm;
use crate::services::{failure_redirect, login_redirect};
use crate::utils::view::redirect_with_flash;

use super::{ClassroomService, classrooms_path, load_course_classroom};

pub async fn delete_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    form: DeleteClassroomForm,
) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let location = classrooms_path(course.id);

    let classroom_id = match form.classroom_id() {
        Ok(id) => id,
        Err(e) => return Ok(redirect_with_flash(&location, Flash::error(e.message()))),
    };

    if let Err(e) = load_course_classroom(&storage, course.id, classroom_id).await {
        return Ok(failure_redirect(&location, "Erro técnico ao excluir a aula", &e));
    }

    match storage.delete_classroom(classroom_id).await {
        Ok(_) => {
            info!("Classroom {} deleted from course {}", classroom_id, course.id);
            Ok(redirect_with_flash(
                &location,
                Flash::success("Aula excluída com sucesso"),
            ))
        }
        Err(e) => Ok(failure_redirect(&location, "Erro técnico ao excluir a aula", &e)),
    }
}
