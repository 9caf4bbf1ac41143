use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::Flash;
use crate::models::doubts::requests::{CreateDoubtRequest, DoubtForm};
use crate::services::{course_path, failure_redirect, login_redirect, session_and_course};
use crate::utils::view::redirect_with_flash;

use super::DoubtService;

pub async fn create_doubt(
    service: &DoubtService,
    request: &HttpRequest,
    form: DoubtForm,
) -> ActixResult<HttpResponse> {
    let Some((student, course)) = session_and_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let location = course_path(course.id);

    let question = match form.validate() {
        Ok(question) => question,
        Err(e) => return Ok(redirect_with_flash(&location, Flash::error(e.message()))),
    };

    match storage
        .create_doubt(CreateDoubtRequest {
            course_id: course.id,
            student_id: student.id,
            question,
        })
        .await
    {
        Ok(doubt) => {
            info!(
                "Student {} opened doubt {} in course {}",
                student.id, doubt.id, course.id
            );
            Ok(redirect_with_flash(
                &location,
                Flash::success("Dúvida enviada ao professor"),
            ))
        }
        Err(e) => Ok(failure_redirect(&location, "Erro técnico ao enviar a dúvida", &e)),
    }
}
