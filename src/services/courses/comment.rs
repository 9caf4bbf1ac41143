use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireSession;
use crate::models::Flash;
use crate::models::comments::requests::{CommentForm, CreateCommentRequest};
use crate::services::{course_path, failure_redirect, login_redirect};
use crate::utils::view::redirect_with_flash;

use super::CourseService;

pub async fn comment(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    form: CommentForm,
) -> ActixResult<HttpResponse> {
    let Some(student) = RequireSession::extract_user(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let location = course_path(course_id);

    let content = match form.validate() {
        Ok(content) => content,
        Err(e) => return Ok(redirect_with_flash(&location, Flash::error(e.message()))),
    };

    match storage.get_course_by_id(course_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(redirect_with_flash(
                "/cursos",
                Flash::error("Curso não encontrado"),
            ));
        }
        Err(e) => return Ok(failure_redirect(&location, "Erro técnico ao publicar o comentário", &e)),
    }

    match storage
        .create_comment(CreateCommentRequest {
            course_id,
            student_id: student.id,
            content,
        })
        .await
    {
        Ok(_) => Ok(redirect_with_flash(
            &location,
            Flash::success("Comentário publicado"),
        )),
        Err(e) => Ok(failure_redirect(&location, "Erro técnico ao publicar o comentário", &e)),
    }
}
