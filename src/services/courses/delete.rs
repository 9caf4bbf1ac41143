use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::Flash;
use crate::services::{course_path, failure_redirect, login_redirect, session_and_course};
use crate::utils::view::redirect_with_flash;

use super::CourseService;

/// 删除课程，课堂、练习、考试等随外键级联删除
pub async fn delete_course(service: &CourseService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some((user, course)) = session_and_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;

    match storage.delete_course(course.id).await {
        Ok(true) => {
            info!("Course {} deleted by professor {}", course.id, user.id);
            Ok(redirect_with_flash(
                "/perfil",
                Flash::success("Curso excluído com sucesso"),
            ))
        }
        Ok(false) => Ok(redirect_with_flash(
            "/cursos",
            Flash::error("Curso não encontrado"),
        )),
        Err(e) => Ok(failure_redirect(
            &course_path(course.id),
            "Erro técnico ao excluir o curso",
            &e,
        )),
    }
}
