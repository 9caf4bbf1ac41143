use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::middlewares::RequireSession;
use crate::models::Flash;
use crate::models::courses::{
    requests::{CourseForm, CreateCourseRequest},
    responses::CourseFormPage,
};
use crate::services::{course_path, failure_redirect, login_redirect};
use crate::utils::view::{redirect_with_flash, render_invalid};

use super::CourseService;
use super::form::COURSE_FORM_VIEW;

fn invalid_form(request: &HttpRequest, form: CourseForm, message: &str) -> HttpResponse {
    render_invalid(
        request,
        COURSE_FORM_VIEW,
        CourseFormPage {
            form,
            error: Some(message.to_string()),
        },
    )
}

/// 表单中带 id 时更新（仅限授课教授），否则新建
pub async fn save_course(
    service: &CourseService,
    request: &HttpRequest,
    form: CourseForm,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireSession::extract_user(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;

    let course_id = match form.course_id() {
        Ok(id) => id,
        Err(e) => return Ok(invalid_form(request, form, e.message())),
    };

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(e) => return Ok(invalid_form(request, form, e.message())),
    };

    let saved = match course_id {
        Some(id) => {
            match storage.get_course_by_id(id).await {
                Ok(Some(course)) if course.is_owned_by(user.id) => {}
                Ok(Some(_)) => {
                    return Ok(redirect_with_flash(
                        &course_path(id),
                        Flash::error("Você não tem permissão para editar este curso"),
                    ));
                }
                Ok(None) => {
                    return Ok(redirect_with_flash(
                        "/cursos",
                        Flash::error("Curso não encontrado"),
                    ));
                }
                Err(e) => {
                    return Ok(failure_redirect("/cursos", "Erro técnico ao salvar o curso", &e));
                }
            }
            storage.update_course(id, fields).await.map(|course| course.map(|c| c.id))
        }
        None => storage
            .create_course(CreateCourseRequest {
                professor_id: user.id,
                fields,
            })
            .await
            .map(|course| Some(course.id)),
    };

    match saved {
        Ok(Some(id)) => {
            info!("Course {} saved by professor {}", id, user.id);
            Ok(redirect_with_flash(
                &course_path(id),
                Flash::success("Curso salvo com sucesso"),
            ))
        }
        Ok(None) => Ok(redirect_with_flash(
            "/cursos",
            Flash::error("Curso não encontrado"),
        )),
        Err(e) => {
            error!("Failed to save course: {}", e);
            Ok(invalid_form(request, form, "Erro técnico ao salvar o curso"))
        }
    }
}
