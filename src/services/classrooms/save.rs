use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::middlewares::RequireCourseAccess;
use crate::models::Flash;
use crate::models::classrooms::{requests::ClassroomForm, responses::ClassroomFormPage};
use crate::models::courses::entities::Course;
use crate::services::{failure_redirect, login_redirect};
use crate::utils::view::{redirect_with_flash, render_invalid};

use super::form::CLASSROOM_FORM_VIEW;
use super::{ClassroomService, classroom_path, classrooms_path, load_course_classroom};

fn invalid_form(request: &HttpRequest, course: Course, form: ClassroomForm, message: &str) -> HttpResponse {
    render_invalid(
        request,
        CLASSROOM_FORM_VIEW,
        ClassroomFormPage {
            course,
            form,
            exercises: Vec::new(),
            error: Some(message.to_string()),
        },
    )
}

pub async fn save_classroom(
    service: &ClassroomService,
    request: &HttpRequest,
    form: ClassroomForm,
) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;

    let classroom_id = match form.classroom_id() {
        Ok(id) => id,
        Err(e) => return Ok(invalid_form(request, course, form, e.message())),
    };
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(e) => return Ok(invalid_form(request, course, form, e.message())),
    };

    let saved = match classroom_id {
        Some(id) => {
            // 只能修改本课程的课时
            if let Err(e) = load_course_classroom(&storage, course.id, id).await {
                return Ok(failure_redirect(
                    &classrooms_path(course.id),
                    "Erro técnico ao salvar a aula",
                    &e,
                ));
            }
            storage.update_classroom(id, fields).await
        }
        None => storage.create_classroom(course.id, fields).await.map(Some),
    };

    match saved {
        Ok(Some(classroom)) => {
            info!("Classroom {} saved in course {}", classroom.id, course.id);
            Ok(redirect_with_flash(
                &classroom_path(course.id, classroom.id),
                Flash::success("Aula salva com sucesso"),
            ))
        }
        Ok(None) => Ok(redirect_with_flash(
            &classrooms_path(course.id),
            Flash::error("Aula não encontrada"),
        )),
        Err(e) => {
            error!("Failed to save classroom: {}", e);
            Ok(invalid_form(request, course, form, "Erro técnico ao salvar a aula"))
        }
    }
}
