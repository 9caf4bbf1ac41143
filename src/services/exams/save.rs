use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::middlewares::RequireCourseAccess;
use crate::models::Flash;
use crate::models::courses::entities::Course;
use crate::models::exams::requests::{CreateExamDefinitionRequest, ExamDefinitionForm};
use crate::models::exams::responses::ExamFormPage;
use crate::services::{failure_redirect, login_redirect};
use crate::utils::view::{redirect_with_flash, render_invalid};

use super::form::EXAM_FORM_VIEW;
use super::{ExamService, exams_path, load_course_exam, questions_path};

fn invalid_form(
    request: &HttpRequest,
    course: Course,
    form: ExamDefinitionForm,
    message: &str,
) -> HttpResponse {
    render_invalid(
        request,
        EXAM_FORM_VIEW,
        ExamFormPage {
            course,
            form,
            error: Some(message.to_string()),
        },
    )
}

pub async fn save_exam(
    service: &ExamService,
    request: &HttpRequest,
    form: ExamDefinitionForm,
) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;

    let exam_id = match form.exam_id() {
        Ok(id) => id,
        Err(e) => return Ok(invalid_form(request, course, form, e.message())),
    };
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(e) => return Ok(invalid_form(request, course, form, e.message())),
    };

    let saved = match exam_id {
        Some(id) => {
            if let Err(e) = load_course_exam(&storage, course.id, id).await {
                return Ok(failure_redirect(
                    &exams_path(course.id),
                    "Erro técnico ao salvar o exame",
                    &e,
                ));
            }
            storage.update_exam_definition(id, fields).await
        }
        None => storage
            .create_exam_definition(CreateExamDefinitionRequest {
                course_id: course.id,
                fields,
            })
            .await
            .map(Some),
    };

    match saved {
        Ok(Some(exam)) => {
            info!("Exam definition {} saved in course {}", exam.id, course.id);
            Ok(redirect_with_flash(
                &questions_path(course.id, exam.id),
                Flash::success("Exame salvo com sucesso"),
            ))
        }
        Ok(None) => Ok(redirect_with_flash(
            &exams_path(course.id),
            Flash::error("Exame não encontrado"),
        )),
        Err(e) => {
            error!("Failed to save exam definition: {}", e);
            Ok(invalid_form(request, course, form, "Erro técnico ao salvar o exame"))
        }
    }
}
