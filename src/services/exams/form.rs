use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireCourseAccess;
use crate::models::exams::{requests::ExamDefinitionForm, responses::ExamFormPage};
use crate::services::{failure_redirect, login_redirect};
use crate::utils::view::render;

use super::{ExamService, exams_path, load_course_exam};

pub const EXAM_FORM_VIEW: &str = "exames/form";

pub async fn new_exam_form(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(login_redirect());
    };
    Ok(render(
        request,
        EXAM_FORM_VIEW,
        ExamFormPage {
            course,
            form: ExamDefinitionForm::default(),
            error: None,
        },
    ))
}

pub async fn edit_exam_form(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;

    match load_course_exam(&storage, course.id, exam_id).await {
        Ok(exam) => Ok(render(
            request,
            EXAM_FORM_VIEW,
            ExamFormPage {
                course,
                form: ExamDefinitionForm {
                    id: Some(exam.id.to_string()),
                    title: exam.title,
                    description: exam.description,
                },
                error: None,
            },
        )),
        Err(e) => Ok(failure_redirect(
            &exams_path(course.id),
            "Erro técnico ao carregar o exame",
            &e,
        )),
    }
}
