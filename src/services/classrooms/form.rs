use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireCourseAccess;
use crate::models::Flash;
use crate::models::classrooms::{requests::ClassroomForm, responses::ClassroomFormPage};
use crate::services::{failure_redirect, login_redirect};
use crate::utils::view::{redirect_with_flash, render};

use super::{ClassroomService, classrooms_path, load_course_classroom};

pub const CLASSROOM_FORM_VIEW: &str = "aulas/form";

pub async fn new_classroom_form(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(redirect_with_flash("/cursos", Flash::error("Curso não encontrado")));
    };
    Ok(render(
        request,
        CLASSROOM_FORM_VIEW,
        ClassroomFormPage {
            course,
            form: ClassroomForm::default(),
            exercises: Vec::new(),
            error: None,
        },
    ))
}

/// 编辑课时，同时列出它的练习供教授管理
pub async fn edit_classroom_form(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(course) = RequireCourseAccess::extract_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let location = classrooms_path(course.id);

    let classroom = match load_course_classroom(&storage, course.id, classroom_id).await {
        Ok(classroom) => classroom,
        Err(e) => return Ok(failure_redirect(&location, "Erro técnico ao carregar a aula", &e)),
    };

    let exercises = match storage.list_classroom_exercises(classroom.id).await {
        Ok(exercises) => exercises,
        Err(e) => return Ok(failure_redirect(&location, "Erro técnico ao carregar a aula", &e)),
    };

    let form = ClassroomForm {
        id: Some(classroom.id.to_string()),
        title: classroom.title,
        description: classroom.description,
        content_url: classroom.content_url,
        sequence: Some(classroom.sequence.to_string()),
    };

    Ok(render(
        request,
        CLASSROOM_FORM_VIEW,
        ClassroomFormPage {
            course,
            form,
            exercises,
            error: None,
        },
    ))
}
