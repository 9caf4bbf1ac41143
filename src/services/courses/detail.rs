use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::error;

use crate::errors::Result;
use crate::middlewares::RequireSession;
use crate::models::Flash;
use crate::models::courses::{entities::Course, responses::CourseDetailPage};
use crate::models::users::entities::User;
use crate::storage::Storage;
use crate::utils::view::{redirect_with_flash, render};

use super::CourseService;

async fn load_detail(
    storage: &Arc<dyn Storage>,
    course: Course,
    viewer: Option<&User>,
) -> Result<CourseDetailPage> {
    let course_id = course.id;
    let is_owner = viewer.is_some_and(|user| user.is_professor() && course.is_owned_by(user.id));

    let professor = storage
        .get_user_by_id(course.professor_id)
        .await?
        .map(|user| user.summary());

    let enrollment = match viewer {
        Some(user) if user.is_student() => storage.get_enrollment(user.id, course_id).await?,
        _ => None,
    };

    // 未发布的考试只对授课教授可见
    let exams = storage
        .list_course_exam_definitions(course_id, !is_owner)
        .await?
        .into_iter()
        .map(|summary| summary.definition)
        .collect();

    Ok(CourseDetailPage {
        professor,
        classrooms: storage.list_course_classrooms(course_id).await?,
        comments: storage.list_course_comments(course_id).await?,
        doubts: storage.list_course_doubts(course_id).await?,
        exams,
        evaluations: storage.get_course_evaluation_summary(course_id).await?,
        is_owner,
        enrollment,
        student_count: storage.count_course_enrollments(course_id).await?,
        course,
    })
}

pub async fn course_detail(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let course = match storage.get_course_by_id(course_id).await {
        Ok(Some(course)) => course,
        Ok(None) => {
            return Ok(redirect_with_flash(
                "/cursos",
                Flash::error("Curso não encontrado"),
            ));
        }
        Err(e) => {
            error!("Failed to load course {}: {}", course_id, e);
            return Ok(redirect_with_flash(
                "/cursos",
                Flash::error("Erro técnico ao carregar o curso"),
            ));
        }
    };

    let viewer = RequireSession::extract_user(request);
    match load_detail(&storage, course, viewer.as_ref()).await {
        Ok(page) => Ok(render(request, "cursos/detalhe", page)),
        Err(e) => {
            error!("Failed to load details of course {}: {}", course_id, e);
            Ok(redirect_with_flash(
                "/cursos",
                Flash::error("Erro técnico ao carregar o curso"),
            ))
        }
    }
}
