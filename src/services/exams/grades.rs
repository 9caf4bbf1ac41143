use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::courses::entities::Course;
use crate::models::exams::entities::ExamKind;
use crate::models::exams::responses::{ExamAttemptView, GradesPage};
use crate::services::{course_path, failure_redirect, login_redirect, session_and_course};
use crate::storage::Storage;
use crate::utils::view::render;

use super::ExamService;

async fn load_grades(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    course: Course,
) -> Result<GradesPage> {
    let exams = storage
        .list_student_course_exams(student_id, course.id)
        .await?;
    let titles: HashMap<i64, String> = storage
        .list_course_exam_definitions(course.id, false)
        .await?
        .into_iter()
        .map(|summary| (summary.definition.id, summary.definition.title))
        .collect();

    let mut attempts = Vec::new();
    let mut evaluation = None;
    for exam in exams {
        match exam.kind {
            ExamKind::Evaluation => evaluation = Some(exam),
            ExamKind::Attempt => {
                let exam_title = exam
                    .exam_definition_id
                    .and_then(|id| titles.get(&id).cloned());
                attempts.push(ExamAttemptView { exam, exam_title });
            }
        }
    }

    let average = if attempts.is_empty() {
        None
    } else {
        let sum: f64 = attempts.iter().map(|a| a.exam.grade).sum();
        Some(sum / attempts.len() as f64)
    };

    Ok(GradesPage {
        course,
        attempts,
        evaluation,
        average,
    })
}

pub async fn my_grades(service: &ExamService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some((student, course)) = session_and_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let course_id = course.id;

    match load_grades(&storage, student.id, course).await {
        Ok(page) => Ok(render(request, "exames/notas", page)),
        Err(e) => Ok(failure_redirect(
            &course_path(course_id),
            "Erro técnico ao carregar as notas",
            &e,
        )),
    }
}
