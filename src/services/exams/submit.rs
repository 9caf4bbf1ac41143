use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::errors::Result;
use crate::models::Flash;
use crate::models::courses::entities::Course;
use crate::models::exams::entities::{Exam, ExamKind};
use crate::models::exams::requests::{CreateExamRequest, parse_submission};
use crate::models::users::entities::User;
use crate::services::{failure_redirect, login_redirect, session_and_course};
use crate::storage::Storage;
use crate::utils::view::redirect_with_flash;

use super::ExamService;
use super::scoring::score_submission;
use super::take::load_published_exam;

async fn score_and_record(
    storage: &Arc<dyn Storage>,
    student: &User,
    course: &Course,
    exam_id: i64,
    form: &HashMap<String, String>,
) -> Result<Exam> {
    let answers = parse_submission(form)?;
    let (definition, questions) = load_published_exam(storage, course, exam_id).await?;
    let summary = score_submission(&answers, &questions);

    storage
        .create_exam(CreateExamRequest {
            student_id: student.id,
            course_id: course.id,
            kind: ExamKind::Attempt,
            exam_definition_id: Some(definition.id),
            grade: summary.grade(),
            comment: Some(summary.comment()),
        })
        .await
}

pub async fn submit_exam(
    service: &ExamService,
    request: &HttpRequest,
    exam_id: i64,
    form: HashMap<String, String>,
) -> ActixResult<HttpResponse> {
    let Some((student, course)) = session_and_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;

    match score_and_record(&storage, &student, &course, exam_id, &form).await {
        Ok(exam) => {
            info!(
                "Student {} submitted exam definition {} with grade {}",
                student.id, exam_id, exam.grade
            );
            let message = format!(
                "Exame enviado! Nota: {}. {}",
                exam.grade,
                exam.comment.unwrap_or_default()
            );
            Ok(redirect_with_flash(
                &format!("/cursos/{}/minhas-notas", course.id),
                Flash::success(message),
            ))
        }
        // 失败时回到作答页，不保存任何记录
        Err(e) => Ok(failure_redirect(
            &format!("/cursos/{}/exames/{}/fazer", course.id, exam_id),
            "Erro técnico ao enviar o exame",
            &e,
        )),
    }
}
