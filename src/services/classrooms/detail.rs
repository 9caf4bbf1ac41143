use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::errors::Result;
use crate::middlewares::RequireCourseAccess;
use crate::models::classrooms::responses::ClassroomDetailPage;
use crate::models::courses::entities::Course;
use crate::models::enrollments::entities::{Enrollment, advance_progress};
use crate::models::exercises::entities::ExerciseView;
use crate::models::users::entities::User;
use crate::services::{failure_redirect, login_redirect, session_and_course};
use crate::storage::Storage;
use crate::utils::view::render;

use super::{ClassroomService, classrooms_path, load_course_classroom};

async fn load_detail(
    storage: &Arc<dyn Storage>,
    user: &User,
    course: Course,
    classroom_id: i64,
    enrollment: Option<Enrollment>,
) -> Result<ClassroomDetailPage> {
    let classroom = load_course_classroom(storage, course.id, classroom_id).await?;
    let classrooms = storage.list_course_classrooms(course.id).await?;

    let index = classrooms
        .iter()
        .position(|c| c.id == classroom.id)
        .unwrap_or_default();
    let total = classrooms.len();
    let previous_id = index
        .checked_sub(1)
        .and_then(|i| classrooms.get(i))
        .map(|c| c.id);
    let next_id = classrooms.get(index + 1).map(|c| c.id);

    let is_owner = course.is_owned_by(user.id);
    let exercises = storage.list_classroom_exercises(classroom.id).await?;
    let exercises = if is_owner {
        exercises.into_iter().map(ExerciseView::for_owner).collect()
    } else {
        let mut answers: HashMap<i64, _> = storage
            .list_student_exercise_answers(user.id, classroom.id)
            .await?
            .into_iter()
            .map(|answer| (answer.exercise_id, answer))
            .collect();
        exercises
            .into_iter()
            .map(|exercise| {
                let my_answer = answers.remove(&exercise.id);
                ExerciseView::for_student(exercise, my_answer)
            })
            .collect()
    };

    // 学生打开课时：进度只增不减
    let progress = match enrollment {
        Some(enrollment) => {
            let advanced = advance_progress(enrollment.progress, index + 1, total);
            if advanced > enrollment.progress {
                storage
                    .update_enrollment_progress(enrollment.id, advanced)
                    .await?;
                debug!(
                    "Enrollment {} progress advanced to {:.2}",
                    enrollment.id, advanced
                );
            }
            Some(advanced)
        }
        None => None,
    };

    Ok(ClassroomDetailPage {
        course,
        classroom,
        position: index + 1,
        total,
        previous_id,
        next_id,
        exercises,
        is_owner,
        progress,
    })
}

pub async fn classroom_detail(
    service: &ClassroomService,
    request: &HttpRequest,
    classroom_id: i64,
) -> ActixResult<HttpResponse> {
    let Some((user, course)) = session_and_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let course_id = course.id;
    let enrollment = RequireCourseAccess::extract_enrollment(request);

    match load_detail(&storage, &user, course, classroom_id, enrollment).await {
        Ok(page) => Ok(render(request, "aulas/detalhe", page)),
        Err(e) => Ok(failure_redirect(
            &classrooms_path(course_id),
            "Erro técnico ao carregar a aula",
            &e,
        )),
    }
}
