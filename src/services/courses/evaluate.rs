use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::Flash;
use crate::models::courses::requests::EvaluationForm;
use crate::services::{course_path, failure_redirect, login_redirect, session_and_course};
use crate::utils::view::redirect_with_flash;

use super::CourseService;

/// 已选课学生给课程打分（0 到 10），重复评价覆盖之前的分数
pub async fn evaluate(
    service: &CourseService,
    request: &HttpRequest,
    form: EvaluationForm,
) -> ActixResult<HttpResponse> {
    let Some((student, course)) = session_and_course(request) else {
        return Ok(login_redirect());
    };
    let storage = service.get_storage(request)?;
    let location = course_path(course.id);

    let (grade, comment) = match form.validate() {
        Ok(valid) => valid,
        Err(e) => return Ok(redirect_with_flash(&location, Flash::error(e.message()))),
    };

    match storage
        .save_course_evaluation(student.id, course.id, grade, comment)
        .await
    {
        Ok(_) => {
            info!(
                "Student {} evaluated course {} with {}",
                student.id, course.id, grade
            );
            Ok(redirect_with_flash(
                &location,
                Flash::success("Obrigado pela sua avaliação!"),
            ))
        }
        Err(e) => Ok(failure_redirect(&location, "Erro técnico ao salvar a avaliação", &e)),
    }
}
