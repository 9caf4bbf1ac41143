use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireCourseAccess, RequireRole};
use crate::models::classrooms::requests::{ClassroomForm, DeleteClassroomForm};
use crate::models::exercises::requests::{AnswerExerciseForm, ExerciseForm};
use crate::models::users::entities::UserRole;
use crate::services::{ClassroomService, ExerciseService};
use crate::utils::{SafeClassroomIdI64, SafeExerciseIdI64};

static CLASSROOM_SERVICE: Lazy<ClassroomService> = Lazy::new(ClassroomService::new_lazy);
static EXERCISE_SERVICE: Lazy<ExerciseService> = Lazy::new(ExerciseService::new_lazy);

pub async fn list_classrooms(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.list_classrooms(&req).await
}

pub async fn get_classroom(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.get_classroom(&req, classroom_id.0).await
}

pub async fn new_classroom_form(req: HttpRequest) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE.new_classroom_form(&req).await
}

pub async fn edit_classroom_form(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .edit_classroom_form(&req, classroom_id.0)
        .await
}

pub async fn save_classroom(
    req: HttpRequest,
    form: web::Form<ClassroomForm>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .save_classroom(&req, form.into_inner())
        .await
}

pub async fn delete_classroom(
    req: HttpRequest,
    form: web::Form<DeleteClassroomForm>,
) -> ActixResult<HttpResponse> {
    CLASSROOM_SERVICE
        .delete_classroom(&req, form.into_inner())
        .await
}

pub async fn save_exercise(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
    form: web::Form<ExerciseForm>,
) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE
        .save_exercise(&req, classroom_id.0, form.into_inner())
        .await
}

pub async fn delete_exercise(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
    exercise_id: SafeExerciseIdI64,
) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE
        .delete_exercise(&req, classroom_id.0, exercise_id.0)
        .await
}

pub async fn answer_exercise(
    req: HttpRequest,
    classroom_id: SafeClassroomIdI64,
    exercise_id: SafeExerciseIdI64,
    form: web::Form<AnswerExerciseForm>,
) -> ActixResult<HttpResponse> {
    EXERCISE_SERVICE
        .answer_exercise(&req, classroom_id.0, exercise_id.0, form.into_inner())
        .await
}

// 挂在 /cursos/{id} 之下
pub fn configure_classroom_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/aulas")
            .service(
                web::resource("")
                    .wrap(RequireCourseAccess::owner_or_enrolled())
                    .route(web::get().to(list_classrooms)),
            )
            .service(
                web::resource("/nova")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::get().to(new_classroom_form)),
            )
            .service(
                web::resource("/salvar")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::post().to(save_classroom)),
            )
            .service(
                web::resource("/deletar")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::post().to(delete_classroom)),
            )
            .service(
                web::resource("/{aula_id}")
                    .wrap(RequireCourseAccess::owner_or_enrolled())
                    .route(web::get().to(get_classroom)),
            )
            .service(
                web::resource("/{aula_id}/editar")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::get().to(edit_classroom_form)),
            )
            .service(
                web::resource("/{aula_id}/exercicios/salvar")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::post().to(save_exercise)),
            )
            .service(
                web::resource("/{aula_id}/exercicios/{exercicio_id}/deletar")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::post().to(delete_exercise)),
            )
            .service(
                web::resource("/{aula_id}/exercicios/{exercicio_id}/responder")
                    .wrap(RequireCourseAccess::enrolled())
                    .wrap(RequireRole::new(UserRole::Student))
                    .route(web::post().to(answer_exercise)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};

    use crate::test_support::{TestContext, location_of, session_cookie};

    #[actix_web::test]
    async fn test_opening_classrooms_advances_progress() {
        let ctx = TestContext::new().await;
        let professor = ctx.professor("prof.aulas@example.com").await;
        let student = ctx.student("aluno.aulas@example.com").await;
        let course = ctx.course(&professor, "Sistemas Operacionais").await;
        let app = test::init_service(ctx.app()).await;

        for title in ["Processos", "Memória"] {
            let req = test::TestRequest::post()
                .uri(&format!("/cursos/{}/aulas/salvar", course.id))
                .cookie(session_cookie(&professor))
                .set_form([("title", title)])
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        }
        let classrooms = ctx.storage.list_course_classrooms(course.id).await.unwrap();
        assert_eq!(classrooms.len(), 2);

        // 未选课的学生被拒绝
        let req = test::TestRequest::get()
            .uri(&format!("/cursos/{}/aulas/{}", course.id, classrooms[0].id))
            .cookie(session_cookie(&student))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(location_of(&resp), Some(format!("/cursos/{}", course.id)));

        ctx.storage.enroll_student(student.id, course.id).await.unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/cursos/{}/aulas/{}", course.id, classrooms[1].id))
            .cookie(session_cookie(&student))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "aulas/detalhe");
        assert_eq!(body["model"]["position"], 2);
        assert_eq!(body["model"]["previous_id"], classrooms[0].id);

        // 回看前面的课时不会降低进度
        let req = test::TestRequest::get()
            .uri(&format!("/cursos/{}/aulas/{}", course.id, classrooms[0].id))
            .cookie(session_cookie(&student))
            .to_request();
        test::call_service(&app, req).await;

        let enrollment = ctx
            .storage
            .get_enrollment(student.id, course.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(enrollment.progress, 1.0);
    }

    #[actix_web::test]
    async fn test_exercise_answer_is_graded_and_replaced() {
        let ctx = TestContext::new().await;
        let professor = ctx.professor("prof.exercicio@example.com").await;
        let student = ctx.student("aluno.exercicio@example.com").await;
        let course = ctx.course(&professor, "Álgebra").await;
        ctx.storage.enroll_student(student.id, course.id).await.unwrap();
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri(&format!("/cursos/{}/aulas/salvar", course.id))
            .cookie(session_cookie(&professor))
            .set_form([("title", "Matrizes")])
            .to_request();
        test::call_service(&app, req).await;
        let classroom = ctx.storage.list_course_classrooms(course.id).await.unwrap()[0].clone();

        let req = test::TestRequest::post()
            .uri(&format!(
                "/cursos/{}/aulas/{}/exercicios/salvar",
                course.id, classroom.id
            ))
            .cookie(session_cookie(&professor))
            .set_form([
                ("statement", "Quanto é 2 + 2?"),
                ("question_type", "DISSERTATIVA"),
                ("correct_answer", "4"),
            ])
            .to_request();
        test::call_service(&app, req).await;
        let exercise = ctx
            .storage
            .list_classroom_exercises(classroom.id)
            .await
            .unwrap()[0]
            .clone();

        let uri = format!(
            "/cursos/{}/aulas/{}/exercicios/{}/responder",
            course.id, classroom.id, exercise.id
        );
        for answer in ["5", " 4 "] {
            let req = test::TestRequest::post()
                .uri(&uri)
                .cookie(session_cookie(&student))
                .set_form([("answer", answer)])
                .to_request();
            test::call_service(&app, req).await;
        }

        let answers = ctx
            .storage
            .list_student_exercise_answers(student.id, classroom.id)
            .await
            .unwrap();
        assert_eq!(answers.len(), 1);
        assert!(answers[0].correct);
        assert_eq!(answers[0].grade, 10.0);
    }
}
