use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::middlewares::{RequireCourseAccess, RequireRole};
use crate::models::exams::requests::{ExamDefinitionForm, ExamQuestionForm};
use crate::models::users::entities::UserRole;
use crate::services::ExamService;
use crate::utils::{SafeExamIdI64, SafeQuestionIdI64};

static EXAM_SERVICE: Lazy<ExamService> = Lazy::new(ExamService::new_lazy);

pub async fn list_exams(req: HttpRequest) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.list_exams(&req).await
}

pub async fn new_exam_form(req: HttpRequest) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.new_exam_form(&req).await
}

pub async fn edit_exam_form(req: HttpRequest, exam_id: SafeExamIdI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.edit_exam_form(&req, exam_id.0).await
}

pub async fn save_exam(
    req: HttpRequest,
    form: web::Form<ExamDefinitionForm>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.save_exam(&req, form.into_inner()).await
}

pub async fn publish_exam(req: HttpRequest, exam_id: SafeExamIdI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.publish_exam(&req, exam_id.0).await
}

pub async fn unpublish_exam(
    req: HttpRequest,
    exam_id: SafeExamIdI64,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.unpublish_exam(&req, exam_id.0).await
}

pub async fn delete_exam(req: HttpRequest, exam_id: SafeExamIdI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.delete_exam(&req, exam_id.0).await
}

pub async fn questions_page(
    req: HttpRequest,
    exam_id: SafeExamIdI64,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.questions_page(&req, exam_id.0).await
}

pub async fn add_question(
    req: HttpRequest,
    exam_id: SafeExamIdI64,
    form: web::Form<ExamQuestionForm>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .add_question(&req, exam_id.0, form.into_inner())
        .await
}

pub async fn delete_question(
    req: HttpRequest,
    exam_id: SafeExamIdI64,
    question_id: SafeQuestionIdI64,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .delete_question(&req, exam_id.0, question_id.0)
        .await
}

pub async fn take_exam(req: HttpRequest, exam_id: SafeExamIdI64) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.take_exam(&req, exam_id.0).await
}

// 答案字段为 resposta_{questao_id}，数量不定
pub async fn submit_exam(
    req: HttpRequest,
    exam_id: SafeExamIdI64,
    form: web::Form<HashMap<String, String>>,
) -> ActixResult<HttpResponse> {
    EXAM_SERVICE
        .submit_exam(&req, exam_id.0, form.into_inner())
        .await
}

pub async fn my_grades(req: HttpRequest) -> ActixResult<HttpResponse> {
    EXAM_SERVICE.my_grades(&req).await
}

// 挂在 /cursos/{id} 之下
pub fn configure_exam_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/minhas-notas")
            .wrap(RequireCourseAccess::enrolled())
            .wrap(RequireRole::new(UserRole::Student))
            .route(web::get().to(my_grades)),
    )
    .service(
        web::scope("/exames")
            .service(
                web::resource("")
                    .wrap(RequireCourseAccess::owner_or_enrolled())
                    .route(web::get().to(list_exams)),
            )
            .service(
                web::resource("/novo")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::get().to(new_exam_form)),
            )
            .service(
                web::resource("/salvar")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::post().to(save_exam)),
            )
            .service(
                web::resource("/{exame_id}/editar")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::get().to(edit_exam_form)),
            )
            .service(
                web::resource("/{exame_id}/publicar")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::post().to(publish_exam)),
            )
            .service(
                web::resource("/{exame_id}/despublicar")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::post().to(unpublish_exam)),
            )
            .service(
                web::resource("/{exame_id}/deletar")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::post().to(delete_exam)),
            )
            .service(
                web::resource("/{exame_id}/questoes")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::get().to(questions_page)),
            )
            .service(
                web::resource("/{exame_id}/questoes/adicionar")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::post().to(add_question)),
            )
            .service(
                web::resource("/{exame_id}/questoes/{questao_id}/deletar")
                    .wrap(RequireCourseAccess::owner())
                    .route(web::post().to(delete_question)),
            )
            .service(
                web::resource("/{exame_id}/fazer")
                    .wrap(RequireCourseAccess::enrolled())
                    .wrap(RequireRole::new(UserRole::Student))
                    .route(web::get().to(take_exam)),
            )
            .service(
                web::resource("/{exame_id}/enviar")
                    .wrap(RequireCourseAccess::enrolled())
                    .wrap(RequireRole::new(UserRole::Student))
                    .route(web::post().to(submit_exam)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};

    use crate::models::exams::entities::ExamKind;
    use crate::test_support::{TestContext, flash_of, location_of, session_cookie};

    #[actix_web::test]
    async fn test_exam_lifecycle_from_authoring_to_grade() {
        let ctx = TestContext::new().await;
        let professor = ctx.professor("prof.exame@example.com").await;
        let student = ctx.student("aluno.exame@example.com").await;
        let course = ctx.course(&professor, "Redes").await;
        ctx.storage.enroll_student(student.id, course.id).await.unwrap();
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri(&format!("/cursos/{}/exames/salvar", course.id))
            .cookie(session_cookie(&professor))
            .set_form([("title", "Prova 1")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let exams = ctx
            .storage
            .list_course_exam_definitions(course.id, false)
            .await
            .unwrap();
        assert_eq!(exams.len(), 1);
        let exam_id = exams[0].definition.id;
        assert!(!exams[0].definition.published);

        // 没有题目时不能发布
        let req = test::TestRequest::post()
            .uri(&format!("/cursos/{}/exames/{}/publicar", course.id, exam_id))
            .cookie(session_cookie(&professor))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            flash_of(&resp).map(|f| f.message),
            Some("Adicione pelo menos uma questão antes de publicar o exame".to_string())
        );

        let req = test::TestRequest::post()
            .uri(&format!(
                "/cursos/{}/exames/{}/questoes/adicionar",
                course.id, exam_id
            ))
            .cookie(session_cookie(&professor))
            .set_form([
                ("statement", "Qual camada roteia pacotes?"),
                ("question_type", "MULTIPLA_ESCOLHA"),
                ("options", "A\nB\nC"),
                ("correct_answer", "A"),
                ("points", "10"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let questions = ctx.storage.list_exam_questions(exam_id).await.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].sequence, 1);

        let req = test::TestRequest::post()
            .uri(&format!("/cursos/{}/exames/{}/publicar", course.id, exam_id))
            .cookie(session_cookie(&professor))
            .to_request();
        test::call_service(&app, req).await;

        // 学生只看到题目，看不到标准答案
        let req = test::TestRequest::get()
            .uri(&format!("/cursos/{}/exames/{}/fazer", course.id, exam_id))
            .cookie(session_cookie(&student))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "exames/fazer");
        assert!(body["model"]["questions"][0].get("correct_answer").is_none());

        let answer_field = format!("resposta_{}", questions[0].id);
        let req = test::TestRequest::post()
            .uri(&format!("/cursos/{}/exames/{}/enviar", course.id, exam_id))
            .cookie(session_cookie(&student))
            .set_form([(answer_field.as_str(), "a")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            location_of(&resp),
            Some(format!("/cursos/{}/minhas-notas", course.id))
        );

        let records = ctx
            .storage
            .list_student_course_exams(student.id, course.id)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, ExamKind::Attempt);
        assert_eq!(records[0].grade, 10.0);
        assert_eq!(
            records[0].comment.as_deref(),
            Some("Você acertou 1 de 1 questões (10/10 pontos)")
        );
    }

    #[actix_web::test]
    async fn test_unpublished_exam_cannot_be_taken() {
        let ctx = TestContext::new().await;
        let professor = ctx.professor("prof.rascunho@example.com").await;
        let student = ctx.student("aluno.rascunho@example.com").await;
        let course = ctx.course(&professor, "Compiladores").await;
        ctx.storage.enroll_student(student.id, course.id).await.unwrap();
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri(&format!("/cursos/{}/exames/salvar", course.id))
            .cookie(session_cookie(&professor))
            .set_form([("title", "Rascunho")])
            .to_request();
        test::call_service(&app, req).await;
        let exam_id = ctx
            .storage
            .list_course_exam_definitions(course.id, false)
            .await
            .unwrap()[0]
            .definition
            .id;

        let req = test::TestRequest::post()
            .uri(&format!("/cursos/{}/exames/{}/enviar", course.id, exam_id))
            .cookie(session_cookie(&student))
            .set_form([("resposta_1", "A")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            location_of(&resp),
            Some(format!("/cursos/{}/exames/{}/fazer", course.id, exam_id))
        );
        assert!(
            ctx.storage
                .list_student_course_exams(student.id, course.id)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
