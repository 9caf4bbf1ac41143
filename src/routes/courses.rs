use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireCourseAccess, RequireRole};
use crate::models::comments::requests::CommentForm;
use crate::models::courses::requests::{CourseForm, CourseQueryParams, EvaluationForm};
use crate::models::doubts::requests::{AnswerForm, DoubtForm};
use crate::models::users::entities::UserRole;
use crate::services::{CourseService, DoubtService};
use crate::utils::{SafeDoubtIdI64, SafeIDI64};

use super::{classrooms::configure_classroom_routes, exams::configure_exam_routes};

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);
static DOUBT_SERVICE: Lazy<DoubtService> = Lazy::new(DoubtService::new_lazy);

// HTTP处理程序
pub async fn home(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.home(&req).await
}

pub async fn list_courses(
    req: HttpRequest,
    query: web::Query<CourseQueryParams>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req, query.into_inner()).await
}

pub async fn get_course(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.get_course(&req, course_id.0).await
}

pub async fn new_course_form(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.new_course_form(&req).await
}

pub async fn edit_course_form(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.edit_course_form(&req).await
}

pub async fn save_course(req: HttpRequest, form: web::Form<CourseForm>) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.save_course(&req, form.into_inner()).await
}

pub async fn delete_course(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(&req).await
}

pub async fn enroll(req: HttpRequest, course_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.enroll(&req, course_id.0).await
}

pub async fn comment(
    req: HttpRequest,
    course_id: SafeIDI64,
    form: web::Form<CommentForm>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .comment(&req, course_id.0, form.into_inner())
        .await
}

pub async fn evaluate(
    req: HttpRequest,
    form: web::Form<EvaluationForm>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.evaluate(&req, form.into_inner()).await
}

pub async fn create_doubt(
    req: HttpRequest,
    form: web::Form<DoubtForm>,
) -> ActixResult<HttpResponse> {
    DOUBT_SERVICE.create_doubt(&req, form.into_inner()).await
}

pub async fn answer_doubt(
    req: HttpRequest,
    doubt_id: SafeDoubtIdI64,
    form: web::Form<AnswerForm>,
) -> ActixResult<HttpResponse> {
    DOUBT_SERVICE
        .answer_doubt(&req, doubt_id.0, form.into_inner())
        .await
}

// 配置路由
pub fn configure_courses_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/cursos", web::get().to(list_courses))
        // 静态路径必须先于 /cursos/{id} 注册
        .service(
            web::resource("/cursos/novo")
                .wrap(RequireRole::new(UserRole::Professor).or_redirect("/cursos"))
                .route(web::get().to(new_course_form)),
        )
        .service(
            web::resource("/cursos/salvar")
                .wrap(RequireRole::new(UserRole::Professor).or_redirect("/cursos"))
                .route(web::post().to(save_course)),
        )
        .service(
            web::scope("/cursos/{id}")
                .route("", web::get().to(get_course))
                .service(
                    web::resource("/editar")
                        .wrap(RequireCourseAccess::owner())
                        .route(web::get().to(edit_course_form)),
                )
                .service(
                    web::resource("/deletar")
                        .wrap(RequireCourseAccess::owner())
                        .route(web::post().to(delete_course)),
                )
                .service(
                    web::resource("/matricular")
                        .wrap(RequireRole::new(UserRole::Student))
                        .route(web::post().to(enroll)),
                )
                .service(
                    web::resource("/comentar")
                        .wrap(RequireRole::new(UserRole::Student))
                        .route(web::post().to(comment)),
                )
                .service(
                    web::resource("/avaliar")
                        .wrap(RequireCourseAccess::enrolled())
                        .wrap(RequireRole::new(UserRole::Student))
                        .route(web::post().to(evaluate)),
                )
                .service(
                    web::resource("/duvidas")
                        .wrap(RequireCourseAccess::enrolled())
                        .wrap(RequireRole::new(UserRole::Student))
                        .route(web::post().to(create_doubt)),
                )
                .service(
                    web::resource("/duvidas/{duvida_id}/responder")
                        .wrap(RequireCourseAccess::owner())
                        .route(web::post().to(answer_doubt)),
                )
                .configure(configure_classroom_routes)
                .configure(configure_exam_routes),
        );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};

    use crate::models::courses::requests::{CourseFields, CreateCourseRequest};
    use crate::models::doubts::entities::DoubtStatus;
    use crate::models::exams::entities::ExamKind;
    use crate::test_support::{TestContext, flash_of, location_of, session_cookie};

    async fn catalog(ctx: &TestContext, query: &str) -> serde_json::Value {
        let app = test::init_service(ctx.app()).await;
        let req = test::TestRequest::get()
            .uri(&format!("/cursos?{query}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{query}");
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "cursos/lista");
        body["model"]["courses"].clone()
    }

    fn titles(courses: &serde_json::Value) -> Vec<String> {
        courses["items"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item["title"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn test_empty_title_rerenders_form_without_persisting() {
        let ctx = TestContext::new().await;
        let professor = ctx.professor("prof.vazio@example.com").await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri("/cursos/salvar")
            .cookie(session_cookie(&professor))
            .set_form([("title", "   "), ("price", "10"), ("hours", "4")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["view"], "cursos/form");
        assert!(body["model"]["error"].is_string());

        let courses = ctx
            .storage
            .list_courses_by_professor(professor.id)
            .await
            .unwrap();
        assert!(courses.is_empty());
    }

    #[actix_web::test]
    async fn test_new_course_form_requires_professor() {
        let ctx = TestContext::new().await;
        let student = ctx.student("aluno.form@example.com").await;
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::get().uri("/cursos/novo").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&resp).as_deref(), Some("/login"));
        assert!(flash_of(&resp).is_some());

        let req = test::TestRequest::get()
            .uri("/cursos/novo")
            .cookie(session_cookie(&student))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(location_of(&resp).as_deref(), Some("/cursos"));
        assert_eq!(
            flash_of(&resp).map(|f| f.message),
            Some("Acesso restrito a professores".to_string())
        );
    }

    #[actix_web::test]
    async fn test_student_actions_redirect_anonymous_and_professors_to_login() {
        let ctx = TestContext::new().await;
        let professor = ctx.professor("prof.acoes@example.com").await;
        let course = ctx.course(&professor, "Rust Básico").await;
        let app = test::init_service(ctx.app()).await;

        let targets = [
            (format!("/cursos/{}/matricular", course.id), vec![]),
            (
                format!("/cursos/{}/comentar", course.id),
                vec![("content", "Ótimo curso")],
            ),
            (
                format!("/cursos/{}/exames/1/enviar", course.id),
                vec![("resposta_1", "A")],
            ),
        ];

        for (uri, form) in &targets {
            let anonymous = test::TestRequest::post()
                .uri(uri)
                .set_form(form)
                .to_request();
            let resp = test::call_service(&app, anonymous).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(location_of(&resp).as_deref(), Some("/login"), "{uri}");

            let as_professor = test::TestRequest::post()
                .uri(uri)
                .cookie(session_cookie(&professor))
                .set_form(form)
                .to_request();
            let resp = test::call_service(&app, as_professor).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(location_of(&resp).as_deref(), Some("/login"), "{uri}");
        }

        assert_eq!(ctx.storage.count_course_enrollments(course.id).await.unwrap(), 0);
        assert!(ctx.storage.list_course_comments(course.id).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_doubt_is_open_until_owner_answers() {
        let ctx = TestContext::new().await;
        let professor = ctx.professor("prof.duvidas@example.com").await;
        let student = ctx.student("aluno.duvidas@example.com").await;
        let course = ctx.course(&professor, "Estruturas de Dados").await;
        ctx.storage.enroll_student(student.id, course.id).await.unwrap();
        let app = test::init_service(ctx.app()).await;

        let req = test::TestRequest::post()
            .uri(&format!("/cursos/{}/duvidas", course.id))
            .cookie(session_cookie(&student))
            .set_form([("question", "O que é uma árvore AVL?")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let doubts = ctx.storage.list_student_doubts(student.id).await.unwrap();
        assert_eq!(doubts.len(), 1);
        let doubt = &doubts[0];
        assert_eq!(doubt.status, DoubtStatus::Open);

        // 学生不能回答
        let req = test::TestRequest::post()
            .uri(&format!("/cursos/{}/duvidas/{}/responder", course.id, doubt.id))
            .cookie(session_cookie(&student))
            .set_form([("answer", "Uma árvore balanceada")])
            .to_request();
        test::call_service(&app, req).await;
        let unchanged = ctx.storage.get_doubt_by_id(doubt.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, DoubtStatus::Open);

        let req = test::TestRequest::post()
            .uri(&format!("/cursos/{}/duvidas/{}/responder", course.id, doubt.id))
            .cookie(session_cookie(&professor))
            .set_form([("answer", "Uma árvore binária de busca balanceada")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let answered = ctx.storage.get_doubt_by_id(doubt.id).await.unwrap().unwrap();
        assert_eq!(answered.status, DoubtStatus::Answered);
        assert_eq!(answered.professor_id, Some(professor.id));
        assert!(answered.answered_at.is_some());
    }

    #[actix_web::test]
    async fn test_catalog_search_and_category_filter() {
        let ctx = TestContext::new().await;
        let professor = ctx.professor("prof.catalogo@example.com").await;
        ctx.course(&professor, "Desconto 50% Rust").await;
        ctx.course(&professor, "snake_case em Rust").await;
        ctx.storage
            .create_course(CreateCourseRequest {
                professor_id: professor.id,
                fields: CourseFields {
                    title: "Cálculo I".to_string(),
                    description: None,
                    price: 0.0,
                    category: Some("Matemática".to_string()),
                    hours: 60,
                },
            })
            .await
            .unwrap();

        let all = catalog(&ctx, "").await;
        assert_eq!(all["pagination"]["total"], 3);

        assert_eq!(catalog(&ctx, "search=Rust").await["pagination"]["total"], 2);
        assert_eq!(catalog(&ctx, "search=50").await["pagination"]["total"], 1);

        // 通配符按字面匹配
        let percent = catalog(&ctx, "search=50%25").await;
        assert_eq!(titles(&percent), vec!["Desconto 50% Rust".to_string()]);
        let underscore = catalog(&ctx, "search=snake_case").await;
        assert_eq!(titles(&underscore), vec!["snake_case em Rust".to_string()]);
        assert_eq!(catalog(&ctx, "search=snake%25case").await["pagination"]["total"], 0);

        let math = catalog(&ctx, "category=Matem%C3%A1tica").await;
        assert_eq!(titles(&math), vec!["Cálculo I".to_string()]);
        assert_eq!(
            catalog(&ctx, "category=Programa%C3%A7%C3%A3o&search=Rust").await["pagination"]["total"],
            2
        );
    }

    #[actix_web::test]
    async fn test_catalog_page_beyond_last_is_clamped() {
        let ctx = TestContext::new().await;
        let professor = ctx.professor("prof.paginas@example.com").await;
        ctx.course(&professor, "Rust Básico").await;
        ctx.course(&professor, "Rust Avançado").await;

        let huge = catalog(&ctx, "page=9223372036854775807&size=100").await;
        assert_eq!(huge["pagination"]["page"], 1);
        assert_eq!(titles(&huge).len(), 2);

        let second = catalog(&ctx, "page=5&size=1").await;
        assert_eq!(second["pagination"]["page"], 2);
        assert_eq!(second["pagination"]["total_pages"], 2);
        assert_eq!(titles(&second).len(), 1);
    }

    #[actix_web::test]
    async fn test_evaluating_again_replaces_previous_evaluation() {
        let ctx = TestContext::new().await;
        let professor = ctx.professor("prof.avaliacao@example.com").await;
        let student = ctx.student("aluno.avaliacao@example.com").await;
        let course = ctx.course(&professor, "Rust Básico").await;
        ctx.storage.enroll_student(student.id, course.id).await.unwrap();
        let app = test::init_service(ctx.app()).await;

        for grade in ["6", "9"] {
            let req = test::TestRequest::post()
                .uri(&format!("/cursos/{}/avaliar", course.id))
                .cookie(session_cookie(&student))
                .set_form([("grade", grade), ("comment", "Bom curso")])
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER);
            assert_eq!(
                flash_of(&resp).map(|f| f.message),
                Some("Obrigado pela sua avaliação!".to_string())
            );
        }

        let evaluations: Vec<_> = ctx
            .storage
            .list_student_course_exams(student.id, course.id)
            .await
            .unwrap()
            .into_iter()
            .filter(|exam| exam.kind == ExamKind::Evaluation)
            .collect();
        assert_eq!(evaluations.len(), 1);
        assert_eq!(evaluations[0].grade, 9.0);

        let summary = ctx
            .storage
            .get_course_evaluation_summary(course.id)
            .await
            .unwrap();
        assert_eq!(summary.count, 1);

        // 超出 0 到 10 的分数被拒绝
        let req = test::TestRequest::post()
            .uri(&format!("/cursos/{}/avaliar", course.id))
            .cookie(session_cookie(&student))
            .set_form([("grade", "11")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(flash_of(&resp).map(|f| f.kind), Some(crate::models::FlashKind::Error));
    }
}
