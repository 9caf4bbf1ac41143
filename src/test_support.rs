//! 测试辅助：内存数据库、缓存、测试应用与会话 cookie

use actix_web::{
    App, Error,
    body::MessageBody,
    cookie::Cookie,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web,
};
use std::sync::Arc;

use crate::cache::{ObjectCache, register};
use crate::config::AppConfig;
use crate::middlewares::RequireSession;
use crate::models::courses::entities::Course;
use crate::models::courses::requests::{CourseFields, CreateCourseRequest};
use crate::models::users::entities::{RoleProfile, User};
use crate::models::users::requests::CreateUserRequest;
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
use crate::utils::password::hash_password;
use crate::utils::{SessionUtils, form_error_handler, query_error_handler};

pub const TEST_PASSWORD: &str = "Senha@123";

/// 使用内置默认值初始化全局配置
pub fn init_config() {
    let _ = AppConfig::get();
}

pub struct TestContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

impl TestContext {
    pub async fn new() -> Self {
        init_config();
        register::register_builtin_plugins();

        // 单连接，保证整个测试看到同一个内存数据库
        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 10)
            .await
            .expect("in-memory storage");
        let constructor = register::get_object_cache_plugin("moka").expect("moka plugin");
        let cache = constructor().await.expect("moka cache");

        Self {
            storage: Arc::new(storage),
            cache: Arc::from(cache),
        }
    }

    pub async fn create_user(&self, email: &str, profile: RoleProfile) -> User {
        self.storage
            .create_user(CreateUserRequest {
                name: "Usuário de Teste".to_string(),
                email: email.to_string(),
                password: hash_password(TEST_PASSWORD).expect("hash"),
                profile,
            })
            .await
            .expect("create user")
    }

    pub async fn professor(&self, email: &str) -> User {
        self.create_user(
            email,
            RoleProfile::Professor {
                specialization: Some("Computação".to_string()),
            },
        )
        .await
    }

    pub async fn student(&self, email: &str) -> User {
        self.create_user(email, RoleProfile::Student).await
    }

    pub async fn course(&self, professor: &User, title: &str) -> Course {
        self.storage
            .create_course(CreateCourseRequest {
                professor_id: professor.id,
                fields: CourseFields {
                    title: title.to_string(),
                    description: Some("Descrição".to_string()),
                    price: 0.0,
                    category: Some("Programação".to_string()),
                    hours: 10,
                },
            })
            .await
            .expect("create course")
    }

    /// 与正式启动相同的中间件与路由
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .wrap(RequireSession::optional())
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .app_data(web::FormConfig::default().error_handler(form_error_handler))
            .app_data(web::Data::new(self.storage.clone()))
            .app_data(web::Data::new(self.cache.clone()))
            .configure(crate::routes::configure_auth_routes)
            .configure(crate::routes::configure_courses_routes)
            .configure(crate::routes::configure_newsletter_routes)
            .configure(crate::routes::configure_visitor_question_routes)
            .configure(crate::routes::configure_frontend_routes)
    }
}

/// 直接签发会话 cookie，避免反复走登录接口
pub fn session_cookie(user: &User) -> Cookie<'static> {
    let (token, _) = SessionUtils::issue(user, false).expect("issue session");
    SessionUtils::session_cookie(&token, false)
}

/// 重定向响应中的闪存消息
pub fn flash_of<B>(response: &ServiceResponse<B>) -> Option<crate::models::Flash> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == crate::utils::view::FLASH_COOKIE)
        .and_then(|cookie| crate::utils::view::decode_flash(cookie.value()))
}

pub fn location_of<B>(response: &ServiceResponse<B>) -> Option<String> {
    response
        .headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
