pub mod login;
pub mod logout;
pub mod profile;
pub mod register;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::auth::requests::{LoginForm, RegisterForm, UpdateProfileForm};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
        super::cache_from_request(request)
    }

    // 登录页
    pub async fn login_page(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        login::login_page(request).await
    }

    // 登录验证
    pub async fn login(&self, request: &HttpRequest, form: LoginForm) -> ActixResult<HttpResponse> {
        login::handle_login(self, request, form).await
    }

    // 注册页
    pub async fn register_page(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        register::register_page(request).await
    }

    // 用户注册
    pub async fn register(
        &self,
        request: &HttpRequest,
        form: RegisterForm,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, request, form).await
    }

    // 登出
    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(self, request).await
    }

    // 个人资料
    pub async fn profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::profile_page(self, request).await
    }

    pub async fn update_profile(
        &self,
        request: &HttpRequest,
        form: UpdateProfileForm,
    ) -> ActixResult<HttpResponse> {
        profile::handle_update_profile(self, request, form).await
    }
}
