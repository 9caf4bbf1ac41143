pub mod comment;
pub mod delete;
pub mod detail;
pub mod enroll;
pub mod evaluate;
pub mod form;
pub mod home;
pub mod list;
pub mod save;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::comments::requests::CommentForm;
use crate::models::courses::requests::{CourseForm, CourseQueryParams, EvaluationForm};
use crate::storage::Storage;

pub struct CourseService {
    storage: Option<Arc<dyn Storage>>,
}

impl CourseService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 首页：最新课程
    pub async fn home(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        home::home_page(self, request).await
    }

    // 课程目录
    pub async fn list_courses(
        &self,
        request: &HttpRequest,
        query: CourseQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_courses(self, request, query).await
    }

    // 课程详情
    pub async fn get_course(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        detail::course_detail(self, request, course_id).await
    }

    pub async fn new_course_form(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        form::new_course_form(request).await
    }

    pub async fn edit_course_form(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        form::edit_course_form(request).await
    }

    // 新建或更新课程
    pub async fn save_course(
        &self,
        request: &HttpRequest,
        form: CourseForm,
    ) -> ActixResult<HttpResponse> {
        save::save_course(self, request, form).await
    }

    pub async fn delete_course(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_course(self, request).await
    }

    // 学生选课
    pub async fn enroll(&self, request: &HttpRequest, course_id: i64) -> ActixResult<HttpResponse> {
        enroll::enroll(self, request, course_id).await
    }

    pub async fn comment(
        &self,
        request: &HttpRequest,
        course_id: i64,
        form: CommentForm,
    ) -> ActixResult<HttpResponse> {
        comment::comment(self, request, course_id, form).await
    }

    // 课程评价
    pub async fn evaluate(
        &self,
        request: &HttpRequest,
        form: EvaluationForm,
    ) -> ActixResult<HttpResponse> {
        evaluate::evaluate(self, request, form).await
    }
}
