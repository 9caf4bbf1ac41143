pub mod delete;
pub mod detail;
pub mod form;
pub mod list;
pub mod save;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::{ElearningError, Result};
use crate::models::classrooms::entities::Classroom;
use crate::models::classrooms::requests::{ClassroomForm, DeleteClassroomForm};
use crate::storage::Storage;

pub struct ClassroomService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassroomService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 课程的课时列表
    pub async fn list_classrooms(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_classrooms(self, request).await
    }

    // 课时详情，学生打开时推进学习进度
    pub async fn get_classroom(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::classroom_detail(self, request, classroom_id).await
    }

    pub async fn new_classroom_form(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        form::new_classroom_form(request).await
    }

    pub async fn edit_classroom_form(
        &self,
        request: &HttpRequest,
        classroom_id: i64,
    ) -> ActixResult<HttpResponse> {
        form::edit_classroom_form(self, request, classroom_id).await
    }

    pub async fn save_classroom(
        &self,
        request: &HttpRequest,
        form: ClassroomForm,
    ) -> ActixResult<HttpResponse> {
        save::save_classroom(self, request, form).await
    }

    pub async fn delete_classroom(
        &self,
        request: &HttpRequest,
        form: DeleteClassroomForm,
    ) -> ActixResult<HttpResponse> {
        delete::delete_classroom(self, request, form).await
    }
}

/// 读取课时并确认它属于给定课程
pub(crate) async fn load_course_classroom(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    classroom_id: i64,
) -> Result<Classroom> {
    storage
        .get_classroom_by_id(classroom_id)
        .await?
        .filter(|classroom| classroom.course_id == course_id)
        .ok_or_else(|| ElearningError::not_found("Aula não encontrada"))
}

pub(crate) fn classrooms_path(course_id: i64) -> String {
    format!("/cursos/{course_id}/aulas")
}

pub(crate) fn classroom_path(course_id: i64, classroom_id: i64) -> String {
    format!("/cursos/{course_id}/aulas/{classroom_id}")
}
