pub mod form;
pub mod grades;
pub mod list;
pub mod publish;
pub mod questions;
pub mod save;
pub mod scoring;
pub mod submit;
pub mod take;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{ElearningError, Result};
use crate::models::exams::entities::ExamDefinition;
use crate::models::exams::requests::{ExamDefinitionForm, ExamQuestionForm};
use crate::storage::Storage;

pub struct ExamService {
    storage: Option<Arc<dyn Storage>>,
}

impl ExamService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 考试列表：所有者看到全部，学生只看到已发布
    pub async fn list_exams(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_exams(self, request).await
    }

    pub async fn new_exam_form(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        form::new_exam_form(request).await
    }

    pub async fn edit_exam_form(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        form::edit_exam_form(self, request, exam_id).await
    }

    pub async fn save_exam(
        &self,
        request: &HttpRequest,
        form: ExamDefinitionForm,
    ) -> ActixResult<HttpResponse> {
        save::save_exam(self, request, form).await
    }

    pub async fn publish_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        publish::set_published(self, request, exam_id, true).await
    }

    pub async fn unpublish_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        publish::set_published(self, request, exam_id, false).await
    }

    pub async fn delete_exam(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        publish::delete_exam(self, request, exam_id).await
    }

    pub async fn questions_page(
        &self,
        request: &HttpRequest,
        exam_id: i64,
    ) -> ActixResult<HttpResponse> {
        questions::questions_page(self, request, exam_id).await
    }

    pub async fn add_question(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        form: ExamQuestionForm,
    ) -> ActixResult<HttpResponse> {
        questions::add_question(self, request, exam_id, form).await
    }

    pub async fn delete_question(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        question_id: i64,
    ) -> ActixResult<HttpResponse> {
        questions::delete_question(self, request, exam_id, question_id).await
    }

    pub async fn take_exam(&self, request: &HttpRequest, exam_id: i64) -> ActixResult<HttpResponse> {
        take::take_exam(self, request, exam_id).await
    }

    // 提交作答并自动判分
    pub async fn submit_exam(
        &self,
        request: &HttpRequest,
        exam_id: i64,
        form: HashMap<String, String>,
    ) -> ActixResult<HttpResponse> {
        submit::submit_exam(self, request, exam_id, form).await
    }

    pub async fn my_grades(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        grades::my_grades(self, request).await
    }
}

/// 读取考试模板并确认它属于给定课程
pub(crate) async fn load_course_exam(
    storage: &Arc<dyn Storage>,
    course_id: i64,
    exam_id: i64,
) -> Result<ExamDefinition> {
    storage
        .get_exam_definition_by_id(exam_id)
        .await?
        .filter(|exam| exam.course_id == course_id)
        .ok_or_else(|| ElearningError::not_found("Exame não encontrado"))
}

pub(crate) fn exams_path(course_id: i64) -> String {
    format!("/cursos/{course_id}/exames")
}

pub(crate) fn questions_path(course_id: i64, exam_id: i64) -> String {
    format!("/cursos/{course_id}/exames/{exam_id}/questoes")
}
