pub mod answer;
pub mod create;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::doubts::requests::{AnswerForm, DoubtForm};
use crate::storage::Storage;

pub struct DoubtService {
    storage: Option<Arc<dyn Storage>>,
}

impl DoubtService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 已选课学生提问
    pub async fn create_doubt(
        &self,
        request: &HttpRequest,
        form: DoubtForm,
    ) -> ActixResult<HttpResponse> {
        create::create_doubt(self, request, form).await
    }

    // 课程所有者回答
    pub async fn answer_doubt(
        &self,
        request: &HttpRequest,
        doubt_id: i64,
        form: AnswerForm,
    ) -> ActixResult<HttpResponse> {
        answer::answer_doubt(self, request, doubt_id, form).await
    }
}
