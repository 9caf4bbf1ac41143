pub mod answer;
pub mod contact;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::doubts::requests::AnswerForm;
use crate::models::visitor_questions::requests::{ContactForm, VisitorQuestionQuery};
use crate::storage::Storage;

pub(crate) const VISITOR_QUESTIONS_PATH: &str = "/professor/perguntas-visitantes";

pub struct VisitorQuestionService {
    storage: Option<Arc<dyn Storage>>,
}

impl VisitorQuestionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub async fn contact_page(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        contact::contact_page(request).await
    }

    // 访客提交联系表单
    pub async fn send_question(
        &self,
        request: &HttpRequest,
        form: ContactForm,
    ) -> ActixResult<HttpResponse> {
        contact::send_question(self, request, form).await
    }

    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        query: VisitorQuestionQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_questions(self, request, query).await
    }

    pub async fn answer_question(
        &self,
        request: &HttpRequest,
        question_id: i64,
        form: AnswerForm,
    ) -> ActixResult<HttpResponse> {
        answer::answer_question(self, request, question_id, form).await
    }
}
