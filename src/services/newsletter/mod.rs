//! 邮件订阅：订阅与取消订阅都回到表单所在页面

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use crate::models::Flash;
use crate::models::newsletter::requests::NewsletterForm;
use crate::storage::Storage;
use crate::utils::view::{redirect_with_flash, safe_location};

use super::failure_redirect;

pub struct NewsletterService {
    storage: Option<Arc<dyn Storage>>,
}

impl NewsletterService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    /// 已存在的邮箱会被重新激活
    pub async fn subscribe(
        &self,
        request: &HttpRequest,
        form: NewsletterForm,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let location = safe_location(form.redirect_to.as_deref());

        let (email, name) = match form.validate() {
            Ok(validated) => validated,
            Err(e) => return Ok(redirect_with_flash(&location, Flash::error(e.message()))),
        };

        match storage.subscribe_newsletter(&email, name).await {
            Ok(inscription) => {
                info!("Newsletter inscription {} active", inscription.id);
                Ok(redirect_with_flash(
                    &location,
                    Flash::success("Inscrição na newsletter realizada com sucesso"),
                ))
            }
            Err(e) => Ok(failure_redirect(
                &location,
                "Erro técnico ao realizar a inscrição",
                &e,
            )),
        }
    }

    pub async fn unsubscribe(
        &self,
        request: &HttpRequest,
        form: NewsletterForm,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let location = safe_location(form.redirect_to.as_deref());

        let (email, _) = match form.validate() {
            Ok(validated) => validated,
            Err(e) => return Ok(redirect_with_flash(&location, Flash::error(e.message()))),
        };

        match storage.unsubscribe_newsletter(&email).await {
            Ok(true) => Ok(redirect_with_flash(
                &location,
                Flash::success("Inscrição cancelada"),
            )),
            Ok(false) => Ok(redirect_with_flash(
                &location,
                Flash::info("Este e-mail não está inscrito na newsletter"),
            )),
            Err(e) => Ok(failure_redirect(
                &location,
                "Erro técnico ao cancelar a inscrição",
                &e,
            )),
        }
    }
}
