use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::models::Flash;
use crate::models::visitor_questions::requests::ContactForm;
use crate::models::visitor_questions::responses::ContactPage;
use crate::utils::view::{redirect_with_flash, render, render_invalid};

use super::VisitorQuestionService;

const CONTACT_VIEW: &str = "contato";

pub async fn contact_page(request: &HttpRequest) -> ActixResult<HttpResponse> {
    Ok(render(request, CONTACT_VIEW, ContactPage::default()))
}

pub async fn send_question(
    service: &VisitorQuestionService,
    request: &HttpRequest,
    form: ContactForm,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let question = match form.validate() {
        Ok(question) => question,
        Err(e) => {
            return Ok(render_invalid(
                request,
                CONTACT_VIEW,
                ContactPage {
                    error: Some(e.message().to_string()),
                    form,
                },
            ));
        }
    };

    match storage.create_visitor_question(question).await {
        Ok(created) => {
            info!("Visitor question {} received", created.id);
            Ok(redirect_with_flash(
                "/contato",
                Flash::success("Mensagem enviada! Responderemos em breve"),
            ))
        }
        Err(e) => {
            error!("Failed to save visitor question: {}", e);
            Ok(render_invalid(
                request,
                CONTACT_VIEW,
                ContactPage {
                    error: Some("Erro técnico ao enviar a mensagem".to_string()),
                    form,
                },
            ))
        }
    }
}
