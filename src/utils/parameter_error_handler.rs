use actix_web::{
    Error, HttpRequest,
    error::{InternalError, QueryPayloadError, UrlencodedError},
};
use tracing::debug;

use crate::models::Flash;
use crate::utils::view::{back_location, redirect_with_flash};

/// 表单解析失败：带提示返回上一页
pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> Error {
    debug!("Form payload rejected on {}: {}", req.path(), err);
    let response = redirect_with_flash(
        &back_location(req),
        Flash::error("Não foi possível ler os dados enviados no formulário"),
    );
    InternalError::from_response(err, response).into()
}

/// 查询参数解析失败
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    debug!("Query string rejected on {}: {}", req.path(), err);
    let response = redirect_with_flash(req.path(), Flash::error("Parâmetros de busca inválidos"));
    InternalError::from_response(err, response).into()
}
