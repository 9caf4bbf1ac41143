//! 路径参数提取器
//!
//! 非法 ID 不返回 actix 默认的纯文本 404，而是带提示重定向到课程列表。

use actix_web::{FromRequest, HttpRequest, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::Flash;
use crate::utils::view::redirect_with_flash;

fn parse_path_id(req: &HttpRequest, name: &str) -> Result<i64, actix_web::Error> {
    req.match_info()
        .get(name)
        .and_then(|raw| raw.parse::<i64>().ok())
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            tracing::debug!("Invalid path parameter '{}' on {}", name, req.path());
            InternalError::from_response(
                format!("invalid {name}"),
                redirect_with_flash("/cursos", Flash::error("Recurso não encontrado")),
            )
            .into()
        })
}

macro_rules! define_safe_id_extractor {
    ($(#[$meta:meta])* $name:ident, $param:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_path_id(req, $param).map($name))
            }
        }
    };
}

define_safe_id_extractor!(
    /// 通用 `{id}`（课程、访客提问）
    SafeIDI64,
    "id"
);
define_safe_id_extractor!(SafeClassroomIdI64, "aula_id");
define_safe_id_extractor!(SafeExerciseIdI64, "exercicio_id");
define_safe_id_extractor!(SafeExamIdI64, "exame_id");
define_safe_id_extractor!(SafeQuestionIdI64, "questao_id");
define_safe_id_extractor!(SafeDoubtIdI64, "duvida_id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_and_invalid_ids() {
        let req = TestRequest::default()
            .param("id", "12")
            .param("aula_id", "abc")
            .to_http_request();

        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id, SafeIDI64(12));

        let err = SafeClassroomIdI64::extract(&req).await.unwrap_err();
        let resp = err.error_response();
        assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn test_non_positive_id_is_rejected() {
        let req = TestRequest::default().param("id", "0").to_http_request();
        assert!(SafeIDI64::extract(&req).await.is_err());
    }
}
