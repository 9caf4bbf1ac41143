//! 会话令牌
//!
//! 登录后签发一个 JWT 放在 HttpOnly cookie 中，`sid` 用于服务端撤销。

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::User;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub sub: String,  // 用户 ID
    pub role: String, // 用户角色
    pub sid: String,  // 会话 ID (UUID)
    pub iat: usize,
    pub exp: usize,
}

impl SessionClaims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }

    /// 距离过期的剩余秒数，用于撤销标记的 TTL
    pub fn remaining_secs(&self) -> u64 {
        let now = chrono::Utc::now().timestamp().max(0) as usize;
        self.exp.saturating_sub(now) as u64
    }
}

pub struct SessionUtils;

impl SessionUtils {
    fn get_secret() -> String {
        AppConfig::get().session.secret.clone()
    }

    fn lifetime(remember_me: bool) -> chrono::Duration {
        let config = AppConfig::get();
        if remember_me {
            chrono::Duration::days(config.session.remember_me_expiry)
        } else {
            chrono::Duration::minutes(config.session.expiry)
        }
    }

    /// 为用户签发新会话
    pub fn issue(user: &User, remember_me: bool) -> Result<(String, SessionClaims)> {
        let now = chrono::Utc::now();
        let expiration = now + Self::lifetime(remember_me);

        let claims = SessionClaims {
            sub: user.id.to_string(),
            role: user.role().to_string(),
            sid: uuid::Uuid::new_v4().to_string(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        let secret = Self::get_secret();
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )?;
        Ok((token, claims))
    }

    /// 校验签名与过期时间
    pub fn verify(token: &str) -> Result<SessionClaims> {
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let data = decode::<SessionClaims>(token, &decoding_key, &Validation::default())?;
        Ok(data.claims)
    }

    pub fn session_cookie(token: &str, remember_me: bool) -> Cookie<'static> {
        let config = AppConfig::get();
        let lifetime = Self::lifetime(remember_me);
        Cookie::build(config.session.cookie_name.clone(), token.to_string())
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(
                lifetime.num_seconds(),
            ))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    /// 空 cookie，max_age=0 让浏览器删除会话
    pub fn empty_session_cookie() -> Cookie<'static> {
        let config = AppConfig::get();
        Cookie::build(config.session.cookie_name.clone(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(config.is_production())
            .finish()
    }

    pub fn extract_token(req: &HttpRequest) -> Option<String> {
        let name = &AppConfig::get().session.cookie_name;
        req.cookie(name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    pub fn user_cache_key(sid: &str) -> String {
        format!("session:{sid}")
    }

    pub fn revoked_cache_key(sid: &str) -> String {
        format!("revoked:{sid}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::RoleProfile;

    fn professor() -> User {
        User {
            id: 42,
            name: "Ana Souza".into(),
            email: "ana@example.com".into(),
            password_hash: String::new(),
            profile: RoleProfile::Professor {
                specialization: None,
            },
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_issue_and_verify() {
        crate::test_support::init_config();
        let (token, claims) = SessionUtils::issue(&professor(), false).unwrap();
        let verified = SessionUtils::verify(&token).unwrap();

        assert_eq!(verified, claims);
        assert_eq!(verified.user_id(), Some(42));
        assert_eq!(verified.role, "PROFESSOR");
        assert!(verified.remaining_secs() > 0);
    }

    #[test]
    fn test_each_session_gets_its_own_sid() {
        crate::test_support::init_config();
        let (_, first) = SessionUtils::issue(&professor(), false).unwrap();
        let (_, second) = SessionUtils::issue(&professor(), false).unwrap();
        assert_ne!(first.sid, second.sid);
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        crate::test_support::init_config();
        let (token, _) = SessionUtils::issue(&professor(), true).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(SessionUtils::verify(&tampered).is_err());
        assert!(SessionUtils::verify("not-a-token").is_err());
    }

    #[test]
    fn test_remember_me_lasts_longer() {
        crate::test_support::init_config();
        let short = SessionUtils::session_cookie("t", false);
        let long = SessionUtils::session_cookie("t", true);
        assert!(long.max_age() > short.max_age());
        assert!(short.http_only().unwrap_or(false));
    }
}
