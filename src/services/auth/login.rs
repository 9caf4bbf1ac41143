use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::models::Flash;
use crate::models::auth::{requests::LoginForm, responses::LoginPage};
use crate::utils::password::verify_password;
use crate::utils::session::SessionUtils;
use crate::utils::view::{current_user, redirect, render, render_invalid};

use super::AuthService;

const LOGIN_VIEW: &str = "auth/login";
const INVALID_CREDENTIALS: &str = "E-mail ou senha inválidos";

pub async fn login_page(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if current_user(request).is_some() {
        return Ok(redirect("/"));
    }
    Ok(render(request, LOGIN_VIEW, LoginPage::default()))
}

fn login_error(request: &HttpRequest, email: &str, message: &str) -> HttpResponse {
    render_invalid(
        request,
        LOGIN_VIEW,
        LoginPage {
            email: Some(email.to_string()),
            error: Some(message.to_string()),
        },
    )
}

pub async fn handle_login(
    service: &AuthService,
    request: &HttpRequest,
    form: LoginForm,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let email = form.email.trim().to_lowercase();

    if email.is_empty() || form.password.is_empty() {
        return Ok(login_error(request, &email, "Informe e-mail e senha"));
    }

    // 1. 根据邮箱获取用户信息
    let user = match storage.get_user_by_email(&email).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(login_error(request, &email, INVALID_CREDENTIALS)),
        Err(e) => {
            error!("Failed to load user for login: {}", e);
            return Ok(login_error(request, &email, "Erro técnico ao realizar login"));
        }
    };

    // 2. 验证密码
    if !verify_password(&form.password, &user.password_hash) {
        info!("Failed login attempt for user {}", user.id);
        return Ok(login_error(request, &email, INVALID_CREDENTIALS));
    }

    // 3. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        error!("Failed to update last login of user {}: {}", user.id, e);
    }

    // 4. 签发会话
    match SessionUtils::issue(&user, form.remember_me) {
        Ok((token, _claims)) => {
            info!("User {} logged in successfully", user.id);
            Ok(HttpResponse::SeeOther()
                .insert_header((actix_web::http::header::LOCATION, "/"))
                .cookie(SessionUtils::session_cookie(&token, form.remember_me))
                .cookie(crate::utils::view::flash_cookie(&Flash::success(format!(
                    "Bem-vindo(a), {}!",
                    user.name
                ))))
                .finish())
        }
        Err(e) => {
            error!("Failed to issue session token: {}", e);
            Ok(login_error(request, &email, "Erro técnico ao realizar login"))
        }
    }
}
