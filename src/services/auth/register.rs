use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use crate::errors::{ElearningError, Result};
use crate::models::Flash;
use crate::models::auth::{requests::RegisterForm, responses::RegisterPage};
use crate::models::common::form::non_blank;
use crate::models::users::{
    entities::{RoleProfile, UserRole},
    requests::CreateUserRequest,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_name, validate_password_simple};
use crate::utils::view::{current_user, redirect, redirect_with_flash, render, render_invalid};

use super::AuthService;

const REGISTER_VIEW: &str = "auth/cadastro";

pub async fn register_page(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if current_user(request).is_some() {
        return Ok(redirect("/"));
    }
    Ok(render(
        request,
        REGISTER_VIEW,
        RegisterPage::new(RegisterForm::default(), None),
    ))
}

/// 校验注册表单，返回规范化后的邮箱与角色资料
fn validate_register_form(form: &RegisterForm) -> Result<(String, RoleProfile)> {
    validate_name(form.name.trim()).map_err(ElearningError::validation)?;

    let email = form.email.trim().to_lowercase();
    validate_email(&email).map_err(ElearningError::validation)?;

    validate_password_simple(&form.password).map_err(ElearningError::validation)?;
    if form.password != form.password_confirmation {
        return Err(ElearningError::validation("As senhas não conferem"));
    }

    let role = form
        .role
        .parse::<UserRole>()
        .map_err(ElearningError::validation)?;
    let profile = RoleProfile::from_parts(role, non_blank(form.specialization.as_deref()));

    Ok((email, profile))
}

pub async fn handle_register(
    service: &AuthService,
    request: &HttpRequest,
    form: RegisterForm,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let (email, profile) = match validate_register_form(&form) {
        Ok(valid) => valid,
        Err(e) => {
            return Ok(render_invalid(
                request,
                REGISTER_VIEW,
                RegisterPage::new(form, Some(e.message().to_string())),
            ));
        }
    };

    // 邮箱唯一
    match storage.get_user_by_email(&email).await {
        Ok(Some(_)) => {
            return Ok(render_invalid(
                request,
                REGISTER_VIEW,
                RegisterPage::new(form, Some("Este e-mail já está cadastrado".to_string())),
            ));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check email uniqueness: {}", e);
            return Ok(render_invalid(
                request,
                REGISTER_VIEW,
                RegisterPage::new(form, Some("Erro técnico ao realizar cadastro".to_string())),
            ));
        }
    }

    let password_hash = match hash_password(&form.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Failed to hash password: {}", e);
            return Ok(render_invalid(
                request,
                REGISTER_VIEW,
                RegisterPage::new(form, Some("Erro técnico ao realizar cadastro".to_string())),
            ));
        }
    };

    let create_request = CreateUserRequest {
        name: form.name.trim().to_string(),
        email,
        password: password_hash,
        profile,
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            info!("User {} registered as {}", user.id, user.role());
            Ok(redirect_with_flash(
                "/login",
                Flash::success("Cadastro realizado com sucesso! Faça login para continuar"),
            ))
        }
        Err(e) => {
            error!("Failed to create user: {}", e);
            Ok(render_invalid(
                request,
                REGISTER_VIEW,
                RegisterPage::new(form, Some("Erro técnico ao realizar cadastro".to_string())),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, confirmation: &str, role: &str) -> RegisterForm {
        RegisterForm {
            name: "Maria Silva".into(),
            email: " Maria@Example.com ".into(),
            password: password.into(),
            password_confirmation: confirmation.into(),
            role: role.into(),
            specialization: Some("Matemática".into()),
        }
    }

    #[test]
    fn test_valid_professor_registration() {
        let (email, profile) =
            validate_register_form(&form("aprender2024", "aprender2024", "PROFESSOR")).unwrap();
        assert_eq!(email, "maria@example.com");
        assert_eq!(profile.specialization(), Some("Matemática"));
    }

    #[test]
    fn test_student_drops_specialization() {
        let (_, profile) =
            validate_register_form(&form("aprender2024", "aprender2024", "STUDENT")).unwrap();
        assert_eq!(profile, RoleProfile::Student);
    }

    #[test]
    fn test_invalid_registrations() {
        let mismatch = validate_register_form(&form("aprender2024", "aprender2025", "STUDENT"));
        assert_eq!(mismatch.unwrap_err().message(), "As senhas não conferem");

        assert!(validate_register_form(&form("curta1", "curta1", "STUDENT")).is_err());
        assert!(validate_register_form(&form("aprender2024", "aprender2024", "ADMIN")).is_err());
    }
}
