use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, info};

use crate::errors::{ElearningError, Result};
use crate::middlewares::RequireSession;
use crate::models::Flash;
use crate::models::auth::{requests::UpdateProfileForm, responses::ProfilePage};
use crate::models::common::form::non_blank;
use crate::models::users::{entities::User, requests::UpdateUserRequest};
use crate::storage::Storage;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::session::SessionUtils;
use crate::utils::validate::{validate_name, validate_password_simple};
use crate::utils::view::{redirect_with_flash, render, render_invalid};

use super::AuthService;

const PROFILE_VIEW: &str = "perfil";
const PROFILE_PATH: &str = "/perfil";

/// 学生加载选课与提问，教授加载自己的课程
async fn load_profile_page(storage: &Arc<dyn Storage>, user: User) -> Result<ProfilePage> {
    let (enrollments, doubts, courses) = if user.is_student() {
        (
            storage.list_student_enrollments(user.id).await?,
            storage.list_student_doubts(user.id).await?,
            Vec::new(),
        )
    } else {
        (
            Vec::new(),
            Vec::new(),
            storage.list_courses_by_professor(user.id).await?,
        )
    };

    Ok(ProfilePage {
        user,
        enrollments,
        courses,
        doubts,
        form: None,
        error: None,
    })
}

pub async fn profile_page(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some(user) = RequireSession::extract_user(request) else {
        return Ok(redirect_with_flash("/login", Flash::error("Faça login para continuar")));
    };
    let storage = service.get_storage(request)?;

    match load_profile_page(&storage, user).await {
        Ok(page) => Ok(render(request, PROFILE_VIEW, page)),
        Err(e) => {
            error!("Failed to load profile page: {}", e);
            Ok(redirect_with_flash(
                "/",
                Flash::error("Erro técnico ao carregar o perfil"),
            ))
        }
    }
}

/// 校验资料更新：修改密码需要提供当前密码
fn build_update(user: &User, form: &UpdateProfileForm) -> Result<UpdateUserRequest> {
    let name = non_blank(form.name.as_deref());
    if let Some(ref name) = name {
        validate_name(name).map_err(ElearningError::validation)?;
    }

    let password = match non_blank(form.new_password.as_deref()) {
        None => None,
        Some(new_password) => {
            let current = form.current_password.as_deref().unwrap_or_default();
            if !verify_password(current, &user.password_hash) {
                return Err(ElearningError::authentication("Senha atual incorreta"));
            }
            validate_password_simple(&new_password).map_err(ElearningError::validation)?;
            Some(hash_password(&new_password)?)
        }
    };

    Ok(UpdateUserRequest {
        name,
        password,
        specialization: user.is_professor().then(|| form.specialization.clone().unwrap_or_default()),
    })
}

pub async fn handle_update_profile(
    service: &AuthService,
    request: &HttpRequest,
    form: UpdateProfileForm,
) -> ActixResult<HttpResponse> {
    let Some(session_user) = RequireSession::extract_user(request) else {
        return Ok(redirect_with_flash("/login", Flash::error("Faça login para continuar")));
    };
    let storage = service.get_storage(request)?;

    // 会话缓存中的用户不含密码哈希，从存储重新读取
    let user = match storage.get_user_by_id(session_user.id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(redirect_with_flash("/login", Flash::error("Faça login para continuar")));
        }
        Err(e) => {
            error!("Failed to load user {}: {}", session_user.id, e);
            return Ok(redirect_with_flash(
                PROFILE_PATH,
                Flash::error("Erro técnico ao atualizar o perfil"),
            ));
        }
    };

    let update = match build_update(&user, &form) {
        Ok(update) => update,
        Err(e) if !e.is_technical() => {
            let message = e.message().to_string();
            return match load_profile_page(&storage, user).await {
                Ok(mut page) => {
                    page.form = Some(form);
                    page.error = Some(message);
                    Ok(render_invalid(request, PROFILE_VIEW, page))
                }
                Err(load_err) => {
                    error!("Failed to load profile page: {}", load_err);
                    Ok(redirect_with_flash(PROFILE_PATH, Flash::error(message)))
                }
            };
        }
        Err(e) => {
            error!("Failed to prepare profile update: {}", e);
            return Ok(redirect_with_flash(
                PROFILE_PATH,
                Flash::error("Erro técnico ao atualizar o perfil"),
            ));
        }
    };

    match storage.update_user(user.id, update).await {
        Ok(_) => {
            // 让会话下次从存储读取新资料
            if let Some(claims) = RequireSession::extract_claims(request) {
                let cache = service.get_cache(request)?;
                cache.remove(&SessionUtils::user_cache_key(&claims.sid)).await;
            }
            info!("User {} updated the profile", user.id);
            Ok(redirect_with_flash(
                PROFILE_PATH,
                Flash::success("Perfil atualizado com sucesso"),
            ))
        }
        Err(e) => {
            error!("Failed to update user {}: {}", user.id, e);
            Ok(redirect_with_flash(
                PROFILE_PATH,
                Flash::error("Erro técnico ao atualizar o perfil"),
            ))
        }
    }
}
