use super::entities::RoleProfile;

// 用户创建请求（用于存储层，password 已经是哈希值）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile: RoleProfile,
}

// 用户更新请求（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
    pub specialization: Option<String>,
}
