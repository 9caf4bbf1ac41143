use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{ElearningError, Result};

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    #[serde(rename = "STUDENT")]
    Student,
    #[serde(rename = "PROFESSOR")]
    Professor,
}

impl UserRole {
    pub const STUDENT: &'static str = "STUDENT";
    pub const PROFESSOR: &'static str = "PROFESSOR";

    pub fn all_roles() -> &'static [UserRole] {
        &[UserRole::Student, UserRole::Professor]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<UserRole>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Professor => write!(f, "{}", UserRole::PROFESSOR),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::PROFESSOR => Ok(UserRole::Professor),
            _ => Err(format!(
                "Perfil inválido: '{s}'. Perfis suportados: STUDENT, PROFESSOR"
            )),
        }
    }
}

/// 角色相关字段，按角色区分
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[serde(tag = "role")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum RoleProfile {
    #[serde(rename = "STUDENT")]
    Student,
    #[serde(rename = "PROFESSOR")]
    Professor { specialization: Option<String> },
}

impl RoleProfile {
    pub fn role(&self) -> UserRole {
        match self {
            RoleProfile::Student => UserRole::Student,
            RoleProfile::Professor { .. } => UserRole::Professor,
        }
    }

    pub fn specialization(&self) -> Option<&str> {
        match self {
            RoleProfile::Professor { specialization } => specialization.as_deref(),
            RoleProfile::Student => None,
        }
    }

    /// 从存储字段还原
    pub fn from_parts(role: UserRole, specialization: Option<String>) -> Self {
        match role {
            UserRole::Student => RoleProfile::Student,
            UserRole::Professor => RoleProfile::Professor { specialization },
        }
    }
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub profile: RoleProfile,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    pub fn role(&self) -> UserRole {
        self.profile.role()
    }

    pub fn is_professor(&self) -> bool {
        self.role() == UserRole::Professor
    }

    pub fn is_student(&self) -> bool {
        self.role() == UserRole::Student
    }

    /// 仅教授可执行的操作
    pub fn ensure_professor(&self) -> Result<()> {
        if self.is_professor() {
            Ok(())
        } else {
            Err(ElearningError::authorization(
                "Apenas professores podem realizar esta ação",
            ))
        }
    }

    /// 仅学生可执行的操作
    pub fn ensure_student(&self) -> Result<()> {
        if self.is_student() {
            Ok(())
        } else {
            Err(ElearningError::authorization(
                "Apenas alunos podem realizar esta ação",
            ))
        }
    }

    /// 精简信息，用于展示课程作者、评论者等
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            role: self.role(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!("professor".parse::<UserRole>(), Ok(UserRole::Professor));
        assert_eq!("STUDENT".parse::<UserRole>(), Ok(UserRole::Student));
        assert!("ADMIN".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_role_profile_carries_role_specific_fields() {
        let professor = RoleProfile::from_parts(UserRole::Professor, Some("Redes".into()));
        assert_eq!(professor.role(), UserRole::Professor);
        assert_eq!(professor.specialization(), Some("Redes"));

        let student = RoleProfile::from_parts(UserRole::Student, Some("ignored".into()));
        assert_eq!(student, RoleProfile::Student);
        assert_eq!(student.specialization(), None);
    }

    #[test]
    fn test_role_profile_json_shape() {
        let json = serde_json::to_value(RoleProfile::Professor {
            specialization: Some("Banco de Dados".into()),
        })
        .unwrap();
        assert_eq!(json["role"], "PROFESSOR");
        assert_eq!(json["specialization"], "Banco de Dados");
    }
}
