use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{ElearningError, Result};
use crate::models::users::entities::User;

// 疑问状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/doubt.ts")]
pub enum DoubtStatus {
    #[serde(rename = "ABERTA")]
    Open,
    #[serde(rename = "RESPONDIDA")]
    Answered,
}

impl DoubtStatus {
    pub const OPEN: &'static str = "ABERTA";
    pub const ANSWERED: &'static str = "RESPONDIDA";
}

impl<'de> Deserialize<'de> for DoubtStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DoubtStatus>().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for DoubtStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DoubtStatus::Open => write!(f, "{}", DoubtStatus::OPEN),
            DoubtStatus::Answered => write!(f, "{}", DoubtStatus::ANSWERED),
        }
    }
}

impl std::str::FromStr for DoubtStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            DoubtStatus::OPEN => Ok(DoubtStatus::Open),
            DoubtStatus::ANSWERED => Ok(DoubtStatus::Answered),
            _ => Err(format!("Invalid doubt status: {s}")),
        }
    }
}

// 学生在课程中提出的疑问
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/doubt.ts")]
pub struct Doubt {
    pub id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub question: String,
    pub answer: Option<String>,
    pub professor_id: Option<i64>,
    pub status: DoubtStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub answered_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Doubt {
    pub fn is_answered(&self) -> bool {
        self.status == DoubtStatus::Answered
    }

    /// 回答疑问：仅教授可回答，且只能回答一次。
    /// 成功后记录回答的教授与时间，状态变为 RESPONDIDA。
    pub fn answer(&mut self, professor: &User, text: &str) -> Result<()> {
        professor.ensure_professor()?;
        if self.is_answered() {
            return Err(ElearningError::conflict("Esta dúvida já foi respondida"));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(ElearningError::validation("A resposta não pode ser vazia"));
        }

        self.answer = Some(text.to_string());
        self.professor_id = Some(professor.id);
        self.answered_at = Some(chrono::Utc::now());
        self.status = DoubtStatus::Answered;
        Ok(())
    }
}

// 带提问学生姓名的疑问
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/doubt.ts")]
pub struct DoubtView {
    pub doubt: Doubt,
    pub student_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::RoleProfile;

    fn user(id: i64, profile: RoleProfile) -> User {
        let now = chrono::Utc::now();
        User {
            id,
            name: format!("user{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            profile,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn open_doubt() -> Doubt {
        Doubt {
            id: 1,
            course_id: 1,
            student_id: 2,
            question: "Como funciona o borrow checker?".into(),
            answer: None,
            professor_id: None,
            status: DoubtStatus::Open,
            created_at: chrono::Utc::now(),
            answered_at: None,
        }
    }

    #[test]
    fn test_answer_by_professor_marks_answered() {
        let professor = user(10, RoleProfile::Professor { specialization: None });
        let mut doubt = open_doubt();
        assert_eq!(doubt.status, DoubtStatus::Open);

        doubt.answer(&professor, " Verifica empréstimos em tempo de compilação ").unwrap();
        assert_eq!(doubt.status, DoubtStatus::Answered);
        assert_eq!(doubt.professor_id, Some(10));
        assert!(doubt.answered_at.is_some());
        assert_eq!(
            doubt.answer.as_deref(),
            Some("Verifica empréstimos em tempo de compilação")
        );
    }

    #[test]
    fn test_student_cannot_answer() {
        let student = user(2, RoleProfile::Student);
        let mut doubt = open_doubt();
        let err = doubt.answer(&student, "resposta").unwrap_err();
        assert_eq!(err.code(), "E011");
        assert_eq!(doubt.status, DoubtStatus::Open);
        assert!(doubt.professor_id.is_none());
    }

    #[test]
    fn test_blank_or_repeated_answer_keeps_state() {
        let professor = user(10, RoleProfile::Professor { specialization: None });
        let mut doubt = open_doubt();
        assert!(doubt.answer(&professor, "   ").is_err());
        assert_eq!(doubt.status, DoubtStatus::Open);

        doubt.answer(&professor, "primeira").unwrap();
        assert!(doubt.answer(&professor, "segunda").is_err());
        assert_eq!(doubt.answer.as_deref(), Some("primeira"));
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_value(DoubtStatus::Open).unwrap(), "ABERTA");
        assert_eq!("RESPONDIDA".parse::<DoubtStatus>(), Ok(DoubtStatus::Answered));
    }
}
