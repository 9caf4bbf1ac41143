use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{ElearningError, Result};
use crate::models::common::form::non_blank;
use crate::utils::validate::validate_url;

// 课时表单：新建与编辑共用
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct ClassroomForm {
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub content_url: Option<String>,
    pub sequence: Option<String>,
}

/// 校验后的课时字段，sequence 为空时追加到末尾
#[derive(Debug, Clone, PartialEq)]
pub struct ClassroomFields {
    pub title: String,
    pub description: Option<String>,
    pub content_url: Option<String>,
    pub sequence: Option<i32>,
}

impl ClassroomForm {
    pub fn classroom_id(&self) -> Result<Option<i64>> {
        match non_blank(self.id.as_deref()) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ElearningError::validation("Aula inválida")),
        }
    }

    pub fn validate(&self) -> Result<ClassroomFields> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ElearningError::validation("O título da aula é obrigatório"));
        }

        let content_url = non_blank(self.content_url.as_deref());
        if let Some(url) = &content_url {
            validate_url(url).map_err(ElearningError::validation)?;
        }

        let sequence = match non_blank(self.sequence.as_deref()) {
            None => None,
            Some(raw) => Some(
                raw.parse::<i32>()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| ElearningError::validation("Ordem da aula inválida"))?,
            ),
        };

        Ok(ClassroomFields {
            title: title.to_string(),
            description: non_blank(self.description.as_deref()),
            content_url,
            sequence,
        })
    }
}

// 删除课时表单
#[derive(Debug, Deserialize)]
pub struct DeleteClassroomForm {
    #[serde(default)]
    pub classroom_id: String,
}

impl DeleteClassroomForm {
    pub fn classroom_id(&self) -> Result<i64> {
        self.classroom_id
            .trim()
            .parse::<i64>()
            .map_err(|_| ElearningError::validation("Aula inválida"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classroom_validation() {
        let form = ClassroomForm {
            title: "Introdução".into(),
            content_url: Some("https://video.example.com/aula1".into()),
            sequence: Some("2".into()),
            ..Default::default()
        };
        let fields = form.validate().unwrap();
        assert_eq!(fields.sequence, Some(2));

        let blank = ClassroomForm::default();
        assert!(blank.validate().is_err());

        let bad_url = ClassroomForm {
            title: "Aula".into(),
            content_url: Some("javascript:alert(1)".into()),
            ..Default::default()
        };
        assert!(bad_url.validate().is_err());
    }
}
