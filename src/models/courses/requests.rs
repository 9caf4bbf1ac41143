use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{ElearningError, Result};
use crate::models::common::{PaginationQuery, form::non_blank};

pub const MAX_TITLE_LENGTH: usize = 200;

// 课程列表查询参数（来自HTTP请求）
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub category: Option<String>,
}

// 课程列表查询（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct CourseListQuery {
    pub page: u64,
    pub size: u64,
    pub search: Option<String>,
    pub category: Option<String>,
    pub professor_id: Option<i64>,
}

impl From<&CourseQueryParams> for CourseListQuery {
    fn from(params: &CourseQueryParams) -> Self {
        let (page, size) = params.pagination.normalized();
        Self {
            page,
            size,
            search: non_blank(params.search.as_deref()),
            category: non_blank(params.category.as_deref()),
            professor_id: None,
        }
    }
}

// 课程表单：新建与编辑共用，id 为空表示新建
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/course.ts")]
pub struct CourseForm {
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub hours: Option<String>,
}

/// 校验后的课程字段
#[derive(Debug, Clone, PartialEq)]
pub struct CourseFields {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<String>,
    pub hours: i32,
}

impl CourseForm {
    /// 表单中的课程 ID，空串视为新建
    pub fn course_id(&self) -> Result<Option<i64>> {
        match non_blank(self.id.as_deref()) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ElearningError::validation("Curso inválido")),
        }
    }

    pub fn validate(&self) -> Result<CourseFields> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ElearningError::validation("O título do curso é obrigatório"));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(ElearningError::validation(format!(
                "O título deve ter no máximo {MAX_TITLE_LENGTH} caracteres"
            )));
        }

        let price = match non_blank(self.price.as_deref()) {
            None => 0.0,
            Some(raw) => raw
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite() && *p >= 0.0)
                .ok_or_else(|| ElearningError::validation("Preço inválido"))?,
        };

        let hours = match non_blank(self.hours.as_deref()) {
            None => 0,
            Some(raw) => raw
                .parse::<i32>()
                .ok()
                .filter(|h| *h >= 0)
                .ok_or_else(|| ElearningError::validation("Carga horária inválida"))?,
        };

        Ok(CourseFields {
            title: title.to_string(),
            description: non_blank(self.description.as_deref()),
            price,
            category: non_blank(self.category.as_deref()),
            hours,
        })
    }
}

// 创建课程请求（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateCourseRequest {
    pub professor_id: i64,
    pub fields: CourseFields,
}

// 课程评价表单
#[derive(Debug, Deserialize)]
pub struct EvaluationForm {
    #[serde(default)]
    pub grade: String,
    pub comment: Option<String>,
}

impl EvaluationForm {
    /// 评分必须在 0 到 10 之间
    pub fn validate(&self) -> Result<(f64, Option<String>)> {
        let grade = self
            .grade
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| ElearningError::validation("Informe uma nota entre 0 e 10"))?;
        if !(0.0..=10.0).contains(&grade) {
            return Err(ElearningError::validation("A nota deve estar entre 0 e 10"));
        }
        Ok((grade, non_blank(self.comment.as_deref())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str) -> CourseForm {
        CourseForm {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let err = form("   ").validate().unwrap_err();
        assert_eq!(err.message(), "O título do curso é obrigatório");
    }

    #[test]
    fn test_defaults_and_parsing() {
        let fields = CourseForm {
            price: Some("49,90".into()),
            hours: Some("12".into()),
            category: Some("  ".into()),
            ..form(" Rust Básico ")
        }
        .validate()
        .unwrap();
        assert_eq!(fields.title, "Rust Básico");
        assert_eq!(fields.price, 49.9);
        assert_eq!(fields.hours, 12);
        assert_eq!(fields.category, None);

        let fields = form("Curso").validate().unwrap();
        assert_eq!(fields.price, 0.0);
        assert_eq!(fields.hours, 0);
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let result = CourseForm {
            price: Some("-1".into()),
            ..form("Curso")
        }
        .validate();
        assert!(result.is_err());
    }

    #[test]
    fn test_course_id() {
        assert_eq!(form("x").course_id().unwrap(), None);
        let with_id = CourseForm {
            id: Some("7".into()),
            ..form("x")
        };
        assert_eq!(with_id.course_id().unwrap(), Some(7));
        let invalid = CourseForm {
            id: Some("abc".into()),
            ..form("x")
        };
        assert!(invalid.course_id().is_err());
    }

    #[test]
    fn test_evaluation_range() {
        let eval = |grade: &str| EvaluationForm {
            grade: grade.to_string(),
            comment: None,
        };
        assert_eq!(eval("10").validate().unwrap().0, 10.0);
        assert_eq!(eval("0").validate().unwrap().0, 0.0);
        assert_eq!(eval("7,5").validate().unwrap().0, 7.5);
        assert!(eval("10.5").validate().is_err());
        assert!(eval("-1").validate().is_err());
        assert!(eval("dez").validate().is_err());
    }
}
