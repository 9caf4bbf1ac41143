use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{ElearningError, Result};
use crate::models::common::form::non_blank;
use crate::models::common::question_type::{QuestionFields, validate_question};
use crate::models::exams::entities::ExamKind;

/// 作答表单中答案字段的前缀，后接题目 ID
pub const ANSWER_FIELD_PREFIX: &str = "resposta_";

// 考试模板表单
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamDefinitionForm {
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExamDefinitionFields {
    pub title: String,
    pub description: Option<String>,
}

impl ExamDefinitionForm {
    pub fn exam_id(&self) -> Result<Option<i64>> {
        match non_blank(self.id.as_deref()) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ElearningError::validation("Exame inválido")),
        }
    }

    pub fn validate(&self) -> Result<ExamDefinitionFields> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ElearningError::validation("O título do exame é obrigatório"));
        }
        Ok(ExamDefinitionFields {
            title: title.to_string(),
            description: non_blank(self.description.as_deref()),
        })
    }
}

// 创建考试模板请求（用于存储层），新建时未发布
#[derive(Debug, Clone)]
pub struct CreateExamDefinitionRequest {
    pub course_id: i64,
    pub fields: ExamDefinitionFields,
}

// 考试题目表单
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exam.ts")]
pub struct ExamQuestionForm {
    #[serde(default)]
    pub statement: String,
    #[serde(default)]
    pub question_type: String,
    pub options: Option<String>,
    pub correct_answer: Option<String>,
    pub points: Option<String>,
}

impl ExamQuestionForm {
    /// 返回题目字段与分值，分值必须大于 0
    pub fn validate(&self) -> Result<(QuestionFields, f64)> {
        let fields = validate_question(
            &self.statement,
            &self.question_type,
            self.options.as_deref(),
            self.correct_answer.as_deref(),
        )?;
        let points = non_blank(self.points.as_deref())
            .and_then(|raw| raw.replace(',', ".").parse::<f64>().ok())
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| ElearningError::validation("A pontuação deve ser maior que zero"))?;
        Ok((fields, points))
    }
}

// 创建考试题目请求（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateExamQuestionRequest {
    pub exam_definition_id: i64,
    pub fields: QuestionFields,
    pub points: f64,
    pub sequence: i32,
}

// 创建成绩记录请求（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateExamRequest {
    pub student_id: i64,
    pub course_id: i64,
    pub kind: ExamKind,
    pub exam_definition_id: Option<i64>,
    pub grade: f64,
    pub comment: Option<String>,
}

/// 从作答表单提取 题目 ID → 答案
///
/// 只处理 `resposta_` 前缀的字段，前缀后不是数字时视为非法提交。
pub fn parse_submission(form: &HashMap<String, String>) -> Result<HashMap<i64, String>> {
    let mut answers = HashMap::new();
    for (key, value) in form {
        let Some(raw_id) = key.strip_prefix(ANSWER_FIELD_PREFIX) else {
            continue;
        };
        let question_id = raw_id
            .parse::<i64>()
            .map_err(|_| ElearningError::validation("Resposta inválida enviada"))?;
        answers.insert(question_id, value.clone());
    }
    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submission() {
        let form = HashMap::from([
            ("resposta_3".to_string(), "A".to_string()),
            ("resposta_7".to_string(), "".to_string()),
            ("csrf".to_string(), "x".to_string()),
        ]);
        let answers = parse_submission(&form).unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[&3], "A");

        let bad = HashMap::from([("resposta_x".to_string(), "A".to_string())]);
        assert!(parse_submission(&bad).is_err());
    }

    #[test]
    fn test_question_points_must_be_positive() {
        let form = ExamQuestionForm {
            statement: "2 + 2?".into(),
            question_type: "DISSERTATIVA".into(),
            correct_answer: Some("4".into()),
            points: Some("0".into()),
            ..Default::default()
        };
        assert!(form.validate().is_err());

        let form = ExamQuestionForm {
            points: Some("2,5".into()),
            ..form
        };
        assert_eq!(form.validate().unwrap().1, 2.5);
    }
}
