use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{ElearningError, Result};
use crate::models::common::question_type::{QuestionFields, answers_match, validate_question};

pub const CORRECT_GRADE: f64 = 10.0;

// 练习表单
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct ExerciseForm {
    #[serde(default)]
    pub statement: String,
    #[serde(default)]
    pub question_type: String,
    /// 每行一个选项
    pub options: Option<String>,
    pub correct_answer: Option<String>,
}

impl ExerciseForm {
    pub fn validate(&self) -> Result<QuestionFields> {
        validate_question(
            &self.statement,
            &self.question_type,
            self.options.as_deref(),
            self.correct_answer.as_deref(),
        )
    }
}

// 创建练习请求（用于存储层）
#[derive(Debug, Clone)]
pub struct CreateExerciseRequest {
    pub classroom_id: i64,
    pub fields: QuestionFields,
}

// 练习作答表单
#[derive(Debug, Deserialize)]
pub struct AnswerExerciseForm {
    #[serde(default)]
    pub answer: String,
}

// 保存作答请求（用于存储层），已存在时覆盖
#[derive(Debug, Clone, PartialEq)]
pub struct SaveExerciseAnswerRequest {
    pub student_id: i64,
    pub exercise_id: i64,
    pub answer: String,
    pub correct: bool,
    pub grade: f64,
    pub feedback: Option<String>,
}

impl SaveExerciseAnswerRequest {
    /// 判分：与考试相同的比对规则，答对得满分
    pub fn grade(
        student_id: i64,
        exercise_id: i64,
        answer: &str,
        correct_answer: &str,
    ) -> Result<Self> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ElearningError::validation("Informe uma resposta"));
        }
        let correct = answers_match(answer, correct_answer);
        let feedback = if correct {
            "Resposta correta!".to_string()
        } else {
            format!("Resposta incorreta. A resposta esperada era: {correct_answer}")
        };
        Ok(Self {
            student_id,
            exercise_id,
            answer: answer.to_string(),
            correct,
            grade: if correct { CORRECT_GRADE } else { 0.0 },
            feedback: Some(feedback),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_answer() {
        let right = SaveExerciseAnswerRequest::grade(1, 2, " a ", "A").unwrap();
        assert!(right.correct);
        assert_eq!(right.grade, CORRECT_GRADE);
        assert_eq!(right.answer, "a");

        let wrong = SaveExerciseAnswerRequest::grade(1, 2, "b", "A").unwrap();
        assert!(!wrong.correct);
        assert_eq!(wrong.grade, 0.0);
        assert!(wrong.feedback.unwrap().contains("A"));

        assert!(SaveExerciseAnswerRequest::grade(1, 2, "  ", "A").is_err());
    }
}
