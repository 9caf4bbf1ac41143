use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{ElearningError, Result};
use crate::models::common::form::non_blank;

/// 题目类型，练习与考试题目共用
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/question.ts")]
pub enum QuestionType {
    #[serde(rename = "MULTIPLA_ESCOLHA")]
    MultipleChoice,
    #[serde(rename = "DISSERTATIVA")]
    Essay,
}

impl QuestionType {
    pub const MULTIPLE_CHOICE: &'static str = "MULTIPLA_ESCOLHA";
    pub const ESSAY: &'static str = "DISSERTATIVA";

    pub fn all() -> &'static [QuestionType] {
        &[QuestionType::MultipleChoice, QuestionType::Essay]
    }

    /// 是否参与自动判分（按文本比对）
    pub fn is_auto_graded(&self) -> bool {
        matches!(self, QuestionType::MultipleChoice | QuestionType::Essay)
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "{}", QuestionType::MULTIPLE_CHOICE),
            QuestionType::Essay => write!(f, "{}", QuestionType::ESSAY),
        }
    }
}

impl std::str::FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            QuestionType::MULTIPLE_CHOICE => Ok(QuestionType::MultipleChoice),
            QuestionType::ESSAY => Ok(QuestionType::Essay),
            _ => Err(format!("Tipo de questão inválido: {s}")),
        }
    }
}

/// 选项在数据库中以 JSON 数组文本保存
pub fn encode_options(options: &[String]) -> String {
    serde_json::to_string(options).unwrap_or_else(|_| "[]".to_string())
}

pub fn decode_options(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// 解析表单中的选项：每行一个，忽略空行
pub fn parse_option_lines(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// 作答与标准答案比对：去除首尾空白后忽略大小写完全相等
pub fn answers_match(submitted: &str, correct: &str) -> bool {
    let submitted = submitted.trim();
    !submitted.is_empty() && submitted.to_lowercase() == correct.trim().to_lowercase()
}

/// 题目的公共字段（练习与考试题目共用的校验结果）
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionFields {
    pub statement: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// 校验题干、题型、选项与标准答案
///
/// 选择题至少两个非空选项，标准答案必须是其中之一（忽略大小写）；
/// 论述题需要非空的参考答案。
pub fn validate_question(
    statement: &str,
    question_type: &str,
    options: Option<&str>,
    correct_answer: Option<&str>,
) -> Result<QuestionFields> {
    let statement = statement.trim();
    if statement.is_empty() {
        return Err(ElearningError::validation("O enunciado é obrigatório"));
    }

    let question_type = question_type
        .parse::<QuestionType>()
        .map_err(ElearningError::validation)?;

    let correct_answer = non_blank(correct_answer);

    let (options, correct_answer) = match question_type {
        QuestionType::MultipleChoice => {
            let options = parse_option_lines(options);
            if options.len() < 2 {
                return Err(ElearningError::validation(
                    "Questões de múltipla escolha precisam de pelo menos duas alternativas",
                ));
            }
            let correct = correct_answer.ok_or_else(|| {
                ElearningError::validation("Informe a alternativa correta")
            })?;
            // 以选项中的原文为准保存
            let matched = options
                .iter()
                .find(|option| answers_match(&correct, option))
                .cloned()
                .ok_or_else(|| {
                    ElearningError::validation(
                        "A resposta correta deve ser uma das alternativas",
                    )
                })?;
            (options, matched)
        }
        QuestionType::Essay => {
            let correct = correct_answer.ok_or_else(|| {
                ElearningError::validation("Informe a resposta de referência")
            })?;
            (Vec::new(), correct)
        }
    };

    Ok(QuestionFields {
        statement: statement.to_string(),
        question_type,
        options,
        correct_answer,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_match() {
        assert!(answers_match("a", "A"));
        assert!(answers_match("  Brasília ", "brasília"));
        assert!(!answers_match("b", "A"));
        assert!(!answers_match("   ", ""));
    }

    #[test]
    fn test_validate_multiple_choice() {
        let fields =
            validate_question("Capital?", "MULTIPLA_ESCOLHA", Some("Rio\nBrasília"), Some("brasília"))
                .unwrap();
        assert_eq!(fields.options.len(), 2);
        assert_eq!(fields.correct_answer, "Brasília");

        let one_option = validate_question("Q", "MULTIPLA_ESCOLHA", Some("A"), Some("A"));
        assert!(one_option.is_err());

        let not_an_option = validate_question("Q", "MULTIPLA_ESCOLHA", Some("A\nB"), Some("C"));
        assert_eq!(
            not_an_option.unwrap_err().message(),
            "A resposta correta deve ser uma das alternativas"
        );
    }

    #[test]
    fn test_validate_essay_and_blank_statement() {
        let essay = validate_question("Explique", "DISSERTATIVA", Some("ignorado"), Some("Resposta"))
            .unwrap();
        assert!(essay.options.is_empty());
        assert!(validate_question("Explique", "DISSERTATIVA", None, Some(" ")).is_err());
        assert!(validate_question("  ", "DISSERTATIVA", None, Some("x")).is_err());
        assert!(validate_question("Q", "OUTRO", None, Some("x")).is_err());
    }

    #[test]
    fn test_parse_question_type() {
        assert_eq!(
            "multipla_escolha".parse::<QuestionType>(),
            Ok(QuestionType::MultipleChoice)
        );
        assert_eq!("DISSERTATIVA".parse::<QuestionType>(), Ok(QuestionType::Essay));
        assert!("VERDADEIRO_FALSO".parse::<QuestionType>().is_err());
    }

    #[test]
    fn test_option_lines() {
        let options = parse_option_lines(Some("A\n\n  B  \r\nC"));
        assert_eq!(options, vec!["A", "B", "C"]);
        assert_eq!(decode_options(&encode_options(&options)), options);
        assert!(decode_options("not json").is_empty());
    }
}
