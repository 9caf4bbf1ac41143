//! 考试自动判分
//!
//! 纯函数，不依赖 HTTP 与存储。

use std::collections::HashMap;

use crate::models::common::question_type::answers_match;
use crate::models::exams::entities::ExamQuestion;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub possible_points: f64,
    pub obtained_points: f64,
    pub correct_count: usize,
    pub total: usize,
}

impl ScoreSummary {
    /// 最终成绩：得分四舍五入，不设上限
    pub fn grade(&self) -> f64 {
        self.obtained_points.round()
    }

    pub fn comment(&self) -> String {
        format!(
            "Você acertou {} de {} questões ({}/{} pontos)",
            self.correct_count, self.total, self.obtained_points, self.possible_points
        )
    }
}

pub fn score_submission(answers: &HashMap<i64, String>, questions: &[ExamQuestion]) -> ScoreSummary {
    let mut summary = ScoreSummary {
        possible_points: 0.0,
        obtained_points: 0.0,
        correct_count: 0,
        total: questions.len(),
    };

    for question in questions {
        summary.possible_points += question.points;

        let Some(answer) = answers.get(&question.id) else {
            continue;
        };
        if question.question_type.is_auto_graded()
            && answers_match(answer, &question.correct_answer)
        {
            summary.obtained_points += question.points;
            summary.correct_count += 1;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::QuestionType;

    fn question(id: i64, question_type: QuestionType, correct: &str, points: f64) -> ExamQuestion {
        ExamQuestion {
            id,
            exam_definition_id: 1,
            statement: format!("Questão {id}"),
            question_type,
            options: vec!["A".into(), "B".into()],
            correct_answer: correct.into(),
            points,
            sequence: id as i32,
        }
    }

    #[test]
    fn test_case_insensitive_match_scores_points() {
        let questions = vec![question(1, QuestionType::MultipleChoice, "A", 10.0)];

        let right = score_submission(&HashMap::from([(1, "a".to_string())]), &questions);
        assert_eq!(right.obtained_points, 10.0);
        assert_eq!(right.grade(), 10.0);
        assert_eq!(right.correct_count, 1);

        let wrong = score_submission(&HashMap::from([(1, "b".to_string())]), &questions);
        assert_eq!(wrong.obtained_points, 0.0);
        assert_eq!(wrong.grade(), 0.0);
        assert_eq!(wrong.possible_points, 10.0);
    }

    #[test]
    fn test_blank_and_missing_answers_score_nothing() {
        let questions = vec![
            question(1, QuestionType::MultipleChoice, "A", 2.5),
            question(2, QuestionType::Essay, "Brasília", 2.5),
            question(3, QuestionType::Essay, "Recife", 5.0),
        ];
        let answers = HashMap::from([
            (1, "   ".to_string()),
            (2, " brasília ".to_string()),
            (99, "A".to_string()),
        ]);

        let summary = score_submission(&answers, &questions);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.correct_count, 1);
        assert_eq!(summary.obtained_points, 2.5);
        assert_eq!(summary.possible_points, 10.0);
        assert_eq!(summary.grade(), 3.0);
        assert_eq!(
            summary.comment(),
            "Você acertou 1 de 3 questões (2.5/10 pontos)"
        );
    }
}
