use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::QuestionType;

// 课时下的练习题
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct Exercise {
    pub id: i64,
    pub classroom_id: i64,
    pub statement: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 学生对练习的作答，每个学生每道题只保留一份
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct StudentExerciseAnswer {
    pub id: i64,
    pub student_id: i64,
    pub exercise_id: i64,
    pub answer: String,
    pub correct: bool,
    pub grade: f64,
    pub feedback: Option<String>,
    pub answered_at: chrono::DateTime<chrono::Utc>,
}

// 展示用练习：标准答案仅对课程所有者可见
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/exercise.ts")]
pub struct ExerciseView {
    pub id: i64,
    pub statement: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub correct_answer: Option<String>,
    pub my_answer: Option<StudentExerciseAnswer>,
}

impl ExerciseView {
    pub fn for_owner(exercise: Exercise) -> Self {
        Self {
            id: exercise.id,
            statement: exercise.statement,
            question_type: exercise.question_type,
            options: exercise.options,
            correct_answer: Some(exercise.correct_answer),
            my_answer: None,
        }
    }

    pub fn for_student(exercise: Exercise, my_answer: Option<StudentExerciseAnswer>) -> Self {
        // 作答之后才展示标准答案
        let correct_answer = my_answer.as_ref().map(|_| exercise.correct_answer);
        Self {
            id: exercise.id,
            statement: exercise.statement,
            question_type: exercise.question_type,
            options: exercise.options,
            correct_answer,
            my_answer,
        }
    }
}
