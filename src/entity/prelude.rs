//! 预导入模块，方便使用

pub use super::classrooms::{
    ActiveModel as ClassroomActiveModel, Entity as Classrooms, Model as ClassroomModel,
};
pub use super::comments::{
    ActiveModel as CommentActiveModel, Entity as Comments, Model as CommentModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::doubts::{ActiveModel as DoubtActiveModel, Entity as Doubts, Model as DoubtModel};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::exam_definitions::{
    ActiveModel as ExamDefinitionActiveModel, Entity as ExamDefinitions,
    Model as ExamDefinitionModel,
};
pub use super::exam_questions::{
    ActiveModel as ExamQuestionActiveModel, Entity as ExamQuestions, Model as ExamQuestionModel,
};
pub use super::exams::{ActiveModel as ExamActiveModel, Entity as Exams, Model as ExamModel};
pub use super::exercises::{
    ActiveModel as ExerciseActiveModel, Entity as Exercises, Model as ExerciseModel,
};
pub use super::newsletter_inscriptions::{
    ActiveModel as NewsletterInscriptionActiveModel, Entity as NewsletterInscriptions,
    Model as NewsletterInscriptionModel,
};
pub use super::student_exercise_answers::{
    ActiveModel as ExerciseAnswerActiveModel, Entity as ExerciseAnswers,
    Model as ExerciseAnswerModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
pub use super::visitor_questions::{
    ActiveModel as VisitorQuestionActiveModel, Entity as VisitorQuestions,
    Model as VisitorQuestionModel,
};
