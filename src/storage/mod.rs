use std::sync::Arc;

use crate::models::{
    classrooms::{entities::Classroom, requests::ClassroomFields},
    comments::{
        entities::{Comment, CommentView},
        requests::CreateCommentRequest,
    },
    courses::{
        entities::Course,
        requests::{CourseFields, CourseListQuery, CreateCourseRequest},
        responses::{CourseListResponse, EvaluationSummary},
    },
    doubts::{
        entities::{Doubt, DoubtView},
        requests::CreateDoubtRequest,
    },
    enrollments::entities::{Enrollment, EnrollmentWithCourse},
    exams::{
        entities::{Exam, ExamDefinition, ExamQuestion},
        requests::{
            CreateExamDefinitionRequest, CreateExamQuestionRequest, CreateExamRequest,
            ExamDefinitionFields,
        },
        responses::ExamDefinitionSummary,
    },
    exercises::{
        entities::{Exercise, StudentExerciseAnswer},
        requests::{CreateExerciseRequest, SaveExerciseAnswerRequest},
    },
    newsletter::entities::NewsletterInscription,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
    visitor_questions::{entities::VisitorQuestion, requests::CreateVisitorQuestionRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 课程管理方法
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 分页列出课程（支持标题搜索、分类与教授筛选）
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 最新发布的课程
    async fn list_latest_courses(&self, limit: u64) -> Result<Vec<Course>>;
    // 教授的全部课程
    async fn list_courses_by_professor(&self, professor_id: i64) -> Result<Vec<Course>>;
    // 已使用的课程分类
    async fn list_course_categories(&self) -> Result<Vec<String>>;
    async fn update_course(&self, course_id: i64, fields: CourseFields)
    -> Result<Option<Course>>;
    // 删除课程，子记录随外键级联删除
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 选课方法
    async fn enroll_student(&self, student_id: i64, course_id: i64) -> Result<Enrollment>;
    async fn get_enrollment(&self, student_id: i64, course_id: i64)
    -> Result<Option<Enrollment>>;
    async fn list_student_enrollments(&self, student_id: i64)
    -> Result<Vec<EnrollmentWithCourse>>;
    async fn count_course_enrollments(&self, course_id: i64) -> Result<u64>;
    async fn update_enrollment_progress(&self, enrollment_id: i64, progress: f64) -> Result<bool>;

    /// 课时方法
    // sequence 为空时追加到末尾
    async fn create_classroom(&self, course_id: i64, fields: ClassroomFields)
    -> Result<Classroom>;
    async fn get_classroom_by_id(&self, classroom_id: i64) -> Result<Option<Classroom>>;
    // 按 sequence 排序
    async fn list_course_classrooms(&self, course_id: i64) -> Result<Vec<Classroom>>;
    async fn update_classroom(
        &self,
        classroom_id: i64,
        fields: ClassroomFields,
    ) -> Result<Option<Classroom>>;
    async fn delete_classroom(&self, classroom_id: i64) -> Result<bool>;

    /// 练习方法
    async fn create_exercise(&self, exercise: CreateExerciseRequest) -> Result<Exercise>;
    async fn get_exercise_by_id(&self, exercise_id: i64) -> Result<Option<Exercise>>;
    async fn list_classroom_exercises(&self, classroom_id: i64) -> Result<Vec<Exercise>>;
    async fn delete_exercise(&self, exercise_id: i64) -> Result<bool>;
    // 保存作答，同一学生同一练习只保留最新一次
    async fn save_exercise_answer(
        &self,
        answer: SaveExerciseAnswerRequest,
    ) -> Result<StudentExerciseAnswer>;
    async fn list_student_exercise_answers(
        &self,
        student_id: i64,
        classroom_id: i64,
    ) -> Result<Vec<StudentExerciseAnswer>>;

    /// 考试模板方法
    async fn create_exam_definition(
        &self,
        definition: CreateExamDefinitionRequest,
    ) -> Result<ExamDefinition>;
    async fn get_exam_definition_by_id(&self, exam_id: i64) -> Result<Option<ExamDefinition>>;
    async fn list_course_exam_definitions(
        &self,
        course_id: i64,
        published_only: bool,
    ) -> Result<Vec<ExamDefinitionSummary>>;
    async fn update_exam_definition(
        &self,
        exam_id: i64,
        fields: ExamDefinitionFields,
    ) -> Result<Option<ExamDefinition>>;
    async fn set_exam_definition_published(&self, exam_id: i64, published: bool) -> Result<bool>;
    async fn delete_exam_definition(&self, exam_id: i64) -> Result<bool>;

    /// 考试题目方法
    async fn create_exam_question(&self, question: CreateExamQuestionRequest)
    -> Result<ExamQuestion>;
    async fn get_exam_question_by_id(&self, question_id: i64) -> Result<Option<ExamQuestion>>;
    // 按 sequence 排序
    async fn list_exam_questions(&self, exam_id: i64) -> Result<Vec<ExamQuestion>>;
    // 下一个题目序号：max(sequence) + 1
    async fn next_exam_question_sequence(&self, exam_id: i64) -> Result<i32>;
    async fn delete_exam_question(&self, question_id: i64) -> Result<bool>;

    /// 成绩方法
    async fn create_exam(&self, exam: CreateExamRequest) -> Result<Exam>;
    // 课程评价：每个学生每门课一条，重复评价时覆盖
    async fn save_course_evaluation(
        &self,
        student_id: i64,
        course_id: i64,
        grade: f64,
        comment: Option<String>,
    ) -> Result<Exam>;
    async fn list_student_course_exams(&self, student_id: i64, course_id: i64)
    -> Result<Vec<Exam>>;
    async fn get_course_evaluation_summary(&self, course_id: i64) -> Result<EvaluationSummary>;

    /// 疑问方法
    async fn create_doubt(&self, doubt: CreateDoubtRequest) -> Result<Doubt>;
    async fn get_doubt_by_id(&self, doubt_id: i64) -> Result<Option<Doubt>>;
    // 持久化回答后的疑问（回答、回答人、状态、时间）
    async fn save_doubt_answer(&self, doubt: &Doubt) -> Result<bool>;
    async fn list_course_doubts(&self, course_id: i64) -> Result<Vec<DoubtView>>;
    async fn list_student_doubts(&self, student_id: i64) -> Result<Vec<Doubt>>;

    /// 评论方法
    async fn create_comment(&self, comment: CreateCommentRequest) -> Result<Comment>;
    async fn list_course_comments(&self, course_id: i64) -> Result<Vec<CommentView>>;

    /// 邮件订阅方法
    // 已存在时重新激活
    async fn subscribe_newsletter(
        &self,
        email: &str,
        name: Option<String>,
    ) -> Result<NewsletterInscription>;
    async fn unsubscribe_newsletter(&self, email: &str) -> Result<bool>;

    /// 访客提问方法
    async fn create_visitor_question(
        &self,
        question: CreateVisitorQuestionRequest,
    ) -> Result<VisitorQuestion>;
    async fn list_visitor_questions(&self, pending_only: bool) -> Result<Vec<VisitorQuestion>>;
    async fn answer_visitor_question(
        &self,
        question_id: i64,
        answer: &str,
    ) -> Result<Option<VisitorQuestion>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
