//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod classrooms;
mod comments;
mod courses;
mod doubts;
mod enrollments;
mod exams;
mod exercises;
mod newsletter;
mod users;
mod visitor_questions;

use crate::config::AppConfig;
use crate::errors::{ElearningError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例（使用全局配置）
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 按给定参数连接数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ElearningError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    ///
    /// 内存数据库的连接不回收，否则数据会随连接一起丢失。
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");
        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ElearningError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            // 内存数据库不支持 WAL
            .journal_mode(if in_memory {
                SqliteJournalMode::Memory
            } else {
                SqliteJournalMode::Wal
            })
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(if in_memory {
                None
            } else {
                Some(Duration::from_secs(300))
            })
            .max_lifetime(if in_memory {
                None
            } else {
                Some(Duration::from_secs(1800))
            })
            .connect_with(opt)
            .await
            .map_err(|e| ElearningError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ElearningError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ElearningError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}


// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn list_latest_courses(&self, limit: u64) -> Result<Vec<Course>> {
        self.list_latest_courses_impl(limit).await
    }

    async fn list_courses_by_professor(&self, professor_id: i64) -> Result<Vec<Course>> {
        self.list_courses_by_professor_impl(professor_id).await
    }

    async fn list_course_categories(&self) -> Result<Vec<String>> {
        self.list_course_categories_impl().await
    }

    async fn update_course(
        &self,
        course_id: i64,
        fields: CourseFields,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, fields).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    // 选课模块
    async fn enroll_student(&self, student_id: i64, course_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(student_id, course_id).await
    }

    async fn get_enrollment(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(student_id, course_id).await
    }

    async fn list_student_enrollments(
        &self,
        student_id: i64,
    ) -> Result<Vec<EnrollmentWithCourse>> {
        self.list_student_enrollments_impl(student_id).await
    }

    async fn count_course_enrollments(&self, course_id: i64) -> Result<u64> {
        self.count_course_enrollments_impl(course_id).await
    }

    async fn update_enrollment_progress(&self, enrollment_id: i64, progress: f64) -> Result<bool> {
        self.update_enrollment_progress_impl(enrollment_id, progress)
            .await
    }

    // 课时模块
    async fn create_classroom(
        &self,
        course_id: i64,
        fields: ClassroomFields,
    ) -> Result<Classroom> {
        self.create_classroom_impl(course_id, fields).await
    }

    async fn get_classroom_by_id(&self, classroom_id: i64) -> Result<Option<Classroom>> {
        self.get_classroom_by_id_impl(classroom_id).await
    }

    async fn list_course_classrooms(&self, course_id: i64) -> Result<Vec<Classroom>> {
        self.list_course_classrooms_impl(course_id).await
    }

    async fn update_classroom(
        &self,
        classroom_id: i64,
        fields: ClassroomFields,
    ) -> Result<Option<Classroom>> {
        self.update_classroom_impl(classroom_id, fields).await
    }

    async fn delete_classroom(&self, classroom_id: i64) -> Result<bool> {
        self.delete_classroom_impl(classroom_id).await
    }

    // 练习模块
    async fn create_exercise(&self, exercise: CreateExerciseRequest) -> Result<Exercise> {
        self.create_exercise_impl(exercise).await
    }

    async fn get_exercise_by_id(&self, exercise_id: i64) -> Result<Option<Exercise>> {
        self.get_exercise_by_id_impl(exercise_id).await
    }

    async fn list_classroom_exercises(&self, classroom_id: i64) -> Result<Vec<Exercise>> {
        self.list_classroom_exercises_impl(classroom_id).await
    }

    async fn delete_exercise(&self, exercise_id: i64) -> Result<bool> {
        self.delete_exercise_impl(exercise_id).await
    }

    async fn save_exercise_answer(
        &self,
        answer: SaveExerciseAnswerRequest,
    ) -> Result<StudentExerciseAnswer> {
        self.save_exercise_answer_impl(answer).await
    }

    async fn list_student_exercise_answers(
        &self,
        student_id: i64,
        classroom_id: i64,
    ) -> Result<Vec<StudentExerciseAnswer>> {
        self.list_student_exercise_answers_impl(student_id, classroom_id)
            .await
    }

    // 考试模块
    async fn create_exam_definition(
        &self,
        definition: CreateExamDefinitionRequest,
    ) -> Result<ExamDefinition> {
        self.create_exam_definition_impl(definition).await
    }

    async fn get_exam_definition_by_id(&self, exam_id: i64) -> Result<Option<ExamDefinition>> {
        self.get_exam_definition_by_id_impl(exam_id).await
    }

    async fn list_course_exam_definitions(
        &self,
        course_id: i64,
        published_only: bool,
    ) -> Result<Vec<ExamDefinitionSummary>> {
        self.list_course_exam_definitions_impl(course_id, published_only)
            .await
    }

    async fn update_exam_definition(
        &self,
        exam_id: i64,
        fields: ExamDefinitionFields,
    ) -> Result<Option<ExamDefinition>> {
        self.update_exam_definition_impl(exam_id, fields).await
    }

    async fn set_exam_definition_published(&self, exam_id: i64, published: bool) -> Result<bool> {
        self.set_exam_definition_published_impl(exam_id, published)
            .await
    }

    async fn delete_exam_definition(&self, exam_id: i64) -> Result<bool> {
        self.delete_exam_definition_impl(exam_id).await
    }

    async fn create_exam_question(
        &self,
        question: CreateExamQuestionRequest,
    ) -> Result<ExamQuestion> {
        self.create_exam_question_impl(question).await
    }

    async fn get_exam_question_by_id(&self, question_id: i64) -> Result<Option<ExamQuestion>> {
        self.get_exam_question_by_id_impl(question_id).await
    }

    async fn list_exam_questions(&self, exam_id: i64) -> Result<Vec<ExamQuestion>> {
        self.list_exam_questions_impl(exam_id).await
    }

    async fn next_exam_question_sequence(&self, exam_id: i64) -> Result<i32> {
        self.next_exam_question_sequence_impl(exam_id).await
    }

    async fn delete_exam_question(&self, question_id: i64) -> Result<bool> {
        self.delete_exam_question_impl(question_id).await
    }

    // 成绩模块
    async fn create_exam(&self, exam: CreateExamRequest) -> Result<Exam> {
        self.create_exam_impl(exam).await
    }

    async fn save_course_evaluation(
        &self,
        student_id: i64,
        course_id: i64,
        grade: f64,
        comment: Option<String>,
    ) -> Result<Exam> {
        self.save_course_evaluation_impl(student_id, course_id, grade, comment)
            .await
    }

    async fn list_student_course_exams(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<Exam>> {
        self.list_student_course_exams_impl(student_id, course_id)
            .await
    }

    async fn get_course_evaluation_summary(&self, course_id: i64) -> Result<EvaluationSummary> {
        self.get_course_evaluation_summary_impl(course_id).await
    }

    // 疑问模块
    async fn create_doubt(&self, doubt: CreateDoubtRequest) -> Result<Doubt> {
        self.create_doubt_impl(doubt).await
    }

    async fn get_doubt_by_id(&self, doubt_id: i64) -> Result<Option<Doubt>> {
        self.get_doubt_by_id_impl(doubt_id).await
    }

    async fn save_doubt_answer(&self, doubt: &Doubt) -> Result<bool> {
        self.save_doubt_answer_impl(doubt).await
    }

    async fn list_course_doubts(&self, course_id: i64) -> Result<Vec<DoubtView>> {
        self.list_course_doubts_impl(course_id).await
    }

    async fn list_student_doubts(&self, student_id: i64) -> Result<Vec<Doubt>> {
        self.list_student_doubts_impl(student_id).await
    }

    // 评论模块
    async fn create_comment(&self, comment: CreateCommentRequest) -> Result<Comment> {
        self.create_comment_impl(comment).await
    }

    async fn list_course_comments(&self, course_id: i64) -> Result<Vec<CommentView>> {
        self.list_course_comments_impl(course_id).await
    }

    // 订阅模块
    async fn subscribe_newsletter(
        &self,
        email: &str,
        name: Option<String>,
    ) -> Result<NewsletterInscription> {
        self.subscribe_newsletter_impl(email, name).await
    }

    async fn unsubscribe_newsletter(&self, email: &str) -> Result<bool> {
        self.unsubscribe_newsletter_impl(email).await
    }

    // 访客提问模块
    async fn create_visitor_question(
        &self,
        question: CreateVisitorQuestionRequest,
    ) -> Result<VisitorQuestion> {
        self.create_visitor_question_impl(question).await
    }

    async fn list_visitor_questions(&self, pending_only: bool) -> Result<Vec<VisitorQuestion>> {
        self.list_visitor_questions_impl(pending_only).await
    }

    async fn answer_visitor_question(
        &self,
        question_id: i64,
        answer: &str,
    ) -> Result<Option<VisitorQuestion>> {
        self.answer_visitor_question_impl(question_id, answer).await
    }
}
