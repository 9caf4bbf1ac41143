//! 选课存储操作

use super::SeaOrmStorage;
use crate::entity::courses::Entity as Courses;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{ElearningError, Result};
use crate::models::enrollments::entities::{Enrollment, EnrollmentWithCourse, clamp_progress};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 学生选课
    pub async fn enroll_student_impl(&self, student_id: i64, course_id: i64) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            progress: Set(0.0),
            enrolled_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("选课失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 获取学生在课程中的选课记录
    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::CourseId.eq(course_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 学生的全部选课及课程信息
    pub async fn list_student_enrollments_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<EnrollmentWithCourse>> {
        let records = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .find_also_related(Courses)
            .order_by_desc(Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询学生选课失败: {e}")))?;

        Ok(records
            .into_iter()
            .filter_map(|(enrollment, course)| {
                course.map(|course| EnrollmentWithCourse {
                    enrollment: enrollment.into_enrollment(),
                    course: course.into_course(),
                })
            })
            .collect())
    }

    /// 课程的选课人数
    pub async fn count_course_enrollments_impl(&self, course_id: i64) -> Result<u64> {
        let count = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("统计选课人数失败: {e}")))?;

        Ok(count)
    }

    /// 更新学习进度，写入前截断到 [0, 1]
    pub async fn update_enrollment_progress_impl(
        &self,
        enrollment_id: i64,
        progress: f64,
    ) -> Result<bool> {
        let result = Enrollments::update_many()
            .col_expr(
                Column::Progress,
                sea_orm::sea_query::Expr::value(clamp_progress(progress)),
            )
            .filter(Column::Id.eq(enrollment_id))
            .exec(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("更新学习进度失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
