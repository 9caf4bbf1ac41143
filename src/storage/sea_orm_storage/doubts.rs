//! 疑问存储操作

use super::SeaOrmStorage;
use crate::entity::doubts::{ActiveModel, Column, Entity as Doubts};
use crate::entity::users::Entity as Users;
use crate::errors::{ElearningError, Result};
use crate::models::doubts::{
    entities::{Doubt, DoubtStatus, DoubtView},
    requests::CreateDoubtRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建疑问，初始状态为 ABERTA
    pub async fn create_doubt_impl(&self, req: CreateDoubtRequest) -> Result<Doubt> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            student_id: Set(req.student_id),
            question: Set(req.question),
            answer: Set(None),
            professor_id: Set(None),
            status: Set(DoubtStatus::Open.to_string()),
            created_at: Set(now),
            answered_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("创建疑问失败: {e}")))?;

        Ok(result.into_doubt())
    }

    /// 通过 ID 获取疑问
    pub async fn get_doubt_by_id_impl(&self, doubt_id: i64) -> Result<Option<Doubt>> {
        let result = Doubts::find_by_id(doubt_id)
            .one(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询疑问失败: {e}")))?;

        Ok(result.map(|m| m.into_doubt()))
    }

    /// 保存回答。只更新仍为 ABERTA 的记录，已被回答时返回冲突错误
    pub async fn save_doubt_answer_impl(&self, doubt: &Doubt) -> Result<bool> {
        let model = ActiveModel {
            answer: Set(doubt.answer.clone()),
            professor_id: Set(doubt.professor_id),
            status: Set(doubt.status.to_string()),
            answered_at: Set(doubt.answered_at.map(|t| t.timestamp())),
            ..Default::default()
        };

        let result = Doubts::update_many()
            .set(model)
            .filter(Column::Id.eq(doubt.id))
            .filter(Column::Status.eq(DoubtStatus::OPEN))
            .exec(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("保存疑问回答失败: {e}")))?;

        if result.rows_affected > 0 {
            return Ok(true);
        }

        // 记录仍在说明另一位教授已先回答
        match self.get_doubt_by_id_impl(doubt.id).await? {
            Some(_) => Err(ElearningError::conflict("Esta dúvida já foi respondida")),
            None => Ok(false),
        }
    }

    /// 课程的疑问及提问学生
    pub async fn list_course_doubts_impl(&self, course_id: i64) -> Result<Vec<DoubtView>> {
        let records = Doubts::find()
            .filter(Column::CourseId.eq(course_id))
            .find_also_related(Users)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询课程疑问失败: {e}")))?;

        Ok(records
            .into_iter()
            .map(|(doubt, student)| DoubtView {
                doubt: doubt.into_doubt(),
                student_name: student.map(|s| s.name),
            })
            .collect())
    }

    /// 学生提出的全部疑问
    pub async fn list_student_doubts_impl(&self, student_id: i64) -> Result<Vec<Doubt>> {
        let doubts = Doubts::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询学生疑问失败: {e}")))?;

        Ok(doubts.into_iter().map(|m| m.into_doubt()).collect())
    }
}
