//! 课时存储操作

use super::SeaOrmStorage;
use crate::entity::classrooms::{ActiveModel, Column, Entity as Classrooms};
use crate::errors::{ElearningError, Result};
use crate::models::classrooms::{entities::Classroom, requests::ClassroomFields};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建课时，未指定顺序时排在最后
    pub async fn create_classroom_impl(
        &self,
        course_id: i64,
        fields: ClassroomFields,
    ) -> Result<Classroom> {
        let now = chrono::Utc::now().timestamp();

        let sequence = match fields.sequence {
            Some(sequence) => sequence,
            None => self.max_classroom_sequence(course_id).await? + 1,
        };

        let model = ActiveModel {
            course_id: Set(course_id),
            title: Set(fields.title),
            description: Set(fields.description),
            content_url: Set(fields.content_url),
            sequence: Set(sequence),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("创建课时失败: {e}")))?;

        Ok(result.into_classroom())
    }

    async fn max_classroom_sequence(&self, course_id: i64) -> Result<i32> {
        let max: Option<Option<i32>> = Classrooms::find()
            .select_only()
            .column_as(Column::Sequence.max(), "max_sequence")
            .filter(Column::CourseId.eq(course_id))
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询课时顺序失败: {e}")))?;

        Ok(max.flatten().unwrap_or(0))
    }

    /// 通过 ID 获取课时
    pub async fn get_classroom_by_id_impl(&self, classroom_id: i64) -> Result<Option<Classroom>> {
        let result = Classrooms::find_by_id(classroom_id)
            .one(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(result.map(|m| m.into_classroom()))
    }

    /// 课程的全部课时
    pub async fn list_course_classrooms_impl(&self, course_id: i64) -> Result<Vec<Classroom>> {
        let classrooms = Classrooms::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Sequence)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询课时列表失败: {e}")))?;

        Ok(classrooms.into_iter().map(|m| m.into_classroom()).collect())
    }

    /// 更新课时
    pub async fn update_classroom_impl(
        &self,
        classroom_id: i64,
        fields: ClassroomFields,
    ) -> Result<Option<Classroom>> {
        if self.get_classroom_by_id_impl(classroom_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(classroom_id),
            title: Set(fields.title),
            description: Set(fields.description),
            content_url: Set(fields.content_url),
            updated_at: Set(now),
            ..Default::default()
        };

        // 未填写顺序时保持原位置
        if let Some(sequence) = fields.sequence {
            model.sequence = Set(sequence);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("更新课时失败: {e}")))?;

        self.get_classroom_by_id_impl(classroom_id).await
    }

    /// 删除课时
    pub async fn delete_classroom_impl(&self, classroom_id: i64) -> Result<bool> {
        let result = Classrooms::delete_by_id(classroom_id)
            .exec(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("删除课时失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
