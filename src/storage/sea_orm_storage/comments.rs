//! 课程评论存储操作

use super::SeaOrmStorage;
use crate::entity::comments::{ActiveModel, Column, Entity as Comments};
use crate::entity::users::Entity as Users;
use crate::errors::{ElearningError, Result};
use crate::models::comments::{
    entities::{Comment, CommentView},
    requests::CreateCommentRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 发表评论
    pub async fn create_comment_impl(&self, req: CreateCommentRequest) -> Result<Comment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(req.course_id),
            student_id: Set(req.student_id),
            content: Set(req.content),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("发表评论失败: {e}")))?;

        Ok(result.into_comment())
    }

    /// 课程评论，最新在前
    pub async fn list_course_comments_impl(&self, course_id: i64) -> Result<Vec<CommentView>> {
        let records = Comments::find()
            .filter(Column::CourseId.eq(course_id))
            .find_also_related(Users)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询课程评论失败: {e}")))?;

        Ok(records
            .into_iter()
            .map(|(comment, student)| CommentView {
                comment: comment.into_comment(),
                student_name: student.map(|s| s.name),
            })
            .collect())
    }
}
