//! 访客提问存储操作

use super::SeaOrmStorage;
use crate::entity::visitor_questions::{ActiveModel, Column, Entity as VisitorQuestions};
use crate::errors::{ElearningError, Result};
use crate::models::visitor_questions::{
    entities::VisitorQuestion, requests::CreateVisitorQuestionRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 保存访客提问
    pub async fn create_visitor_question_impl(
        &self,
        req: CreateVisitorQuestionRequest,
    ) -> Result<VisitorQuestion> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            message: Set(req.message),
            answer: Set(None),
            answered: Set(false),
            created_at: Set(now),
            answered_at: Set(None),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("保存访客提问失败: {e}")))?;

        Ok(result.into_visitor_question())
    }

    /// 列出访客提问，未回答的在前
    pub async fn list_visitor_questions_impl(
        &self,
        pending_only: bool,
    ) -> Result<Vec<VisitorQuestion>> {
        let mut select = VisitorQuestions::find();
        if pending_only {
            select = select.filter(Column::Answered.eq(false));
        }

        let questions = select
            .order_by_asc(Column::Answered)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询访客提问失败: {e}")))?;

        Ok(questions
            .into_iter()
            .map(|m| m.into_visitor_question())
            .collect())
    }

    /// 回答访客提问
    pub async fn answer_visitor_question_impl(
        &self,
        question_id: i64,
        answer: &str,
    ) -> Result<Option<VisitorQuestion>> {
        let Some(existing) = VisitorQuestions::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询访客提问失败: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(existing.id),
            answer: Set(Some(answer.to_string())),
            answered: Set(true),
            answered_at: Set(Some(now)),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("回答访客提问失败: {e}")))?;

        Ok(Some(result.into_visitor_question()))
    }
}
