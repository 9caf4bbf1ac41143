//! 邮件订阅存储操作

use super::SeaOrmStorage;
use crate::entity::newsletter_inscriptions::{
    ActiveModel, Column, Entity as NewsletterInscriptions,
};
use crate::errors::{ElearningError, Result};
use crate::models::newsletter::entities::NewsletterInscription;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 订阅；已存在的邮箱重新激活并更新姓名
    pub async fn subscribe_newsletter_impl(
        &self,
        email: &str,
        name: Option<String>,
    ) -> Result<NewsletterInscription> {
        let now = chrono::Utc::now().timestamp();

        let existing = NewsletterInscriptions::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询订阅失败: {e}")))?;

        let result = match existing {
            Some(existing) => {
                let mut model = ActiveModel {
                    id: Set(existing.id),
                    active: Set(true),
                    updated_at: Set(now),
                    ..Default::default()
                };
                if name.is_some() {
                    model.name = Set(name);
                }
                model.update(&self.db).await
            }
            None => {
                ActiveModel {
                    email: Set(email.to_string()),
                    name: Set(name),
                    active: Set(true),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
            }
        }
        .map_err(|e| ElearningError::database_operation(format!("保存订阅失败: {e}")))?;

        Ok(result.into_inscription())
    }

    /// 取消订阅，返回是否存在有效订阅
    pub async fn unsubscribe_newsletter_impl(&self, email: &str) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = NewsletterInscriptions::update_many()
            .col_expr(Column::Active, sea_orm::sea_query::Expr::value(false))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Email.eq(email))
            .filter(Column::Active.eq(true))
            .exec(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("取消订阅失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
