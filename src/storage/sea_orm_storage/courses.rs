//! 课程存储操作

use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{ElearningError, Result};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::Course,
        requests::{CourseFields, CourseListQuery, CreateCourseRequest},
        responses::CourseListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, sea_query::LikeExpr,
};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = chrono::Utc::now().timestamp();
        let fields = req.fields;

        let model = ActiveModel {
            title: Set(fields.title),
            description: Set(fields.description),
            professor_id: Set(req.professor_id),
            price: Set(fields.price),
            category: Set(fields.category),
            hours: Set(fields.hours),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, course_id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(course_id)
            .one(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let size = query.size.clamp(1, 100);

        let mut select = Courses::find();

        // 教授筛选
        if let Some(professor_id) = query.professor_id {
            select = select.filter(Column::ProfessorId.eq(professor_id));
        }

        // 分类筛选
        if let Some(ref category) = query.category {
            select = select.filter(Column::Category.eq(category.as_str()));
        }

        // 搜索条件：标题或简介
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            // 转义后的 `%`、`_` 需要配合 ESCAPE 子句才按字面匹配
            let pattern = format!("%{}%", escape_like_pattern(search.trim()));
            select = select.filter(
                Condition::any()
                    .add(Column::Title.like(LikeExpr::new(pattern.clone()).escape('\\')))
                    .add(Column::Description.like(LikeExpr::new(pattern).escape('\\'))),
            );
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询课程总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询课程页数失败: {e}")))?;

        // 超出范围的页码落到最后一页，避免偏移量溢出
        let page = query.page.clamp(1, pages.max(1));

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询课程列表失败: {e}")))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 最新课程
    pub async fn list_latest_courses_impl(&self, limit: u64) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询最新课程失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 教授的课程
    pub async fn list_courses_by_professor_impl(&self, professor_id: i64) -> Result<Vec<Course>> {
        let courses = Courses::find()
            .filter(Column::ProfessorId.eq(professor_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询教授课程失败: {e}")))?;

        Ok(courses.into_iter().map(|m| m.into_course()).collect())
    }

    /// 已使用的分类（去重、排序）
    pub async fn list_course_categories_impl(&self) -> Result<Vec<String>> {
        let categories: Vec<Option<String>> = Courses::find()
            .select_only()
            .column(Column::Category)
            .distinct()
            .filter(Column::Category.is_not_null())
            .order_by_asc(Column::Category)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询课程分类失败: {e}")))?;

        Ok(categories.into_iter().flatten().collect())
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        course_id: i64,
        fields: CourseFields,
    ) -> Result<Option<Course>> {
        // 先检查课程是否存在
        if self.get_course_by_id_impl(course_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            id: Set(course_id),
            title: Set(fields.title),
            description: Set(fields.description),
            price: Set(fields.price),
            category: Set(fields.category),
            hours: Set(fields.hours),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("更新课程失败: {e}")))?;

        self.get_course_by_id_impl(course_id).await
    }

    /// 删除课程
    pub async fn delete_course_impl(&self, course_id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(course_id)
            .exec(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("删除课程失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
