//! 考试模板、题目与成绩存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::exam_definitions::{
    ActiveModel as DefinitionActiveModel, Column as DefinitionColumn,
    Entity as ExamDefinitions,
};
use crate::entity::exam_questions::{
    ActiveModel as QuestionActiveModel, Column as QuestionColumn, Entity as ExamQuestions,
};
use crate::entity::exams::{ActiveModel, Column, Entity as Exams};
use crate::errors::{ElearningError, Result};
use crate::models::common::question_type::encode_options;
use crate::models::courses::responses::EvaluationSummary;
use crate::models::exams::{
    entities::{Exam, ExamDefinition, ExamKind, ExamQuestion},
    requests::{
        CreateExamDefinitionRequest, CreateExamQuestionRequest, CreateExamRequest,
        ExamDefinitionFields,
    },
    responses::ExamDefinitionSummary,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

impl SeaOrmStorage {
    /// 创建考试模板（未发布）
    pub async fn create_exam_definition_impl(
        &self,
        req: CreateExamDefinitionRequest,
    ) -> Result<ExamDefinition> {
        let now = chrono::Utc::now().timestamp();

        let model = DefinitionActiveModel {
            course_id: Set(req.course_id),
            title: Set(req.fields.title),
            description: Set(req.fields.description),
            published: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("创建考试失败: {e}")))?;

        Ok(result.into_exam_definition())
    }

    /// 通过 ID 获取考试模板
    pub async fn get_exam_definition_by_id_impl(
        &self,
        exam_id: i64,
    ) -> Result<Option<ExamDefinition>> {
        let result = ExamDefinitions::find_by_id(exam_id)
            .one(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询考试失败: {e}")))?;

        Ok(result.map(|m| m.into_exam_definition()))
    }

    /// 课程的考试模板及题目数量
    pub async fn list_course_exam_definitions_impl(
        &self,
        course_id: i64,
        published_only: bool,
    ) -> Result<Vec<ExamDefinitionSummary>> {
        let mut select = ExamDefinitions::find().filter(DefinitionColumn::CourseId.eq(course_id));
        if published_only {
            select = select.filter(DefinitionColumn::Published.eq(true));
        }

        let definitions = select
            .order_by_asc(DefinitionColumn::CreatedAt)
            .order_by_asc(DefinitionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询考试列表失败: {e}")))?;

        if definitions.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<i64> = definitions.iter().map(|d| d.id).collect();
        let counts: HashMap<i64, i64> = ExamQuestions::find()
            .select_only()
            .column(QuestionColumn::ExamDefinitionId)
            .column_as(QuestionColumn::Id.count(), "question_count")
            .filter(QuestionColumn::ExamDefinitionId.is_in(ids))
            .group_by(QuestionColumn::ExamDefinitionId)
            .into_tuple::<(i64, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("统计考试题目失败: {e}")))?
            .into_iter()
            .collect();

        Ok(definitions
            .into_iter()
            .map(|definition| {
                let question_count = counts.get(&definition.id).copied().unwrap_or(0) as u64;
                ExamDefinitionSummary {
                    definition: definition.into_exam_definition(),
                    question_count,
                }
            })
            .collect())
    }

    /// 更新考试模板
    pub async fn update_exam_definition_impl(
        &self,
        exam_id: i64,
        fields: ExamDefinitionFields,
    ) -> Result<Option<ExamDefinition>> {
        if self.get_exam_definition_by_id_impl(exam_id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let model = DefinitionActiveModel {
            id: Set(exam_id),
            title: Set(fields.title),
            description: Set(fields.description),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("更新考试失败: {e}")))?;

        self.get_exam_definition_by_id_impl(exam_id).await
    }

    /// 发布或取消发布
    pub async fn set_exam_definition_published_impl(
        &self,
        exam_id: i64,
        published: bool,
    ) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = ExamDefinitions::update_many()
            .col_expr(
                DefinitionColumn::Published,
                sea_orm::sea_query::Expr::value(published),
            )
            .col_expr(
                DefinitionColumn::UpdatedAt,
                sea_orm::sea_query::Expr::value(now),
            )
            .filter(DefinitionColumn::Id.eq(exam_id))
            .exec(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("更新考试状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除考试模板
    pub async fn delete_exam_definition_impl(&self, exam_id: i64) -> Result<bool> {
        let result = ExamDefinitions::delete_by_id(exam_id)
            .exec(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("删除考试失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 添加题目
    pub async fn create_exam_question_impl(
        &self,
        req: CreateExamQuestionRequest,
    ) -> Result<ExamQuestion> {
        let fields = req.fields;

        let model = QuestionActiveModel {
            exam_definition_id: Set(req.exam_definition_id),
            statement: Set(fields.statement),
            question_type: Set(fields.question_type.to_string()),
            options: Set(encode_options(&fields.options)),
            correct_answer: Set(fields.correct_answer),
            points: Set(req.points),
            sequence: Set(req.sequence),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("添加考试题目失败: {e}")))?;

        Ok(result.into_exam_question())
    }

    /// 通过 ID 获取题目
    pub async fn get_exam_question_by_id_impl(
        &self,
        question_id: i64,
    ) -> Result<Option<ExamQuestion>> {
        let result = ExamQuestions::find_by_id(question_id)
            .one(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询考试题目失败: {e}")))?;

        Ok(result.map(|m| m.into_exam_question()))
    }

    /// 考试的全部题目
    pub async fn list_exam_questions_impl(&self, exam_id: i64) -> Result<Vec<ExamQuestion>> {
        let questions = ExamQuestions::find()
            .filter(QuestionColumn::ExamDefinitionId.eq(exam_id))
            .order_by_asc(QuestionColumn::Sequence)
            .order_by_asc(QuestionColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询考试题目失败: {e}")))?;

        Ok(questions.into_iter().map(|m| m.into_exam_question()).collect())
    }

    /// 下一个题目序号
    pub async fn next_exam_question_sequence_impl(&self, exam_id: i64) -> Result<i32> {
        let max: Option<Option<i32>> = ExamQuestions::find()
            .select_only()
            .column_as(QuestionColumn::Sequence.max(), "max_sequence")
            .filter(QuestionColumn::ExamDefinitionId.eq(exam_id))
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询题目序号失败: {e}")))?;

        Ok(max.flatten().unwrap_or(0) + 1)
    }

    /// 删除题目
    pub async fn delete_exam_question_impl(&self, question_id: i64) -> Result<bool> {
        let result = ExamQuestions::delete_by_id(question_id)
            .exec(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("删除考试题目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 记录成绩
    pub async fn create_exam_impl(&self, req: CreateExamRequest) -> Result<Exam> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            kind: Set(req.kind.to_string()),
            exam_definition_id: Set(req.exam_definition_id),
            grade: Set(req.grade),
            comment: Set(req.comment),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("保存成绩失败: {e}")))?;

        Ok(result.into_exam())
    }

    /// 保存课程评价，已评价过则覆盖
    pub async fn save_course_evaluation_impl(
        &self,
        student_id: i64,
        course_id: i64,
        grade: f64,
        comment: Option<String>,
    ) -> Result<Exam> {
        let existing = Exams::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::Kind.eq(ExamKind::EVALUATION)),
            )
            .one(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询课程评价失败: {e}")))?;

        let Some(existing) = existing else {
            return self
                .create_exam_impl(CreateExamRequest {
                    student_id,
                    course_id,
                    kind: ExamKind::Evaluation,
                    exam_definition_id: None,
                    grade,
                    comment,
                })
                .await;
        };

        let model = ActiveModel {
            id: Set(existing.id),
            grade: Set(grade),
            comment: Set(comment),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("更新课程评价失败: {e}")))?;

        Ok(result.into_exam())
    }

    /// 学生在课程中的全部成绩
    pub async fn list_student_course_exams_impl(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<Vec<Exam>> {
        let exams = Exams::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::CourseId.eq(course_id)),
            )
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(exams.into_iter().map(|m| m.into_exam()).collect())
    }

    /// 课程评价的平均分与数量
    pub async fn get_course_evaluation_summary_impl(
        &self,
        course_id: i64,
    ) -> Result<EvaluationSummary> {
        let grades: Vec<f64> = Exams::find()
            .select_only()
            .column(Column::Grade)
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::Kind.eq(ExamKind::EVALUATION)),
            )
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ElearningError::database_operation(format!("查询课程评价失败: {e}")))?;

        let count = grades.len() as u64;
        let average = (count > 0).then(|| grades.iter().sum::<f64>() / count as f64);

        Ok(EvaluationSummary { average, count })
    }
}
