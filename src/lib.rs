//! EducaMais - 在线课程平台后端服务
//!
//! 基于 Actix Web 构建的服务端渲染式学习平台：课程、课时、练习、考试与答疑。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis），保存会话用户与撤销标记
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 会话、角色、课程访问与限流中间件
//! - `models`: 数据模型与视图模型
//! - `routes`: 页面与表单路由
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub mod test_support;
