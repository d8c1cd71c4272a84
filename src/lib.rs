//! AssignEase Grader - 编程作业评测编排服务
//!
//! 基于 Actix Web 构建：把学生提交交给代码沙箱（Judge0 / Piston）运行测试用例，
//! 汇总得分，并在后台调用大模型给出错误类型与反馈。
//!
//! # 架构
//! - `ai`: AI 评估（提示词、模型客户端、JSON 提取与归一化、后台任务）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `events`: 评测事件与通知出站
//! - `grading`: 语言解析与成绩汇总
//! - `middlewares`: 限流中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `sandbox`: 代码执行后端适配
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod ai;
pub mod config;
pub mod entity;
pub mod errors;
pub mod events;
pub mod grading;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod sandbox;
pub mod services;
pub mod storage;
pub mod utils;
