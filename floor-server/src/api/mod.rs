//! API 路由模块
//!
//! | 模块 | 前缀 | 说明 |
//! |------|------|------|
//! | [`health`] | /health | 健康检查 |
//! | [`patrons`] | /api/patrons | 顾客入场、排队查询 |
//! | [`waiters`] | /api/waiters | 服务员负载和业绩 |
//! | [`tables`] | /api/tables | 桌台占用 |
//! | [`orders`] | /api/orders | 下单、加单、结账 |
//!
//! Every handler except `/health` answers with [`ApiResponse`](shared::ApiResponse).

pub mod health;
pub mod orders;
pub mod patrons;
pub mod tables;
pub mod waiters;

pub use crate::utils::{ApiResult, AppResult};
