//! Floor Server - 餐厅前厅座位分配引擎
//!
//! # 架构概述
//!
//! - **座位引擎** (`seating`): 服务员轮转分配、桌台最佳匹配、堂食/外带排队
//! - **订单簿** (`orders`): 订单金额和结账, 结账时释放服务员和桌台
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! floor-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── seating/       # 服务员、桌台、队列、协调器
//! ├── orders/        # 订单簿
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 错误映射、日志
//! ```

pub mod api;
pub mod core;
pub mod orders;
pub mod seating;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use orders::OrderBook;
pub use seating::{AdmissionError, SeatingCoordinator, SeatingError};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ______ __
   / ____// /____   ____   _____
  / /_   / // __ \ / __ \ / ___/
 / __/  / // /_/ // /_/ // /
/_/    /_/ \____/ \____//_/
    "#
    );
}
