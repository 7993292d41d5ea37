use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::core::Config;
use crate::orders::OrderBook;
use crate::seating::SeatingCoordinator;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝, 每个请求处理器拿到的是同一个座位引擎和订单簿。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | seating | Arc<SeatingCoordinator> | 座位分配引擎 |
/// | orders | Arc<OrderBook> | 订单簿 |
/// | started_at | DateTime<Utc> | 启动时间 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub seating: Arc<SeatingCoordinator>,
    pub orders: Arc<OrderBook>,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    /// Build the engine from the configured roster and table layout
    pub fn initialize(config: &Config) -> Self {
        let seating = Arc::new(SeatingCoordinator::new(
            config.roster.clone(),
            config.layout.clone(),
        ));
        let orders = Arc::new(OrderBook::new(seating.clone()));

        Self {
            config: config.clone(),
            seating,
            orders,
            started_at: Utc::now(),
        }
    }

    pub fn seating(&self) -> &SeatingCoordinator {
        &self.seating
    }

    pub fn orders(&self) -> &OrderBook {
        &self.orders
    }

    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}
