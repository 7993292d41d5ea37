use crate::core::error::ConfigError;
use crate::seating::{TABLE_CAPACITIES, TableDefinition, WaiterProfile};

/// Default waiter ring, in allocation order
pub const DEFAULT_WAITER_ROSTER: &str =
    "STF001:Thandi Mthembu,STF002:Sphiwe Ndlovu,STF003:Naledi Mokoena,STF004:Mpho Sithole";

/// Default floor: four 2-seat, six 4-seat, four 6-seat and two 8-seat tables
pub const DEFAULT_TABLE_LAYOUT: &str = "2x4,4x6,6x4,8x2";

/// 服务配置
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | (未设置) | 日志目录, 设置后写入滚动日志文件 |
/// | WAITER_ROSTER | STF001:Thandi Mthembu,... | 服务员名单 `STAFF_ID:Name`, 逗号分隔 |
/// | TABLE_LAYOUT | 2x4,4x6,6x4,8x2 | 桌台布局 `CAPACITYxCOUNT`, 从 1 开始编号 |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | 优雅关闭超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// HTTP_PORT=8080 TABLE_LAYOUT=2x2,4x2 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | production
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    /// 服务员轮转顺序
    pub roster: Vec<WaiterProfile>,
    pub layout: Vec<TableDefinition>,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 未设置的变量使用默认值, 无法解析的值返回错误
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            http_port: parse_value("HTTP_PORT", &value("HTTP_PORT", "3000"))?,
            environment: value("ENVIRONMENT", "development"),
            log_level: value("LOG_LEVEL", "info"),
            log_json: parse_value("LOG_JSON", &value("LOG_JSON", "false"))?,
            log_dir: lookup("LOG_DIR").filter(|dir| !dir.trim().is_empty()),
            roster: parse_roster(&value("WAITER_ROSTER", DEFAULT_WAITER_ROSTER))?,
            layout: parse_layout(&value("TABLE_LAYOUT", DEFAULT_TABLE_LAYOUT))?,
            shutdown_timeout_ms: parse_value(
                "SHUTDOWN_TIMEOUT_MS",
                &value("SHUTDOWN_TIMEOUT_MS", "10000"),
            )?,
        })
    }
}

impl Default for Config {
    /// Built-in defaults, ignoring the environment
    fn default() -> Self {
        Self {
            http_port: 3000,
            environment: "development".into(),
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
            roster: parse_roster(DEFAULT_WAITER_ROSTER).unwrap_or_default(),
            layout: parse_layout(DEFAULT_TABLE_LAYOUT).unwrap_or_default(),
            shutdown_timeout_ms: 10000,
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// `STF001:Thandi Mthembu,STF002:Sphiwe Ndlovu`
///
/// An empty string is an empty roster.
pub fn parse_roster(raw: &str) -> Result<Vec<WaiterProfile>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (staff_id, name) = entry
                .split_once(':')
                .map(|(id, name)| (id.trim(), name.trim()))
                .filter(|(id, name)| !id.is_empty() && !name.is_empty())
                .ok_or_else(|| ConfigError::InvalidRosterEntry(entry.to_string()))?;
            Ok(WaiterProfile::new(staff_id, name))
        })
        .collect()
}

/// `2x4,4x6` = four 2-seat tables then six 4-seat tables, numbered from 1
///
/// Capacities outside [`TABLE_CAPACITIES`] are rejected.
pub fn parse_layout(raw: &str) -> Result<Vec<TableDefinition>, ConfigError> {
    let mut tables = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let invalid = || ConfigError::InvalidLayoutEntry(entry.to_string());
        let (capacity, count) = entry
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let capacity: u32 = capacity.trim().parse().map_err(|_| invalid())?;
        let count: u32 = count.trim().parse().map_err(|_| invalid())?;
        if !TABLE_CAPACITIES.contains(&capacity) || count == 0 {
            return Err(invalid());
        }

        for _ in 0..count {
            let number = tables.len() as u32 + 1;
            tables.push(TableDefinition::new(number, capacity));
        }
    }

    Ok(tables)
}
