use thiserror::Error;

/// Bad configuration value; aborts startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("Invalid roster entry '{0}', expected STAFF_ID:Name")]
    InvalidRosterEntry(String),

    #[error("Invalid table layout entry '{0}', expected CAPACITYxCOUNT with CAPACITY in 2, 4, 6 or 8")]
    InvalidLayoutEntry(String),
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("Graceful shutdown timed out after {0} ms")]
    ShutdownTimeout(u64),
}

pub type Result<T> = std::result::Result<T, ServerError>;
