#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Failed while loading configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed while initialising the logger: {0}")]
    LoggerError(#[from] tracing_subscriber::util::TryInitError),
    #[error("No merchant named `{0}` is configured")]
    UnknownMerchant(String),
    #[error("No merchant is configured")]
    NoMerchantConfigured,
    #[error("Several merchants are configured, pick one of: {0}")]
    AmbiguousMerchant(String),
    #[error("Notification body is not form-urlencoded: {0}")]
    InvalidNotificationBody(#[from] serde_urlencoded::de::Error),
}
