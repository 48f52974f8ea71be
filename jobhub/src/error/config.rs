#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),

    #[error("Invalid value for {field}: {message}")]
    Invalid { field: &'static str, message: String },

    /// Reading, interpolating or parsing the config file failed
    #[error("Failed to load config file: {0:#}")]
    File(#[from] anyhow::Error),
}
