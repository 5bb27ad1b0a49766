use thiserror::Error;

/// Failures reported by a [`FormatterHost`](crate::FormatterHost).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("parse failed: {0}")]
    Parse(String),
    #[error("print failed: {0}")]
    Print(String),
    #[error("format failed: {0}")]
    Format(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluginError {
    #[error("no parser named '{0}' is registered")]
    UnknownParser(String),
    #[error("plugin '{plugin}' preprocess failed: {message}")]
    Preprocess { plugin: String, message: String },
    #[error("plugin '{plugin}' tree transform failed: {message}")]
    Transform { plugin: String, message: String },
    #[error(transparent)]
    Host(#[from] HostError),
}

impl PluginError {
    pub fn transform(plugin: impl Into<String>, message: impl Into<String>) -> Self {
        PluginError::Transform {
            plugin: plugin.into(),
            message: message.into(),
        }
    }
}
