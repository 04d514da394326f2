//! Error types for the `forever-ripe-core` crate.
//!
//! Configuration failures are fatal to plugin startup and surface through
//! [`PluginError`]. Missing entities, unknown owners, and an unavailable
//! permission service are *not* errors: the ripeness rule declines to act
//! instead.

/// Errors that can occur when loading, resolving, or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write the configuration file.
    #[error("failed to access config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The stored document is not valid JSON or violates the schema.
    #[error("failed to parse config JSON: {source}")]
    Json {
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}

/// Errors reported by the host permission system.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PermissionError {
    /// The permission system cannot be queried right now.
    #[error("permission service unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },

    /// A permission name did not follow the `plugin.capability` convention.
    #[error("invalid permission name: {0}")]
    InvalidName(String),
}

/// Errors that abort plugin startup.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Configuration could not be loaded or persisted.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Permission registration failed.
    #[error("permission registration failed: {0}")]
    Permission(#[from] PermissionError),
}
