//! Configuration error types.

use std::path::PathBuf;

/// Errors that can occur when locating, loading, saving, or parsing `config.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The OS exposes no configuration directory and none was given.
    #[error("no configuration directory available; pass --config <dir>")]
    NoConfigDir,

    /// Failed to read the config file.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create the config directory or write the file.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File or directory that could not be written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid RON for [`crate::Config`].
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser error with span information.
        #[source]
        source: ron::error::SpannedError,
    },

    /// Failed to serialize the config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),
}
