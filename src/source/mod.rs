//! Source collaborator module.
//!
//! Everything that talks to the outside world on the input side lives here:
//! the `MetadataSource` listing trait, raw record types, secret resolution,
//! and the file-backed source used for offline runs.

pub mod file;
mod provider;
mod secret;
pub mod types;

pub use provider::{MetadataSource, SourceResult, StaticSource};
pub use secret::{EnvSecretResolver, SecretResolver};

/// Errors from source collaborators. Always fatal to the caller; the core
/// never swallows an I/O failure.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("I/O error from source system: {0}")]
    Io(#[from] std::io::Error),

    #[error("Source query failed: {0}")]
    Query(String),

    #[error("Secret resolution failed: {0}")]
    Secret(String),
}
