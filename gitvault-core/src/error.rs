//! Error types for gitvault-core.

use thiserror::Error;

/// All errors that can arise when assembling a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No account identifier was provided by flag or environment.
    #[error("no account configured; pass --account or set GITHUB_USERNAME")]
    MissingAccount,
}
