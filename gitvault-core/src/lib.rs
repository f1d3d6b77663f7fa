//! GitVault core library — domain types, run configuration, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs for the mirror pipeline
//! - [`config`] — [`MirrorConfig`], the explicit context threaded into every
//!   component call
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{Credential, MirrorConfig};
pub use error::ConfigError;
pub use types::{
    AccountName, MirrorEntry, Presence, RepoId, RepositoryRecord, RepositorySet, VisibilityScope,
};
