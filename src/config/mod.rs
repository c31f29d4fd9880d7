//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command-line flags / environment (clap)
//!     + optional TOML file (loader.rs)
//!     → layered settings, defaults filled in
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with the request pipeline
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - Every setting has a default except the host pattern
//! - Any validation error is fatal before the listener binds

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, Cli, ConfigError, LoadedConfig};
pub use schema::{ProxyConfig, TlsConfig};
pub use validation::ValidationError;
