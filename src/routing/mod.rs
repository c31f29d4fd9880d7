//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound host (Host header or URI authority)
//!     → resolver.rs (static target, or match host pattern)
//!     → captures.rs (named / positional group lookup)
//!     → template.rs (fill placeholders)
//!     → Return: upstream base URL or ResolveError
//!
//! Resolver Compilation (at startup):
//!     ProxyConfig
//!     → Parse target template
//!     → Compile host pattern (only if the template has placeholders)
//!     → Freeze as immutable TargetResolver
//! ```
//!
//! # Design Decisions
//! - Resolver compiled at startup, immutable at runtime
//! - Deterministic: same host always resolves to the same result
//! - Any missing capture fails resolution outright

pub mod captures;
pub mod resolver;
pub mod template;

pub use captures::CaptureLookup;
pub use resolver::{ResolveError, ResolvedTarget, TargetResolver};
pub use template::TargetTemplate;
