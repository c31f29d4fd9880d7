//! Target resolution.
//!
//! # Responsibilities
//! - Turn the inbound host into an upstream base URL
//! - Fill template placeholders from host pattern captures
//!
//! # Design Decisions
//! - Static templates are parsed once and never look at the host
//! - The host is matched exactly as received (no lowercasing, no port stripping)
//! - Partial substitution is never returned

use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::config::{ProxyConfig, ValidationError};
use crate::routing::template::TargetTemplate;

/// Why a request could not be mapped to an upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("host did not match pattern")]
    NoMatch,

    #[error("{0} has no corresponding capture")]
    MissingCapture(String),

    #[error("{0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Outcome of resolving one request.
pub type ResolvedTarget = Result<Url, ResolveError>;

/// Maps inbound hosts to upstream base URLs.
#[derive(Debug, Clone)]
pub enum TargetResolver {
    /// Placeholder-free target, same for every host.
    Static(Url),
    /// Target filled from captures of `pattern` against the host.
    Templated {
        template: TargetTemplate,
        pattern: Regex,
    },
}

impl TargetResolver {
    /// Build a resolver for the configured target.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, ValidationError> {
        Self::new(&config.target_template, config.host_pattern.as_deref())
    }

    pub fn new(target: &str, host_pattern: Option<&str>) -> Result<Self, ValidationError> {
        let template = TargetTemplate::parse(target);
        if !template.has_placeholders() {
            let url = Url::parse(target).map_err(|source| ValidationError::InvalidTarget {
                target: target.to_string(),
                source,
            })?;
            return Ok(Self::Static(url));
        }

        let pattern = host_pattern
            .ok_or_else(|| ValidationError::MissingHostPattern(target.to_string()))?;
        Ok(Self::Templated {
            template,
            pattern: Regex::new(pattern)?,
        })
    }

    /// Resolve the upstream base URL for `host`.
    pub fn resolve(&self, host: &str) -> ResolvedTarget {
        match self {
            Self::Static(url) => Ok(url.clone()),
            Self::Templated { template, pattern } => {
                let captures = pattern.captures(host).ok_or(ResolveError::NoMatch)?;
                let rendered = template.render(&captures)?;
                Ok(Url::parse(&rendered)?)
            }
        }
    }
}
