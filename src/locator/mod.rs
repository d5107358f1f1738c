//! Pluggable uri location strategies.
//!
//! A [`UriLocator`] resolves a normalized uri to a readable byte stream. A
//! [`LocatorSet`] chains several strategies in fixed priority order: the first
//! strategy that succeeds wins, and exhaustion reports every strategy tried.

mod fs;
mod memory;

pub use fs::FsLocator;
pub use memory::MemoryLocator;

use std::io::Read;

use thiserror::Error;

use crate::debug;

// ============================================================================
// LocateError
// ============================================================================

/// A locator strategy could not resolve a uri
#[derive(Debug, Error)]
pub enum LocateError {
    /// The strategy understood the uri but found nothing behind it.
    #[error("`{uri}`: not found")]
    NotFound { uri: String },

    /// The uri's scheme is not handled by this strategy.
    #[error("`{uri}`: unsupported uri scheme")]
    UnsupportedScheme { uri: String },

    /// I/O failure before any bytes were obtained.
    #[error("i/o failure while locating `{uri}`")]
    Io {
        uri: String,
        #[source]
        source: std::io::Error,
    },

    /// Every strategy in a [`LocatorSet`] failed.
    #[error("no locator could resolve `{uri}` (tried: {})", tried.join(", "))]
    Exhausted { uri: String, tried: Vec<String> },
}

// ============================================================================
// UriLocator
// ============================================================================

/// Strategy resolving a uri to a byte stream.
///
/// Implementations must never "succeed with nothing": a successful return is
/// always a readable stream. Opening may block on I/O; the caller owns the
/// returned handle and releases the underlying channel by dropping it.
pub trait UriLocator: Send + Sync {
    /// Short strategy name for diagnostics.
    fn name(&self) -> &str;

    /// Resolve `uri` to a fresh byte stream.
    fn locate(&self, uri: &str) -> Result<Box<dyn Read + Send>, LocateError>;
}

// ============================================================================
// LocatorSet
// ============================================================================

/// Ordered chain of locator strategies, tried first to last.
///
/// Retry across strategies is the only retry policy in the crate; individual
/// strategies never retry internally.
#[derive(Default)]
pub struct LocatorSet {
    locators: Vec<Box<dyn UriLocator>>,
}

impl LocatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy at the lowest priority.
    pub fn with(mut self, locator: impl UriLocator + 'static) -> Self {
        self.locators.push(Box::new(locator));
        self
    }

    pub fn len(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }
}

impl UriLocator for LocatorSet {
    fn name(&self) -> &str {
        "chain"
    }

    /// Try each strategy in priority order; first success wins.
    ///
    /// Failure is [`LocateError::Exhausted`] carrying one diagnostic line per
    /// strategy tried.
    fn locate(&self, uri: &str) -> Result<Box<dyn Read + Send>, LocateError> {
        let mut tried = Vec::with_capacity(self.locators.len());
        for locator in &self.locators {
            match locator.locate(uri) {
                Ok(stream) => {
                    debug!("locate"; "`{}` resolved by {}", uri, locator.name());
                    return Ok(stream);
                }
                Err(err) => {
                    debug!("locate"; "{} failed for `{}`: {}", locator.name(), uri, err);
                    tried.push(format!("{}: {}", locator.name(), err));
                }
            }
        }
        Err(LocateError::Exhausted {
            uri: uri.to_string(),
            tried,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
