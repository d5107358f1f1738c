//! Ordered content transformation pipeline.
//!
//! A [`Pipeline`] is a pure, order-preserving composition of
//! [`TransformUnit`]s: each unit receives exactly the output of its
//! predecessor (the first receives the decoded resource content). A unit
//! failure aborts processing of that resource and surfaces tagged with the
//! unit's name and the resource's uri; later units never run for it. Units
//! are never skipped or reordered, because bundling correctness depends on a
//! stable per-resource transformation order.

pub mod minify;

pub use minify::{CssMinify, JsMinify};

use std::sync::Arc;

use thiserror::Error;

use crate::debug;

// ============================================================================
// TransformUnit
// ============================================================================

/// One content transformation step.
///
/// Units work on fully decoded content, not incremental streams; decoding is
/// the resource's concern, transformation is the unit's.
pub trait TransformUnit: Send + Sync {
    /// Unit name used in failure attribution.
    fn name(&self) -> &str;

    /// Transform `input`, or fail with the underlying cause.
    fn apply(&self, input: &str) -> anyhow::Result<String>;
}

/// Wrap a function as a named [`TransformUnit`].
pub fn unit<F>(name: &'static str, f: F) -> FnUnit<F>
where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
    FnUnit { name, f }
}

/// Function adapter returned by [`unit`].
pub struct FnUnit<F> {
    name: &'static str,
    f: F,
}

impl<F> TransformUnit for FnUnit<F>
where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
    fn name(&self) -> &str {
        self.name
    }

    fn apply(&self, input: &str) -> anyhow::Result<String> {
        (self.f)(input)
    }
}

// ============================================================================
// ProcessError
// ============================================================================

/// A transformation unit failed for one resource
#[derive(Debug, Error)]
#[error("processor `{unit}` failed on `{uri}`")]
pub struct ProcessError {
    /// Name of the failing unit.
    pub unit: String,
    /// Uri of the resource whose content was being processed.
    pub uri: String,
    #[source]
    pub source: anyhow::Error,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Ordered chain of transformation units.
#[derive(Clone, Default)]
pub struct Pipeline {
    units: Vec<Arc<dyn TransformUnit>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a unit at the end of the chain.
    pub fn with(mut self, unit: impl TransformUnit + 'static) -> Self {
        self.units.push(Arc::new(unit));
        self
    }

    /// Append an already-shared unit.
    pub fn push(&mut self, unit: Arc<dyn TransformUnit>) {
        self.units.push(unit);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Run `input` through every unit in declared order.
    ///
    /// `uri` identifies the resource for failure attribution only; the
    /// pipeline itself performs no I/O.
    pub fn run(&self, uri: &str, input: String) -> Result<String, ProcessError> {
        let mut content = input;
        for unit in &self.units {
            debug!("process"; "`{}` through {}", uri, unit.name());
            content = unit.apply(&content).map_err(|source| ProcessError {
                unit: unit.name().to_string(),
                uri: uri.to_string(),
                source,
            })?;
        }
        Ok(content)
    }
}

// ============================================================================
// Tests
// ============================================================================
