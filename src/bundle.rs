//! Group bundling: retrieve, process and concatenate member content.
//!
//! This is the writer end of the group contract: members of one kind, in
//! declared order, each run through the pipeline, concatenated with
//! kind-appropriate separators (a `;` guard between scripts so concatenation
//! cannot merge statements across files).
//!
//! Retrieval and processing are independent per member, so they run in
//! parallel; declared order is restored before anything is written. A failing
//! member never vanishes silently — it either aborts the bundle or is skipped
//! with a warning and recorded in the report, per the chosen policy.

use std::io::Write;

use rayon::prelude::*;
use thiserror::Error;

use crate::log;
use crate::model::Group;
use crate::processor::{Pipeline, ProcessError};
use crate::resource::{ResourceError, ResourceKind};

// ============================================================================
// Types
// ============================================================================

/// What to do when a single member fails to retrieve or process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnError {
    /// Stop at the first failing member and surface its error.
    Abort,
    /// Leave the member out, log a warning, record it in the report.
    Skip,
}

/// Outcome of writing one bundle.
#[derive(Debug, Default)]
pub struct BundleReport {
    /// Number of members written.
    pub written: usize,
    /// Skipped members as (uri, error) pairs. Empty under [`OnError::Abort`].
    pub skipped: Vec<(String, String)>,
}

/// A bundle could not be produced
#[derive(Debug, Error)]
pub enum BundleError {
    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("failed writing bundle output")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Bundling
// ============================================================================

/// Write the processed content of every `kind` member of `group` into `out`.
///
/// Works on a snapshot of the group taken at entry; concurrent model
/// mutation cannot corrupt the bundle.
pub fn write_group(
    group: &Group,
    kind: ResourceKind,
    pipeline: &Pipeline,
    policy: OnError,
    out: &mut dyn Write,
) -> Result<BundleReport, BundleError> {
    let members: Vec<_> = group
        .resources()
        .iter()
        .filter(|r| r.kind() == kind)
        .cloned()
        .collect();

    // Indexed collect keeps results in member order.
    let results: Vec<Result<String, BundleError>> = members
        .par_iter()
        .map(|resource| {
            let content = resource.read_content()?;
            let processed = pipeline.run(resource.uri().as_str(), content)?;
            Ok(processed)
        })
        .collect();

    let mut report = BundleReport::default();
    for (resource, result) in members.iter().zip(results) {
        match result {
            Ok(content) => {
                if report.written > 0 {
                    out.write_all(b"\n")?;
                }
                out.write_all(content.as_bytes())?;
                if kind == ResourceKind::Script && needs_semicolon_guard(&content) {
                    out.write_all(b";")?;
                }
                report.written += 1;
            }
            Err(err) => match policy {
                OnError::Abort => return Err(err),
                OnError::Skip => {
                    log!("bundle"; "skipping `{}` in group `{}`: {}", resource.uri(), group.name(), err);
                    report.skipped.push((resource.uri().to_string(), err.to_string()));
                }
            },
        }
    }

    Ok(report)
}

/// Whether concatenating another script directly after `content` could merge
/// statements. A trailing `;` or `}` is already safe.
fn needs_semicolon_guard(content: &str) -> bool {
    match content.trim_end().chars().next_back() {
        Some(';') | Some('}') | None => false,
        Some(_) => true,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::{MemoryLocator, UriLocator};
    use crate::processor::unit;
    use crate::resource::Resource;
    use anyhow::bail;
    use std::sync::Arc;

    fn group_with(entries: &[(&str, ResourceKind, &[u8])]) -> Group {
        let mut memory = MemoryLocator::new();
        for (uri, _, bytes) in entries {
            memory.insert(*uri, bytes.to_vec());
        }
        let locator: Arc<dyn UriLocator> = Arc::new(memory);

        let group = Group::new("all");
        for (uri, kind, _) in entries {
            let resource = Resource::new(uri, *kind, Arc::clone(&locator)).unwrap();
            group.append(&resource).unwrap();
        }
        group
    }

    #[test]
    fn test_scripts_concatenated_in_order_with_guard() {
        let group = group_with(&[
            ("/js/a.js", ResourceKind::Script, b"let a = 1"),
            ("/js/b.js", ResourceKind::Script, b"let b = 2;"),
        ]);

        let mut out = Vec::new();
        let report = write_group(
            &group,
            ResourceKind::Script,
            &Pipeline::new(),
            OnError::Abort,
            &mut out,
        )
        .unwrap();

        assert_eq!(report.written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "let a = 1;\nlet b = 2;");
    }

    #[test]
    fn test_styles_filtered_and_joined() {
        let group = group_with(&[
            ("/css/a.css", ResourceKind::Style, b".a{}"),
            ("/js/x.js", ResourceKind::Script, b"x()"),
            ("/css/b.css", ResourceKind::Style, b".b{}"),
        ]);

        let mut out = Vec::new();
        let report = write_group(
            &group,
            ResourceKind::Style,
            &Pipeline::new(),
            OnError::Abort,
            &mut out,
        )
        .unwrap();

        assert_eq!(report.written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), ".a{}\n.b{}");
    }

    #[test]
    fn test_pipeline_applied_per_member() {
        let group = group_with(&[
            ("/css/a.css", ResourceKind::Style, b"a"),
            ("/css/b.css", ResourceKind::Style, b"b"),
        ]);
        let pipeline = Pipeline::new().with(unit("upper", |s| Ok(s.to_uppercase())));

        let mut out = Vec::new();
        write_group(&group, ResourceKind::Style, &pipeline, OnError::Abort, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "A\nB");
    }

    #[test]
    fn test_abort_surfaces_first_failure() {
        // /css/missing.css is a member but has no backing content
        let group = group_with(&[("/css/a.css", ResourceKind::Style, b".a{}")]);
        let locator: Arc<dyn UriLocator> = Arc::new(MemoryLocator::new());
        let missing = Resource::new("/css/missing.css", ResourceKind::Style, locator).unwrap();
        group.append(&missing).unwrap();

        let mut out = Vec::new();
        let err = write_group(
            &group,
            ResourceKind::Style,
            &Pipeline::new(),
            OnError::Abort,
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, BundleError::Resource(_)));
    }

    #[test]
    fn test_skip_records_failures_and_keeps_rest() {
        let group = group_with(&[
            ("/js/ok.js", ResourceKind::Script, b"ok();"),
            ("/js/bad.js", ResourceKind::Script, b"bad();"),
            ("/js/fine.js", ResourceKind::Script, b"fine();"),
        ]);
        let pipeline = Pipeline::new().with(unit("picky", |s| {
            if s.contains("bad") {
                bail!("refused");
            }
            Ok(s.to_string())
        }));

        let mut out = Vec::new();
        let report = write_group(
            &group,
            ResourceKind::Script,
            &pipeline,
            OnError::Skip,
            &mut out,
        )
        .unwrap();

        assert_eq!(report.written, 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].0, "/js/bad.js");
        assert!(report.skipped[0].1.contains("picky"));
        assert_eq!(String::from_utf8(out).unwrap(), "ok();\nfine();");
    }

    #[test]
    fn test_empty_selection_writes_nothing() {
        let group = group_with(&[("/css/a.css", ResourceKind::Style, b".a{}")]);
        let mut out = Vec::new();
        let report = write_group(
            &group,
            ResourceKind::Script,
            &Pipeline::new(),
            OnError::Abort,
            &mut out,
        )
        .unwrap();
        assert_eq!(report.written, 0);
        assert!(out.is_empty());
    }
}
