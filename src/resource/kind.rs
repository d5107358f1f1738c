//! Resource kind definitions.

use serde::{Deserialize, Serialize};

/// Kind of bundled resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Stylesheet content (css).
    Style,
    /// Script content (js).
    Script,
}

impl ResourceKind {
    /// Canonical file extension for this kind.
    pub const fn ext(self) -> &'static str {
        match self {
            Self::Style => "css",
            Self::Script => "js",
        }
    }

    /// Map a file extension to a kind.
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext {
            "css" => Some(Self::Style),
            "js" | "mjs" => Some(Self::Script),
            _ => None,
        }
    }
}
