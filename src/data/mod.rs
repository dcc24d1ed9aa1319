//! Data layer: core types, loading, reshaping, filtering, aggregation.
//!
//! Architecture:
//! ```text
//!  four .csv files (+ optional grouping.json)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  read files → typed record tables
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ reshape   │  wide year columns → long rows, group / gas labels
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ Session   │  record tables + entity / year lookups
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐     ┌───────────┐     ┌──────────┐
//!   │  filter   │ ──▶ │ aggregate  │ ──▶ │ present   │  chart sources
//!   └──────────┘     └───────────┘     └──────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod present;
pub mod reshape;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Errors surfaced by the data layer.
///
/// Both variants abort the session load; the current session (if any) is
/// left untouched and the message is shown in the status bar. An empty
/// filter or aggregation result is *not* an error; downstream renders an
/// empty chart or table.
#[derive(Debug, Error)]
pub enum DataError {
    /// The file is missing, unreadable, or not parseable as CSV/JSON.
    #[error("failed to load {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The file parsed, but its columns or values do not match the
    /// expected layout.
    #[error("{}: {message}", path.display())]
    Schema { path: PathBuf, message: String },
}

impl DataError {
    pub fn load(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        DataError::Load {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn schema(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DataError::Schema {
            path: path.into(),
            message: message.into(),
        }
    }
}
