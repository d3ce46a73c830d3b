//! Ownership-scoped tracker persistence.
//!
//! Every read/mutate/delete is keyed by tracker id AND owner id in a single
//! compound-predicate statement, so a tracker owned by someone else is
//! indistinguishable from one that does not exist.

pub mod repository;

use models::tracker::CompareMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mutable tracker fields; `update` replaces all of them, no partial merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSpec {
    pub name: String,
    pub cron_expr: String,
    pub compare_mode: CompareMode,
    pub website_url: String,
    pub selector: String,
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Tracker not found")]
    NotFound,
    #[error("database error: {0}")]
    Db(String),
}
