use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::fields::StatField;

#[derive(Debug, Error)]
pub enum MemStatsError {
    /// The memory-info source could not be opened. No data was read.
    #[error("memory info source {} is unavailable: {source}", .path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A recognized line whose value does not fit in a `u64`.
///
/// Only ever logged; the line is dropped and scanning carries on.
#[derive(Debug, Error)]
#[error("invalid value {digits:?} for {field}: {source}")]
pub struct FieldParseError {
    pub field: StatField,
    pub digits: String,
    #[source]
    pub source: ParseIntError,
}
