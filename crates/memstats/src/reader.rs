use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::MemStatsError;
use crate::parse::parse_meminfo;
use crate::stats::MemStats;

/// Where the kernel exposes its memory accounting counters.
pub const MEMINFO_PATH: &str = "/proc/meminfo";

/// Reads one [`MemStats`] snapshot per call.
///
/// Holds no open handle between calls: every [`read`](Self::read) opens the
/// source, scans it once and closes it again.
#[derive(Debug, Clone)]
pub struct MemInfoReader {
    path: PathBuf,
}

impl Default for MemInfoReader {
    fn default() -> Self {
        Self::with_path(MEMINFO_PATH)
    }
}

impl MemInfoReader {
    /// Read from a meminfo-formatted file other than [`MEMINFO_PATH`].
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<MemStats, MemStatsError> {
        let file = File::open(&self.path).map_err(|source| MemStatsError::ResourceUnavailable {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "reading memory info");
        Ok(parse_meminfo(BufReader::new(file)))
    }
}

/// Take a snapshot of the host's memory statistics from [`MEMINFO_PATH`].
pub fn get_mem_stats() -> Result<MemStats, MemStatsError> {
    MemInfoReader::default().read()
}
