//! Snapshot of the kernel's memory accounting counters from `/proc/meminfo`.
//!
//! ```no_run
//! let stats = memstats::get_mem_stats()?;
//! println!("used: {} kB of {} kB", stats.mem_used, stats.mem_total.unwrap_or(0));
//! # Ok::<(), memstats::MemStatsError>(())
//! ```
//!
//! All values are in kilobytes. The crate only exists on Linux; other
//! targets get an empty crate and must select their own implementation at
//! build time.
#![cfg(target_os = "linux")]

pub mod error;
pub mod fields;
pub mod parse;
pub mod reader;
pub mod stats;

pub use error::{FieldParseError, MemStatsError};
pub use fields::{DerivedStat, StatField, UnknownField};
pub use parse::parse_meminfo;
pub use reader::{get_mem_stats, MemInfoReader, MEMINFO_PATH};
pub use stats::MemStats;
