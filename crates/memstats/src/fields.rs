use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A `/proc/meminfo` field this crate extracts. Every other field is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatField {
    MemTotal,
    MemFree,
    SwapTotal,
    SwapFree,
    Buffers,
    Cached,
    SwapCached,
    Active,
    Inactive,
    Dirty,
    Writeback,
    Mapped,
    Slab,
    CommitLimit,
    CommittedAs,
}

impl StatField {
    pub const ALL: [StatField; 15] = [
        StatField::MemTotal,
        StatField::MemFree,
        StatField::SwapTotal,
        StatField::SwapFree,
        StatField::Buffers,
        StatField::Cached,
        StatField::SwapCached,
        StatField::Active,
        StatField::Inactive,
        StatField::Dirty,
        StatField::Writeback,
        StatField::Mapped,
        StatField::Slab,
        StatField::CommitLimit,
        StatField::CommittedAs,
    ];

    /// The field name exactly as the kernel spells it, without the colon.
    pub fn name(self) -> &'static str {
        match self {
            StatField::MemTotal => "MemTotal",
            StatField::MemFree => "MemFree",
            StatField::SwapTotal => "SwapTotal",
            StatField::SwapFree => "SwapFree",
            StatField::Buffers => "Buffers",
            StatField::Cached => "Cached",
            StatField::SwapCached => "SwapCached",
            StatField::Active => "Active",
            StatField::Inactive => "Inactive",
            StatField::Dirty => "Dirty",
            StatField::Writeback => "Writeback",
            StatField::Mapped => "Mapped",
            StatField::Slab => "Slab",
            StatField::CommitLimit => "CommitLimit",
            StatField::CommittedAs => "Committed_AS",
        }
    }
}

impl fmt::Display for StatField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized meminfo field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for StatField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Statistics computed after the scan rather than read from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DerivedStat {
    /// `MemTotal - MemFree`
    MemUsed,
    /// `SwapTotal - SwapFree`
    SwapUsed,
    /// `MemFree + Buffers + Cached`
    RealFree,
}

impl DerivedStat {
    pub const ALL: [DerivedStat; 3] = [
        DerivedStat::MemUsed,
        DerivedStat::SwapUsed,
        DerivedStat::RealFree,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DerivedStat::MemUsed => "MemUsed",
            DerivedStat::SwapUsed => "SwapUsed",
            DerivedStat::RealFree => "RealFree",
        }
    }

    /// The recognized fields this statistic is computed from.
    pub fn inputs(self) -> &'static [StatField] {
        match self {
            DerivedStat::MemUsed => &[StatField::MemTotal, StatField::MemFree],
            DerivedStat::SwapUsed => &[StatField::SwapTotal, StatField::SwapFree],
            DerivedStat::RealFree => &[StatField::MemFree, StatField::Buffers, StatField::Cached],
        }
    }
}

impl fmt::Display for DerivedStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
