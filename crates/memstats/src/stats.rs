use std::collections::BTreeMap;

use serde::Serialize;

use crate::fields::{DerivedStat, StatField};

/// One snapshot of the kernel's memory counters, all in kilobytes.
///
/// Recognized fields are `None` when the running kernel does not report
/// them. The derived statistics are always present; see [`MemStats::derive`]
/// for how missing inputs are treated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemStats {
    /// Total usable RAM.
    #[serde(rename = "MemTotal", skip_serializing_if = "Option::is_none")]
    pub mem_total: Option<u64>,
    /// RAM left completely unused.
    #[serde(rename = "MemFree", skip_serializing_if = "Option::is_none")]
    pub mem_free: Option<u64>,
    #[serde(rename = "SwapTotal", skip_serializing_if = "Option::is_none")]
    pub swap_total: Option<u64>,
    #[serde(rename = "SwapFree", skip_serializing_if = "Option::is_none")]
    pub swap_free: Option<u64>,
    /// Temporary storage for raw disk blocks.
    #[serde(rename = "Buffers", skip_serializing_if = "Option::is_none")]
    pub buffers: Option<u64>,
    /// Page cache, excluding swap cache.
    #[serde(rename = "Cached", skip_serializing_if = "Option::is_none")]
    pub cached: Option<u64>,
    /// Memory that was swapped out, swapped back in, and is still also in
    /// the swap file.
    #[serde(rename = "SwapCached", skip_serializing_if = "Option::is_none")]
    pub swap_cached: Option<u64>,
    /// Recently used memory, usually not reclaimed unless absolutely
    /// necessary.
    #[serde(rename = "Active", skip_serializing_if = "Option::is_none")]
    pub active: Option<u64>,
    /// Less recently used memory, the first candidate for reclaim.
    #[serde(rename = "Inactive", skip_serializing_if = "Option::is_none")]
    pub inactive: Option<u64>,
    /// Pages waiting to be written back to disk. Kernel 2.6+.
    #[serde(rename = "Dirty", skip_serializing_if = "Option::is_none")]
    pub dirty: Option<u64>,
    /// Pages actively being written back to disk. Kernel 2.6+.
    #[serde(rename = "Writeback", skip_serializing_if = "Option::is_none")]
    pub writeback: Option<u64>,
    /// Files mapped into memory with mmap, such as libraries. Kernel 2.6+.
    #[serde(rename = "Mapped", skip_serializing_if = "Option::is_none")]
    pub mapped: Option<u64>,
    /// In-kernel data structure caches. Kernel 2.6+.
    #[serde(rename = "Slab", skip_serializing_if = "Option::is_none")]
    pub slab: Option<u64>,
    /// Total memory currently available to be allocated. Kernel 2.6.9+.
    #[serde(rename = "CommitLimit", skip_serializing_if = "Option::is_none")]
    pub commit_limit: Option<u64>,
    /// Memory presently allocated on the system. Kernel 2.6+.
    #[serde(rename = "Committed_AS", skip_serializing_if = "Option::is_none")]
    pub committed_as: Option<u64>,

    #[serde(rename = "MemUsed")]
    pub mem_used: u64,
    #[serde(rename = "SwapUsed")]
    pub swap_used: u64,
    /// Free memory plus memory the kernel can drop cheaply.
    #[serde(rename = "RealFree")]
    pub real_free: u64,
}

impl MemStats {
    pub fn get(&self, field: StatField) -> Option<u64> {
        *self.slot(field)
    }

    pub fn set(&mut self, field: StatField, value: u64) {
        *self.slot_mut(field) = Some(value);
    }

    pub fn derived(&self, stat: DerivedStat) -> u64 {
        match stat {
            DerivedStat::MemUsed => self.mem_used,
            DerivedStat::SwapUsed => self.swap_used,
            DerivedStat::RealFree => self.real_free,
        }
    }

    /// Look up either a recognized field or a derived statistic by its
    /// kernel-style name.
    pub fn get_by_name(&self, name: &str) -> Option<u64> {
        if let Ok(field) = name.parse::<StatField>() {
            return self.get(field);
        }
        DerivedStat::ALL
            .into_iter()
            .find(|d| d.name() == name)
            .map(|d| self.derived(d))
    }

    /// Recompute the derived statistics from the current field values.
    ///
    /// A missing input counts as zero and subtraction saturates, so
    /// `MemUsed` is 0 rather than a wrapped value when `MemTotal` is absent.
    /// Each derived statistic computed from missing inputs is logged.
    pub fn derive(&mut self) {
        for stat in DerivedStat::ALL {
            let missing: Vec<&str> = stat
                .inputs()
                .iter()
                .filter(|f| self.get(**f).is_none())
                .map(|f| f.name())
                .collect();
            if !missing.is_empty() {
                tracing::warn!(
                    stat = stat.name(),
                    ?missing,
                    "derived stat computed with missing inputs treated as zero"
                );
            }
        }

        let mem_total = self.mem_total.unwrap_or(0);
        let mem_free = self.mem_free.unwrap_or(0);
        let swap_total = self.swap_total.unwrap_or(0);
        let swap_free = self.swap_free.unwrap_or(0);
        let buffers = self.buffers.unwrap_or(0);
        let cached = self.cached.unwrap_or(0);

        self.mem_used = mem_total.saturating_sub(mem_free);
        self.swap_used = swap_total.saturating_sub(swap_free);
        self.real_free = mem_free.saturating_add(buffers).saturating_add(cached);
    }

    /// The open name → value view: present recognized fields plus all
    /// derived statistics.
    pub fn to_map(&self) -> BTreeMap<&'static str, u64> {
        let mut map: BTreeMap<&'static str, u64> = StatField::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|v| (f.name(), v)))
            .collect();
        for stat in DerivedStat::ALL {
            map.insert(stat.name(), self.derived(stat));
        }
        map
    }

    fn slot(&self, field: StatField) -> &Option<u64> {
        match field {
            StatField::MemTotal => &self.mem_total,
            StatField::MemFree => &self.mem_free,
            StatField::SwapTotal => &self.swap_total,
            StatField::SwapFree => &self.swap_free,
            StatField::Buffers => &self.buffers,
            StatField::Cached => &self.cached,
            StatField::SwapCached => &self.swap_cached,
            StatField::Active => &self.active,
            StatField::Inactive => &self.inactive,
            StatField::Dirty => &self.dirty,
            StatField::Writeback => &self.writeback,
            StatField::Mapped => &self.mapped,
            StatField::Slab => &self.slab,
            StatField::CommitLimit => &self.commit_limit,
            StatField::CommittedAs => &self.committed_as,
        }
    }

    fn slot_mut(&mut self, field: StatField) -> &mut Option<u64> {
        match field {
            StatField::MemTotal => &mut self.mem_total,
            StatField::MemFree => &mut self.mem_free,
            StatField::SwapTotal => &mut self.swap_total,
            StatField::SwapFree => &mut self.swap_free,
            StatField::Buffers => &mut self.buffers,
            StatField::Cached => &mut self.cached,
            StatField::SwapCached => &mut self.swap_cached,
            StatField::Active => &mut self.active,
            StatField::Inactive => &mut self.inactive,
            StatField::Dirty => &mut self.dirty,
            StatField::Writeback => &mut self.writeback,
            StatField::Mapped => &mut self.mapped,
            StatField::Slab => &mut self.slab,
            StatField::CommitLimit => &mut self.commit_limit,
            StatField::CommittedAs => &mut self.committed_as,
        }
    }
}
