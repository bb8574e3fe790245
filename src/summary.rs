//! Perfect-tap classification and cross-register aggregation.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use crate::{sweep::TapRun, State};

/// Order runs for reporting: fewest cycles first, ties broken by the
/// longest maximum cycle, then by tap value. Configurations with fewer,
/// longer cycles surface first.
pub fn rank(runs: &mut [TapRun]) {
    runs.sort_by_key(|run| {
        (
            run.partition.cycle_count(),
            Reverse(run.partition.max_period()),
            run.taps,
        )
    });
}

/// Tap masks whose nonzero states form a single cycle.
pub fn perfect_taps(runs: &[TapRun]) -> Vec<State> {
    runs.iter()
        .filter(|run| run.partition.is_perfect())
        .map(|run| run.taps)
        .collect()
}

/// Distinct cycle lengths observed across one register count's runs,
/// ascending.
pub fn distinct_periods(runs: &[TapRun]) -> BTreeSet<u64> {
    runs.iter()
        .flat_map(|run| run.partition.cycles().iter().map(|cycle| cycle.len() as u64))
        .collect()
}

/// Cross-index from cycle length to the register counts realizing it.
///
/// Register counts are recorded ascending, so the order in which periods
/// first appear is the "minimum register count first" report order.
#[derive(Clone, Debug, Default)]
pub struct PeriodIndex {
    buckets: BTreeMap<u64, BTreeSet<u32>>,
    first_seen: Vec<u64>,
}

impl PeriodIndex {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn record(&mut self, register_count: u32, period: u64) {
        let bucket = self.buckets.entry(period).or_insert_with(BTreeSet::new);
        if bucket.is_empty() {
            self.first_seen.push(period);
        }
        bucket.insert(register_count);
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Entries in first-appearance order.
    pub fn by_first_register(&self) -> impl Iterator<Item = (u64, &BTreeSet<u32>)> {
        self.first_seen
            .iter()
            .map(move |period| (*period, &self.buckets[period]))
    }

    /// Entries ascending by period.
    pub fn by_period(&self) -> impl Iterator<Item = (u64, &BTreeSet<u32>)> {
        self.buckets
            .iter()
            .map(|(period, registers)| (*period, registers))
    }
}
