//! Per-address occurrence counting.
//!
//! The first stage of the row pipeline: every record contributes one count to
//! its source address and one to its destination address. The resulting map
//! also defines the address universe and its first-seen order.

use crate::model::{Address, Record};
use indexmap::IndexMap;

/// Occurrence counts keyed by address, in first-seen order.
///
/// # Invariants
///
/// - Every count is >= 1
/// - Keys are the distinct non-empty addresses observed, source before
///   destination within each record
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct AddressCounts(IndexMap<Address, u64>);

impl AddressCounts {
    /// Create an empty count map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for `address`, inserting it at the end if unseen.
    pub fn increment(&mut self, address: Address) {
        *self.0.entry(address).or_insert(0) += 1;
    }

    /// Count for `address`, 0 if it was never observed.
    pub fn get(&self, address: &str) -> u64 {
        self.0.get(address).copied().unwrap_or(0)
    }

    /// Whether `address` was observed at least once.
    pub fn contains(&self, address: &str) -> bool {
        self.0.contains_key(address)
    }

    /// Number of distinct addresses.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no address was observed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Distinct addresses in first-seen order.
    pub fn universe(&self) -> impl Iterator<Item = &Address> + '_ {
        self.0.keys()
    }

    /// `(address, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, u64)> + '_ {
        self.0.iter().map(|(addr, count)| (addr, *count))
    }
}

/// Tally how often each address appears as source or destination.
///
/// Missing and empty address fields are skipped. A record whose source and
/// destination are the same address counts that address twice.
pub fn compute_counts<'a, I>(records: I) -> AddressCounts
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut counts = AddressCounts::new();
    for record in records {
        if let Some(src) = record.source() {
            counts.increment(src);
        }
        if let Some(dst) = record.destination() {
            counts.increment(dst);
        }
    }
    counts
}
