//! Sparse, copy-on-write storage of per-month amounts.

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use super::category::CategoryId;

/// Number of editable months (25 years).
pub const MAX_MONTH_INDEX: usize = 300;

/// Address of a single month in a category row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    pub category: CategoryId,
    pub month: usize,
}

impl CellKey {
    pub fn new(category: CategoryId, month: usize) -> Self {
        Self { category, month }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.category, self.month)
    }
}

/// Immutable snapshot of every entered amount.
///
/// Absent keys read as zero and zero writes drop the key, so the map only ever
/// holds non-zero amounts. Cloning is cheap: the map sits behind an [`Arc`] and
/// is copied once per mutating call.
#[derive(Debug, Clone, Default)]
pub struct TimeKeyedStore {
    values: Arc<HashMap<CellKey, f64>>,
}

impl TimeKeyedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: &CategoryId, month: usize) -> f64 {
        self.values
            .get(&CellKey::new(category.clone(), month))
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of `get` over `[start, start + span)`.
    pub fn get_range(&self, category: &CategoryId, start: usize, span: usize) -> f64 {
        (start..start + span)
            .map(|month| self.get(category, month))
            .sum()
    }

    /// Returns a new store with one month replaced.
    pub fn with_set(&self, category: &CategoryId, month: usize, amount: f64) -> Self {
        self.with_range(category, month..month + 1, amount)
    }

    /// Returns a new store with every month of `months` set to `amount`.
    pub fn with_range(&self, category: &CategoryId, months: Range<usize>, amount: f64) -> Self {
        let mut next = self.clone();
        next.write_range(category, months, amount);
        next
    }

    /// In-place write used while a snapshot is still being built and not yet shared.
    pub(crate) fn write_range(&mut self, category: &CategoryId, months: Range<usize>, amount: f64) {
        let values = Arc::make_mut(&mut self.values);
        for month in months {
            let key = CellKey::new(category.clone(), month);
            if amount == 0.0 {
                values.remove(&key);
            } else {
                values.insert(key, amount);
            }
        }
    }

    /// Whether both snapshots share the same underlying map.
    pub fn shares_storage_with(&self, other: &TimeKeyedStore) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CellKey, f64)> {
        self.values.iter().map(|(key, amount)| (key, *amount))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PartialEq for TimeKeyedStore {
    fn eq(&self, other: &Self) -> bool {
        self.shares_storage_with(other) || self.values == other.values
    }
}
