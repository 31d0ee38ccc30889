//! Cash-flow figures derived from bucket totals.

use serde::{Deserialize, Serialize};

use super::category::Bucket;

/// Per-bucket totals for one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BucketTotals {
    pub income: f64,
    pub future: f64,
    pub living: f64,
    pub present: f64,
}

impl BucketTotals {
    pub fn get(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::Income => self.income,
            Bucket::Future => self.future,
            Bucket::Living => self.living,
            Bucket::Present => self.present,
        }
    }

    /// Everything allocated out of income. Percentages are taken against this, not income.
    pub fn allocation_base(&self) -> f64 {
        Bucket::ALLOCATIONS
            .iter()
            .map(|bucket| self.get(*bucket))
            .sum()
    }

    pub fn net_cash_flow(&self) -> f64 {
        self.income - self.allocation_base()
    }

    /// Rounded share of the allocation base; 0 when nothing is allocated.
    pub fn percent(&self, bucket: Bucket) -> i64 {
        let base = self.allocation_base();
        if base == 0.0 {
            return 0;
        }
        (100.0 * self.get(bucket) / base).round() as i64
    }
}
