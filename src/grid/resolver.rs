use super::category::{Bucket, CategoryId};
use super::columns::ColumnDef;
use super::metrics::BucketTotals;
use super::registry::CategoryRegistry;
use super::store::TimeKeyedStore;

/// Read-only view that aggregates store values per column.
#[derive(Debug, Clone, Copy)]
pub struct CellValueResolver<'a> {
    store: &'a TimeKeyedStore,
    registry: &'a CategoryRegistry,
}

impl<'a> CellValueResolver<'a> {
    pub fn new(store: &'a TimeKeyedStore, registry: &'a CategoryRegistry) -> Self {
        Self { store, registry }
    }

    pub fn cell_value(&self, category: &CategoryId, column: &ColumnDef) -> f64 {
        self.store.get_range(category, column.index, column.span)
    }

    /// Sum over the categories currently assigned to `bucket`; orphaned ids never count.
    pub fn bucket_total(&self, bucket: Bucket, column: &ColumnDef) -> f64 {
        self.registry
            .list_by_bucket(bucket)
            .into_iter()
            .map(|category| self.cell_value(&category.id, column))
            .sum()
    }

    pub fn bucket_totals(&self, column: &ColumnDef) -> BucketTotals {
        BucketTotals {
            income: self.bucket_total(Bucket::Income, column),
            future: self.bucket_total(Bucket::Future, column),
            living: self.bucket_total(Bucket::Living, column),
            present: self.bucket_total(Bucket::Present, column),
        }
    }
}
