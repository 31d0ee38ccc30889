//! Translation between the month store and the calendar-dated row format used
//! by plan files.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::grid::{
    calendar_month, month_offset, Bucket, CategoryRegistry, TimeKeyedStore,
};

/// Months of a plan that are loaded and saved.
pub const EDITABLE_WINDOW: usize = 12;

/// One persisted amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRow {
    pub year: i32,
    pub month: u32,
    pub bucket: Bucket,
    pub category: String,
    pub amount: f64,
}

/// Outcome of [`import_rows`].
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub store: TimeKeyedStore,
    pub imported: usize,
    pub out_of_window: usize,
    pub unmatched: usize,
}

impl ImportReport {
    pub fn dropped(&self) -> usize {
        self.out_of_window + self.unmatched
    }
}

/// Builds a fresh store from `rows`.
///
/// Rows outside the first [`EDITABLE_WINDOW`] months after `reference` and rows
/// whose category name matches no registered display name are skipped. When the
/// same month appears twice the later row wins.
pub fn import_rows(
    rows: &[PlanRow],
    registry: &CategoryRegistry,
    reference: NaiveDate,
) -> ImportReport {
    let mut report = ImportReport::default();
    let mut store = TimeKeyedStore::new();

    for row in rows {
        let offset = month_offset(reference, row.year, row.month);
        if !(1..=12).contains(&row.month) || !(0..EDITABLE_WINDOW as i64).contains(&offset) {
            debug!(year = row.year, month = row.month, "row outside editable window");
            report.out_of_window += 1;
            continue;
        }
        let Some(category) = registry.find_by_name(&row.category, Some(row.bucket)) else {
            debug!(category = %row.category, "row category not registered");
            report.unmatched += 1;
            continue;
        };
        let month = offset as usize;
        store.write_range(&category.id, month..month + 1, row.amount);
        report.imported += 1;
    }

    if report.dropped() > 0 {
        warn!(
            out_of_window = report.out_of_window,
            unmatched = report.unmatched,
            "dropped plan rows during import"
        );
    }
    report.store = store;
    report
}

/// Rows for every strictly positive monthly amount in the editable window.
pub fn export_rows(
    store: &TimeKeyedStore,
    registry: &CategoryRegistry,
    reference: NaiveDate,
) -> Vec<PlanRow> {
    let mut rows = Vec::new();
    for month in 0..EDITABLE_WINDOW {
        let (year, calendar) = calendar_month(reference, month);
        for category in registry.iter() {
            let amount = store.get_range(&category.id, month, 1);
            if amount > 0.0 {
                rows.push(PlanRow {
                    year,
                    month: calendar,
                    bucket: category.bucket,
                    category: category.display_name.clone(),
                    amount,
                });
            }
        }
    }
    rows
}
