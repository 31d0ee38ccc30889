//! Projection of a single grid edit onto the underlying months.
//!
//! An edit made against a column is spread evenly across the months the column
//! covers, replacing whatever those months held before. When propagation is on
//! for the row, the same per-month value is also written into every later month
//! of the editable horizon. Edits are two-phase: [`propose_edit`] describes the
//! writes without touching anything, [`commit_edit`] produces the new snapshot.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::category::CategoryId;
use super::columns::{ColumnDef, ViewMode};
use super::store::{TimeKeyedStore, MAX_MONTH_INDEX};

/// Parses user-entered text into an amount.
///
/// Every character other than ASCII digits and `.` is discarded first, so
/// `"$1,500"` reads as `1500`. Anything still unparsable reads as `0`.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Previous value of a month an edit is about to replace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverwrittenMonth {
    pub month: usize,
    pub previous: f64,
}

/// Pending edit, ready to be confirmed and committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditPlan {
    pub category: CategoryId,
    pub column: ColumnDef,
    pub view_mode: ViewMode,
    pub entered_amount: f64,
    pub per_month: f64,
    pub propagate: bool,
    /// Months inside the column that currently hold a value.
    pub overwritten: Vec<OverwrittenMonth>,
    /// Months past the column that hold a value the propagation will replace.
    pub forward_overwrites: usize,
}

impl EditPlan {
    /// Aggregate views replace several months at once and need the user's go-ahead.
    pub fn requires_confirmation(&self) -> bool {
        self.view_mode != ViewMode::Monthly
    }

    /// Months written by the edit itself.
    pub fn span_months(&self) -> Range<usize> {
        self.column.months()
    }

    /// Months written by propagation, if any.
    pub fn forward_months(&self) -> Option<Range<usize>> {
        if !self.propagate {
            return None;
        }
        let start = self.column.end();
        (start < MAX_MONTH_INDEX).then_some(start..MAX_MONTH_INDEX)
    }

    /// True when the column held unequal month values that are about to be flattened.
    pub fn discards_distribution(&self) -> bool {
        if self.column.span < 2 || self.overwritten.is_empty() {
            return false;
        }
        let populated = self.overwritten.len();
        let first = self.overwritten[0].previous;
        populated < self.column.span
            || self
                .overwritten
                .iter()
                .any(|entry| entry.previous != first)
    }

    /// One-line description suitable for a confirmation prompt.
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Set {} months starting at month {} to {:.2} each",
            self.column.span,
            self.column.index + 1,
            self.per_month
        );
        if !self.overwritten.is_empty() {
            text.push_str(&format!(
                ", replacing {} existing value(s)",
                self.overwritten.len()
            ));
        }
        if let Some(forward) = self.forward_months() {
            text.push_str(&format!(
                ", then fill {} later months ({} already set)",
                forward.len(),
                self.forward_overwrites
            ));
        }
        text
    }
}

/// Describes the writes an edit would make, without touching `store`.
pub fn propose_edit(
    store: &TimeKeyedStore,
    category: &CategoryId,
    column: &ColumnDef,
    entered_amount: f64,
    view_mode: ViewMode,
    propagate: bool,
) -> EditPlan {
    let per_month = entered_amount / column.span.max(1) as f64;
    let overwritten = column
        .months()
        .filter_map(|month| {
            let previous = store.get(category, month);
            (previous != 0.0).then_some(OverwrittenMonth { month, previous })
        })
        .collect();
    let forward_overwrites = if propagate {
        (column.end()..MAX_MONTH_INDEX)
            .filter(|month| {
                let previous = store.get(category, *month);
                previous != 0.0 && previous != per_month
            })
            .count()
    } else {
        0
    };

    EditPlan {
        category: category.clone(),
        column: column.clone(),
        view_mode,
        entered_amount,
        per_month,
        propagate,
        overwritten,
        forward_overwrites,
    }
}

/// Applies `plan` on top of `store`, returning the new snapshot.
pub fn commit_edit(store: &TimeKeyedStore, plan: &EditPlan) -> TimeKeyedStore {
    let mut next = store.clone();
    next.write_range(&plan.category, plan.span_months(), plan.per_month);
    if let Some(forward) = plan.forward_months() {
        next.write_range(&plan.category, forward, plan.per_month);
    }
    next
}

/// Single-step projection: [`propose_edit`] followed by [`commit_edit`].
pub fn apply_edit(
    store: &TimeKeyedStore,
    category: &CategoryId,
    column: &ColumnDef,
    entered_amount: f64,
    view_mode: ViewMode,
    propagate: bool,
) -> TimeKeyedStore {
    let plan = propose_edit(store, category, column, entered_amount, view_mode, propagate);
    commit_edit(store, &plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rent() -> CategoryId {
        CategoryId::from("rent")
    }

    #[test]
    fn parse_amount_strips_noise_and_defaults_to_zero() {
        assert_eq!(parse_amount("150000"), 150_000.0);
        assert_eq!(parse_amount("$1,500.50"), 1_500.5);
        assert_eq!(parse_amount("  42 "), 42.0);
        assert_eq!(parse_amount("-30"), 30.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("1.2.3"), 0.0);
    }

    #[test]
    fn monthly_edit_without_propagation_touches_one_key() {
        let other = CategoryId::from("groceries");
        let store = TimeKeyedStore::new()
            .with_set(&rent(), 4, 10.0)
            .with_set(&other, 2, 99.0);
        let column = ColumnDef::new("May", 2, 1);

        let next = apply_edit(&store, &rent(), &column, 1234.5, ViewMode::Monthly, false);

        assert_eq!(next.get_range(&rent(), 2, 1), 1234.5);
        assert_eq!(next.get(&rent(), 4), 10.0);
        assert_eq!(next.get(&other, 2), 99.0);
        assert_eq!(next.len(), store.len() + 1);
        assert_eq!(store.get(&rent(), 2), 0.0);
    }

    #[test]
    fn aggregate_edit_distributes_evenly() {
        let column = ColumnDef::new("Q2", 3, 3);
        let next = apply_edit(
            &TimeKeyedStore::new(),
            &rent(),
            &column,
            900.0,
            ViewMode::Quarterly,
            false,
        );

        for month in 3..6 {
            assert_eq!(next.get(&rent(), month), 300.0);
        }
        assert_eq!(next.get(&rent(), 2), 0.0);
        assert_eq!(next.get(&rent(), 6), 0.0);
        assert!((next.get_range(&rent(), 3, 3) - 900.0).abs() < 1e-9);
    }

    #[test]
    fn uneven_division_still_sums_back() {
        let column = ColumnDef::new("2025", 0, 12);
        let next = apply_edit(
            &TimeKeyedStore::new(),
            &rent(),
            &column,
            1000.0,
            ViewMode::Yearly,
            false,
        );
        assert!((next.get_range(&rent(), 0, 12) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn propagation_fills_remaining_horizon() {
        let column = ColumnDef::new("Jan", 0, 1);
        let next = apply_edit(
            &TimeKeyedStore::new(),
            &rent(),
            &column,
            75.0,
            ViewMode::Monthly,
            true,
        );

        for month in 0..MAX_MONTH_INDEX {
            assert_eq!(next.get(&rent(), month), 75.0, "month {month}");
        }
        assert_eq!(next.get(&rent(), MAX_MONTH_INDEX), 0.0);
    }

    #[test]
    fn propagation_leaves_earlier_months_alone() {
        let store = TimeKeyedStore::new().with_range(&rent(), 0..MAX_MONTH_INDEX, 10.0);
        let column = ColumnDef::new("S2", 6, 6);
        let next = apply_edit(&store, &rent(), &column, 120.0, ViewMode::Semestral, true);

        assert_eq!(next.get(&rent(), 5), 10.0);
        assert_eq!(next.get(&rent(), 6), 20.0);
        assert_eq!(next.get(&rent(), MAX_MONTH_INDEX - 1), 20.0);
    }

    #[test]
    fn zero_clears_span_and_propagated_horizon() {
        let store = TimeKeyedStore::new().with_range(&rent(), 0..MAX_MONTH_INDEX, 10.0);
        let column = ColumnDef::new("Q1", 0, 3);

        let cleared = apply_edit(&store, &rent(), &column, 0.0, ViewMode::Quarterly, true);
        assert!(cleared.is_empty());

        let span_only = apply_edit(&store, &rent(), &column, 0.0, ViewMode::Quarterly, false);
        assert_eq!(span_only.get_range(&rent(), 0, 3), 0.0);
        assert_eq!(span_only.get(&rent(), 3), 10.0);
    }

    #[test]
    fn plan_reports_overwrites_and_confirmation() {
        let store = TimeKeyedStore::new()
            .with_set(&rent(), 0, 150.0)
            .with_set(&rent(), 20, 5.0);
        let column = ColumnDef::new("Q1", 0, 3);

        let plan = propose_edit(&store, &rent(), &column, 300.0, ViewMode::Quarterly, true);
        assert!(plan.requires_confirmation());
        assert_eq!(plan.per_month, 100.0);
        assert_eq!(
            plan.overwritten,
            vec![OverwrittenMonth {
                month: 0,
                previous: 150.0
            }]
        );
        assert!(plan.discards_distribution());
        assert_eq!(plan.forward_overwrites, 1);
        assert_eq!(plan.forward_months(), Some(3..MAX_MONTH_INDEX));

        let monthly = propose_edit(
            &store,
            &rent(),
            &ColumnDef::new("Jan", 0, 1),
            10.0,
            ViewMode::Monthly,
            false,
        );
        assert!(!monthly.requires_confirmation());
        assert!(!monthly.discards_distribution());
        assert_eq!(monthly.forward_months(), None);
    }

    #[test]
    fn proposing_does_not_mutate_the_store() {
        let store = TimeKeyedStore::new().with_set(&rent(), 1, 50.0);
        let before = store.clone();
        let plan = propose_edit(
            &store,
            &rent(),
            &ColumnDef::new("Q1", 0, 3),
            30.0,
            ViewMode::Quarterly,
            true,
        );
        assert_eq!(store, before);

        let committed = commit_edit(&store, &plan);
        assert_eq!(store.get(&rent(), 1), 50.0);
        assert_eq!(committed.get(&rent(), 1), 10.0);
    }

    #[test]
    fn summary_mentions_propagation() {
        let plan = propose_edit(
            &TimeKeyedStore::new(),
            &rent(),
            &ColumnDef::new("Q4", 9, 3),
            90.0,
            ViewMode::Quarterly,
            true,
        );
        let summary = plan.summary();
        assert!(summary.contains("Set 3 months starting at month 10"));
        assert!(summary.contains("fill 288 later months"));
    }
}
