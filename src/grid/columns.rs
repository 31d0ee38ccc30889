use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::store::MAX_MONTH_INDEX;

/// Aggregation granularity of the grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewMode {
    #[default]
    Monthly,
    Quarterly,
    Semestral,
    Yearly,
    FiveYear,
}

impl ViewMode {
    pub const ALL: [ViewMode; 5] = [
        ViewMode::Monthly,
        ViewMode::Quarterly,
        ViewMode::Semestral,
        ViewMode::Yearly,
        ViewMode::FiveYear,
    ];

    /// `(column count, months per column)`.
    fn shape(&self) -> (usize, usize) {
        match self {
            ViewMode::Monthly => (12, 1),
            ViewMode::Quarterly => (4, 3),
            ViewMode::Semestral => (2, 6),
            ViewMode::Yearly => (10, 12),
            ViewMode::FiveYear => (5, 60),
        }
    }

    pub fn span(&self) -> usize {
        self.shape().1
    }

    /// Edits in anything but the monthly view overwrite several months at once.
    pub fn is_aggregate(&self) -> bool {
        self.span() > 1
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ViewMode::Monthly => "monthly",
            ViewMode::Quarterly => "quarterly",
            ViewMode::Semestral => "semestral",
            ViewMode::Yearly => "yearly",
            ViewMode::FiveYear => "five-year",
        };
        f.write_str(label)
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "monthly" | "month" | "m" => Ok(ViewMode::Monthly),
            "quarterly" | "quarter" | "q" => Ok(ViewMode::Quarterly),
            "semestral" | "semester" | "s" => Ok(ViewMode::Semestral),
            "yearly" | "year" | "y" => Ok(ViewMode::Yearly),
            "five-year" | "fiveyear" | "5y" => Ok(ViewMode::FiveYear),
            other => Err(format!("unknown view mode `{other}`")),
        }
    }
}

/// One displayed column: `span` consecutive months starting at `index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub label: String,
    pub index: usize,
    pub span: usize,
}

impl ColumnDef {
    pub fn new(label: impl Into<String>, index: usize, span: usize) -> Self {
        Self {
            label: label.into(),
            index,
            span,
        }
    }

    pub fn end(&self) -> usize {
        self.index + self.span
    }

    pub fn months(&self) -> std::ops::Range<usize> {
        self.index..self.end()
    }
}

/// Columns shown for `mode`, anchored at the month containing `reference`.
pub fn columns_for(mode: ViewMode, reference: NaiveDate) -> Vec<ColumnDef> {
    let (count, span) = mode.shape();
    let columns: Vec<ColumnDef> = (0..count)
        .map(|position| {
            let index = position * span;
            ColumnDef::new(column_label(mode, reference, position, index), index, span)
        })
        .collect();
    debug_assert!(columns.iter().all(|column| column.end() <= MAX_MONTH_INDEX));
    columns
}

fn column_label(mode: ViewMode, reference: NaiveDate, position: usize, index: usize) -> String {
    match mode {
        ViewMode::Monthly => {
            let month0 = (reference.month0() as usize + index) % 12;
            short_month_name(month0).to_string()
        }
        ViewMode::Quarterly => format!("Q{}", position + 1),
        ViewMode::Semestral => format!("S{}", position + 1),
        ViewMode::Yearly => (reference.year() + position as i32).to_string(),
        ViewMode::FiveYear => {
            let first = reference.year() + (position * 5) as i32;
            format!("{}-{}", first, first + 4)
        }
    }
}

fn short_month_name(month0: usize) -> &'static str {
    const NAMES: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    NAMES[month0 % 12]
}

/// Calendar `(year, month)` of a month index relative to `reference`.
pub fn calendar_month(reference: NaiveDate, month_index: usize) -> (i32, u32) {
    let absolute = reference.year() * 12 + reference.month0() as i32 + month_index as i32;
    (absolute.div_euclid(12), absolute.rem_euclid(12) as u32 + 1)
}

/// Month index of a calendar month relative to `reference`; negative before it.
pub fn month_offset(reference: NaiveDate, year: i32, month: u32) -> i64 {
    (year as i64 - reference.year() as i64) * 12 + (month as i64 - reference.month() as i64)
}
