//! The budget grid engine: category rows, the month store, column views, edit
//! projection, and undo history.

pub mod category;
pub mod columns;
pub mod history;
pub mod metrics;
pub mod projector;
pub mod propagation;
pub mod registry;
pub mod resolver;
pub mod store;

pub use category::{Bucket, Category, CategoryId};
pub use columns::{calendar_month, columns_for, month_offset, ColumnDef, ViewMode};
pub use history::{HistoryManager, HISTORY_LIMIT};
pub use metrics::BucketTotals;
pub use projector::{
    apply_edit, commit_edit, parse_amount, propose_edit, EditPlan, OverwrittenMonth,
};
pub use propagation::PropagationFlags;
pub use registry::CategoryRegistry;
pub use resolver::CellValueResolver;
pub use store::{CellKey, TimeKeyedStore, MAX_MONTH_INDEX};
