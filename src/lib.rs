#![doc(test(attr(deny(warnings))))]

//! Budget Grid keeps a month-by-month budget plan, projects edits made in
//! aggregated views back onto individual months, and tracks an undo history
//! of every change.

pub mod cli;
pub mod config;
pub mod currency;
pub mod errors;
pub mod grid;
pub mod rows;
pub mod session;
pub mod storage;
pub mod utils;

pub use session::{BudgetSession, EditOutcome};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Grid tracing initialized.");
    });
}
