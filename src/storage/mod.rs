pub mod json_backend;

use std::path::PathBuf;

use crate::{errors::GridError, rows::PlanRow};

pub type Result<T> = std::result::Result<T, GridError>;

/// Abstraction over where plan rows are kept between sessions.
pub trait PlanStorage: Send + Sync {
    fn load(&self, name: &str) -> Result<Vec<PlanRow>>;
    fn save(&self, name: &str, rows: &[PlanRow]) -> Result<PathBuf>;
    fn list(&self) -> Result<Vec<String>>;
}

pub use json_backend::JsonPlanStorage;
