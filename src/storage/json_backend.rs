use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    errors::GridError,
    rows::PlanRow,
    utils::persistence::{read_json, write_json_atomic},
};

use super::{PlanStorage, Result};

const PLAN_EXTENSION: &str = "json";
const PLANS_DIR: &str = "plans";

/// Stores each plan as a JSON array of rows under `<root>/plans/<slug>.json`.
#[derive(Debug, Clone)]
pub struct JsonPlanStorage {
    plans_dir: PathBuf,
}

impl JsonPlanStorage {
    pub fn new(root: &Path) -> Result<Self> {
        let plans_dir = root.join(PLANS_DIR);
        fs::create_dir_all(&plans_dir)?;
        Ok(Self { plans_dir })
    }

    pub fn plan_path(&self, name: &str) -> Result<PathBuf> {
        let slug = canonical_name(name).ok_or_else(|| GridError::InvalidName(name.to_string()))?;
        Ok(self
            .plans_dir
            .join(format!("{}.{}", slug, PLAN_EXTENSION)))
    }

    pub fn plans_dir(&self) -> &Path {
        &self.plans_dir
    }
}

impl PlanStorage for JsonPlanStorage {
    fn load(&self, name: &str) -> Result<Vec<PlanRow>> {
        let path = self.plan_path(name)?;
        if !path.exists() {
            return Err(GridError::NotFound(name.to_string()));
        }
        let rows: Vec<PlanRow> = read_json(&path)?;
        info!(plan = name, rows = rows.len(), "plan loaded");
        Ok(rows)
    }

    fn save(&self, name: &str, rows: &[PlanRow]) -> Result<PathBuf> {
        let path = self.plan_path(name)?;
        write_json_atomic(&path, rows)?;
        info!(plan = name, rows = rows.len(), path = %path.display(), "plan saved");
        Ok(path)
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.plans_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PLAN_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Lower-case ASCII alphanumerics joined by single dashes; `None` when nothing usable remains.
fn canonical_name(name: &str) -> Option<String> {
    let mut slug = String::new();
    let mut pending_dash = false;
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    (!slug.is_empty()).then_some(slug)
}
