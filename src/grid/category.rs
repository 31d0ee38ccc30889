//! Category and bucket types shared by the registry, store, and row formats.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Top-level allocation group every category belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Bucket {
    Income,
    Future,
    Living,
    Present,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Income,
        Bucket::Future,
        Bucket::Living,
        Bucket::Present,
    ];

    /// Buckets that draw from income.
    pub const ALLOCATIONS: [Bucket; 3] = [Bucket::Future, Bucket::Living, Bucket::Present];
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Bucket::Income => "Income",
            Bucket::Future => "Future",
            Bucket::Living => "Living",
            Bucket::Present => "Present",
        };
        f.write_str(label)
    }
}

impl FromStr for Bucket {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Bucket::Income),
            "future" => Ok(Bucket::Future),
            "living" => Ok(Bucket::Living),
            "present" => Ok(Bucket::Present),
            other => Err(format!("unknown bucket `{other}`")),
        }
    }
}

/// Stable identifier of a category row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates an id that cannot collide with any default or previously issued id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub display_name: String,
    pub bucket: Bucket,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, display_name: impl Into<String>, bucket: Bucket) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            bucket,
        }
    }

    /// Case-insensitive exact comparison against the display name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.display_name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

impl From<String> for CategoryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_parses_case_insensitively() {
        assert_eq!("living".parse::<Bucket>(), Ok(Bucket::Living));
        assert_eq!(" FUTURE ".parse::<Bucket>(), Ok(Bucket::Future));
        assert!("savings".parse::<Bucket>().is_err());
    }

    #[test]
    fn bucket_serializes_upper_case() {
        let json = serde_json::to_string(&Bucket::Present).unwrap();
        assert_eq!(json, "\"PRESENT\"");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(CategoryId::generate(), CategoryId::generate());
    }

    #[test]
    fn name_matching_ignores_case_only() {
        let category = Category::new("rent", "Rent", Bucket::Living);
        assert!(category.matches_name("RENT"));
        assert!(!category.matches_name("Ren"));
    }
}
