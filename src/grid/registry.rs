use super::category::{Bucket, Category, CategoryId};

/// Categories a fresh plan starts with, as `(id, display name, bucket)`.
const DEFAULT_CATEGORIES: &[(&str, &str, Bucket)] = &[
    ("salary", "Salary", Bucket::Income),
    ("side-income", "Side Income", Bucket::Income),
    ("emergency-fund", "Emergency Fund", Bucket::Future),
    ("retirement", "Retirement", Bucket::Future),
    ("investments", "Investments", Bucket::Future),
    ("rent", "Rent", Bucket::Living),
    ("utilities", "Utilities", Bucket::Living),
    ("groceries", "Groceries", Bucket::Living),
    ("transport", "Transport", Bucket::Living),
    ("insurance", "Insurance", Bucket::Living),
    ("dining-out", "Dining Out", Bucket::Present),
    ("entertainment", "Entertainment", Bucket::Present),
    ("travel", "Travel", Bucket::Present),
];

/// Ordered set of category definitions.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Registry without any categories.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry seeded with the default category set.
    pub fn with_defaults() -> Self {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .map(|(id, name, bucket)| Category::new(*id, *name, *bucket))
            .collect();
        Self { categories }
    }

    /// Adds a category under `bucket`. Blank names are ignored.
    pub fn add(&mut self, bucket: Bucket, name: &str) -> Option<Category> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let category = Category::new(CategoryId::generate(), name, bucket);
        self.categories.push(category.clone());
        Some(category)
    }

    /// Returns `true` when a category was renamed. Blank names are ignored.
    pub fn rename(&mut self, id: &CategoryId, new_name: &str) -> bool {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return false;
        }
        match self.categories.iter_mut().find(|category| &category.id == id) {
            Some(category) => {
                category.display_name = new_name.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes the definition only; stored amounts for `id` stay where they are.
    pub fn remove(&mut self, id: &CategoryId) -> Option<Category> {
        let position = self.categories.iter().position(|category| &category.id == id)?;
        Some(self.categories.remove(position))
    }

    pub fn get(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    pub fn contains(&self, id: &CategoryId) -> bool {
        self.get(id).is_some()
    }

    pub fn list_by_bucket(&self, bucket: Bucket) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|category| category.bucket == bucket)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// First category whose display name matches case-insensitively, preferring `bucket`.
    pub fn find_by_name(&self, name: &str, bucket: Option<Bucket>) -> Option<&Category> {
        let mut matches = self.categories.iter().filter(|c| c.matches_name(name));
        match bucket {
            Some(bucket) => {
                let candidates: Vec<&Category> = matches.collect();
                candidates
                    .iter()
                    .find(|category| category.bucket == bucket)
                    .or_else(|| candidates.first())
                    .copied()
            }
            None => matches.next(),
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
