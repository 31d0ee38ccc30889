//! Editing session that ties the grid components together.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::grid::{
    columns_for, commit_edit, parse_amount, propose_edit, Bucket, BucketTotals, Category,
    CategoryId, CategoryRegistry, CellValueResolver, ColumnDef, EditPlan, HistoryManager,
    PropagationFlags, TimeKeyedStore, ViewMode, HISTORY_LIMIT,
};
use crate::rows::{export_rows, import_rows, ImportReport, PlanRow};

/// Result of [`BudgetSession::apply_edit`].
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The edit was committed and recorded.
    Applied,
    /// The edit overwrites several months and waits for [`BudgetSession::commit_edit`].
    NeedsConfirmation(EditPlan),
}

/// One user's editing session over a single plan.
#[derive(Debug, Clone)]
pub struct BudgetSession {
    reference: NaiveDate,
    view_mode: ViewMode,
    registry: CategoryRegistry,
    flags: PropagationFlags,
    history: HistoryManager<TimeKeyedStore>,
}

impl BudgetSession {
    /// Session over the default categories with an empty store.
    pub fn new(reference: NaiveDate) -> Self {
        Self::with_registry(reference, CategoryRegistry::with_defaults())
    }

    pub fn with_registry(reference: NaiveDate, registry: CategoryRegistry) -> Self {
        Self::with_history_limit(reference, registry, HISTORY_LIMIT)
    }

    pub fn with_history_limit(
        reference: NaiveDate,
        registry: CategoryRegistry,
        history_limit: usize,
    ) -> Self {
        let flags = PropagationFlags::for_registry(&registry);
        Self {
            reference,
            view_mode: ViewMode::Monthly,
            registry,
            flags,
            history: HistoryManager::with_limit(TimeKeyedStore::new(), history_limit),
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference
    }

    pub fn store(&self) -> &TimeKeyedStore {
        self.history.current()
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Changes how months are grouped; stored values are untouched.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        debug!(from = %self.view_mode, to = %mode, "view mode changed");
        self.view_mode = mode;
    }

    pub fn columns(&self) -> Vec<ColumnDef> {
        columns_for(self.view_mode, self.reference)
    }

    /// Column at `position` in the current view.
    pub fn column(&self, position: usize) -> Option<ColumnDef> {
        self.columns().into_iter().nth(position)
    }

    pub fn resolver(&self) -> CellValueResolver<'_> {
        CellValueResolver::new(self.store(), &self.registry)
    }

    pub fn cell_value(&self, category: &CategoryId, column: &ColumnDef) -> f64 {
        self.resolver().cell_value(category, column)
    }

    pub fn bucket_total(&self, bucket: Bucket, column: &ColumnDef) -> f64 {
        self.resolver().bucket_total(bucket, column)
    }

    pub fn bucket_totals(&self, column: &ColumnDef) -> BucketTotals {
        self.resolver().bucket_totals(column)
    }

    /// Plans an edit from raw user text against the current view.
    pub fn propose_edit(&self, category: &CategoryId, column: &ColumnDef, raw: &str) -> EditPlan {
        self.propose_amount(category, column, parse_amount(raw))
    }

    pub fn propose_amount(&self, category: &CategoryId, column: &ColumnDef, amount: f64) -> EditPlan {
        propose_edit(
            self.store(),
            category,
            column,
            amount,
            self.view_mode,
            self.flags.is_enabled(category),
        )
    }

    /// Commits a plan on top of the current store and records the result.
    pub fn commit_edit(&mut self, plan: &EditPlan) {
        let next = commit_edit(self.store(), plan);
        debug!(
            category = %plan.category,
            column = %plan.column.label,
            per_month = plan.per_month,
            propagate = plan.propagate,
            "edit committed"
        );
        self.history.record(next);
    }

    /// Commits monthly edits straight away; aggregate edits come back for confirmation.
    pub fn apply_edit(&mut self, category: &CategoryId, column: &ColumnDef, raw: &str) -> EditOutcome {
        let plan = self.propose_edit(category, column, raw);
        if plan.requires_confirmation() {
            return EditOutcome::NeedsConfirmation(plan);
        }
        self.commit_edit(&plan);
        EditOutcome::Applied
    }

    /// Returns `true` when the cursor moved.
    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo().is_some();
        debug!(moved, cursor = self.history.cursor(), "undo");
        moved
    }

    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo().is_some();
        debug!(moved, cursor = self.history.cursor(), "redo");
        moved
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Clears every amount as an undoable step.
    pub fn start_over(&mut self) {
        info!("starting over with an empty plan");
        self.history.record(TimeKeyedStore::new());
    }

    pub fn add_category(&mut self, bucket: Bucket, name: &str) -> Option<CategoryId> {
        let category = self.registry.add(bucket, name)?;
        self.flags.track(&category.id);
        debug!(id = %category.id, bucket = %bucket, "category added");
        Some(category.id)
    }

    pub fn rename_category(&mut self, id: &CategoryId, new_name: &str) -> bool {
        self.registry.rename(id, new_name)
    }

    /// Removes the definition; its stored months stay orphaned in the store.
    pub fn remove_category(&mut self, id: &CategoryId) -> Option<Category> {
        let removed = self.registry.remove(id)?;
        self.flags.forget(id);
        debug!(id = %id, "category removed");
        Some(removed)
    }

    /// Matches an id first, then a case-insensitive display name.
    pub fn find_category(&self, query: &str) -> Option<&Category> {
        let query = query.trim();
        self.registry
            .get(&CategoryId::from(query))
            .or_else(|| self.registry.find_by_name(query, None))
    }

    pub fn set_propagation(&mut self, id: &CategoryId, enabled: bool) {
        if self.registry.contains(id) {
            self.flags.set(id, enabled);
        }
    }

    pub fn propagation_enabled(&self, id: &CategoryId) -> bool {
        self.flags.is_enabled(id)
    }

    /// Replaces the store with the imported rows and starts a fresh history.
    pub fn load_rows(&mut self, rows: &[PlanRow]) -> ImportReport {
        let report = import_rows(rows, &self.registry, self.reference);
        info!(
            imported = report.imported,
            dropped = report.dropped(),
            "plan rows loaded"
        );
        self.history.reset(report.store.clone());
        report
    }

    pub fn export_rows(&self) -> Vec<PlanRow> {
        export_rows(self.store(), &self.registry, self.reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MAX_MONTH_INDEX;

    fn session() -> BudgetSession {
        BudgetSession::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
    }

    fn rent() -> CategoryId {
        CategoryId::from("rent")
    }

    #[test]
    fn monthly_edit_applies_immediately() {
        let mut session = session();
        session.set_propagation(&rent(), false);
        let column = session.column(0).unwrap();

        assert_eq!(session.apply_edit(&rent(), &column, "150000"), EditOutcome::Applied);
        assert_eq!(session.cell_value(&rent(), &column), 150_000.0);
        assert_eq!(session.store().len(), 1);
        assert_eq!(session.history_len(), 2);
    }

    #[test]
    fn aggregate_edit_waits_for_commit() {
        let mut session = session();
        session.set_view_mode(ViewMode::Quarterly);
        let column = session.column(0).unwrap();

        let plan = match session.apply_edit(&rent(), &column, "300") {
            EditOutcome::NeedsConfirmation(plan) => plan,
            EditOutcome::Applied => panic!("aggregate edit should need confirmation"),
        };
        assert!(session.store().is_empty());
        assert_eq!(session.history_len(), 1);

        session.commit_edit(&plan);
        assert_eq!(session.store().get(&rent(), 1), 100.0);
    }

    #[test]
    fn propagation_follows_category_flag() {
        let mut session = session();
        let column = session.column(0).unwrap();
        session.apply_edit(&rent(), &column, "50");
        assert_eq!(session.store().get(&rent(), MAX_MONTH_INDEX - 1), 50.0);

        let groceries = CategoryId::from("groceries");
        session.set_propagation(&groceries, false);
        session.apply_edit(&groceries, &column, "50");
        assert_eq!(session.store().get(&groceries, 1), 0.0);
    }

    #[test]
    fn start_over_is_undoable() {
        let mut session = session();
        let column = session.column(0).unwrap();
        session.apply_edit(&rent(), &column, "10");
        session.start_over();
        assert!(session.store().is_empty());

        assert!(session.undo());
        assert_eq!(session.store().get(&rent(), 0), 10.0);
        assert!(session.redo());
        assert!(session.store().is_empty());
    }

    #[test]
    fn added_categories_propagate_by_default() {
        let mut session = session();
        let id = session.add_category(Bucket::Future, "College Fund").expect("added");
        assert!(session.propagation_enabled(&id));
        assert!(session.add_category(Bucket::Future, "  ").is_none());

        assert_eq!(session.find_category("college fund").map(|c| c.id.clone()), Some(id.clone()));
        assert_eq!(session.find_category(id.as_str()).map(|c| c.id.clone()), Some(id));
    }

    #[test]
    fn removing_category_orphans_its_values() {
        let mut session = session();
        let column = session.column(0).unwrap();
        session.apply_edit(&rent(), &column, "700");
        assert_eq!(session.bucket_total(Bucket::Living, &column), 700.0);

        session.remove_category(&rent());
        assert_eq!(session.bucket_total(Bucket::Living, &column), 0.0);
        assert_eq!(session.store().get(&rent(), 0), 700.0);
        assert!(!session.propagation_enabled(&rent()));
    }

    #[test]
    fn set_propagation_ignores_unknown_ids() {
        let mut session = session();
        let ghost = CategoryId::from("ghost");
        session.set_propagation(&ghost, true);
        assert!(!session.propagation_enabled(&ghost));
    }

    #[test]
    fn load_rows_resets_history() {
        let mut session = session();
        let column = session.column(0).unwrap();
        session.apply_edit(&rent(), &column, "10");
        assert!(session.can_undo());

        let rows = vec![PlanRow {
            year: 2025,
            month: 2,
            bucket: Bucket::Living,
            category: "Rent".into(),
            amount: 820.0,
        }];
        let report = session.load_rows(&rows);
        assert_eq!(report.imported, 1);
        assert!(!session.can_undo());
        assert_eq!(session.history_len(), 1);
        assert_eq!(session.store().get(&rent(), 1), 820.0);
        assert_eq!(session.store().get(&rent(), 0), 0.0);
        assert_eq!(session.export_rows(), rows);
    }
}
