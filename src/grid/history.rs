use std::collections::VecDeque;

/// Number of snapshots kept before the oldest is evicted.
pub const HISTORY_LIMIT: usize = 50;

/// Linear undo/redo over whole snapshots.
///
/// The list is never empty and `cursor` always points into it. Recording from
/// anywhere but the newest entry discards the entries after the cursor.
#[derive(Debug, Clone)]
pub struct HistoryManager<S> {
    snapshots: VecDeque<S>,
    cursor: usize,
    limit: usize,
}

impl<S: Clone> HistoryManager<S> {
    pub fn new(initial: S) -> Self {
        Self::with_limit(initial, HISTORY_LIMIT)
    }

    /// Same as [`HistoryManager::new`] with a custom bound (at least 1).
    pub fn with_limit(initial: S, limit: usize) -> Self {
        let mut snapshots = VecDeque::with_capacity(limit.max(1));
        snapshots.push_back(initial);
        Self {
            snapshots,
            cursor: 0,
            limit: limit.max(1),
        }
    }

    pub fn current(&self) -> &S {
        &self.snapshots[self.cursor]
    }

    pub fn record(&mut self, snapshot: S) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.limit {
            self.snapshots.pop_front();
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Steps back one snapshot; `None` when already at the oldest.
    pub fn undo(&mut self) -> Option<&S> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Steps forward one snapshot; `None` when already at the newest.
    pub fn redo(&mut self) -> Option<&S> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Drops every entry and starts over from `snapshot`.
    pub fn reset(&mut self, snapshot: S) {
        self.snapshots.clear();
        self.snapshots.push_back(snapshot);
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_a_single_snapshot() {
        let mut history = HistoryManager::new("empty");
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), &"empty");
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn sixty_snapshots_keep_the_newest_fifty() {
        let mut history = HistoryManager::new(0);
        for value in 1..60 {
            history.record(value);
        }

        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(*history.current(), 59);

        let mut steps = 0;
        while history.undo().is_some() {
            steps += 1;
        }
        assert_eq!(steps, HISTORY_LIMIT - 1);
        assert_eq!(*history.current(), 10);
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn fifty_undo_calls_stop_at_oldest() {
        let mut history = HistoryManager::new(0);
        for value in 1..=60 {
            history.record(value);
        }
        for _ in 0..50 {
            history.undo();
        }
        assert_eq!(*history.current(), 11);
        assert!(!history.can_undo());
    }

    #[test]
    fn recording_after_undo_discards_redo_branch() {
        let mut history = HistoryManager::new("a");
        history.record("b");
        history.record("c");

        assert_eq!(history.undo(), Some(&"b"));
        history.record("d");

        assert!(history.redo().is_none());
        assert_eq!(history.current(), &"d");
        assert_eq!(history.len(), 3);
        assert_eq!(history.undo(), Some(&"b"));
        assert_eq!(history.undo(), Some(&"a"));
    }

    #[test]
    fn undo_then_redo_returns_to_newest() {
        let mut history = HistoryManager::new(1);
        history.record(2);
        history.record(3);

        history.undo();
        history.undo();
        assert_eq!(history.redo(), Some(&2));
        assert_eq!(history.redo(), Some(&3));
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn reset_replaces_everything() {
        let mut history = HistoryManager::new(1);
        history.record(2);
        history.record(3);
        history.undo();

        history.reset(0);
        assert_eq!(history.len(), 1);
        assert_eq!(*history.current(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn custom_limit_is_respected() {
        let mut history = HistoryManager::with_limit(0, 3);
        for value in 1..10 {
            history.record(value);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.limit(), 3);
        history.undo();
        history.undo();
        assert_eq!(*history.current(), 7);
    }
}
