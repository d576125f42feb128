use chrono::{DateTime, Utc};
use log::debug;

use crate::logic::grid::Garden;

/// A full snapshot of the document taken just before a mutation.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub garden: Garden,
    pub description: String,
    pub recorded_at: DateTime<Utc>,
}

/// Linear undo stack built on full-document snapshots.
///
/// There is no redo: undoing discards the popped entry.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots `garden`. Must run before the mutation it describes.
    pub fn record(&mut self, description: impl Into<String>, garden: &Garden) {
        let description = description.into();
        debug!("history: record '{description}' ({} entries)", self.entries.len() + 1);
        self.entries.push(HistoryEntry {
            garden: garden.clone(),
            description,
            recorded_at: Utc::now(),
        });
    }

    /// Restores the most recent snapshot into `garden` and returns its
    /// description, or `None` when there is nothing to undo.
    pub fn undo(&mut self, garden: &mut Garden) -> Option<String> {
        let entry = self.entries.pop()?;
        *garden = entry.garden;
        debug!("history: undo '{}' ({} left)", entry.description, self.entries.len());
        Some(entry.description)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        cell::{Cell, CellType},
        Coordinate,
    };

    #[test]
    fn undo_on_empty_history_is_a_noop() {
        let mut history = History::new();
        let mut garden = Garden::default();
        let before = garden.clone();
        assert_eq!(history.undo(&mut garden), None);
        assert_eq!(garden, before);
    }

    #[test]
    fn undo_restores_grid_and_dimensions() {
        let mut history = History::new();
        let mut garden = Garden::new(6, 6);
        garden.set_cells(&[Coordinate::new(1, 1)], &Cell::of_type(CellType::Water));
        let before = garden.clone();

        history.record("Add row", &garden);
        garden.add_row().unwrap();
        garden.set_cells(&[Coordinate::new(6, 0)], &Cell::of_type(CellType::Path));

        assert_eq!(history.undo(&mut garden).as_deref(), Some("Add row"));
        assert_eq!(garden, before);
        assert_eq!(garden.rows(), 6);
        assert!(history.is_empty());
    }

    #[test]
    fn snapshots_are_independent_of_later_edits() {
        let mut history = History::new();
        let mut garden = Garden::default();
        history.record("Edit 1 square", &garden);
        garden.set_cells(&[Coordinate::new(0, 0)], &Cell::of_type(CellType::Tree));
        assert!(history.last().unwrap().garden.get(Coordinate::new(0, 0)).unwrap().is_empty());
    }

    #[test]
    fn undo_pops_in_reverse_order() {
        let mut history = History::new();
        let mut garden = Garden::default();
        history.record("first", &garden);
        history.record("second", &garden);
        assert_eq!(history.len(), 2);
        assert_eq!(history.undo(&mut garden).as_deref(), Some("second"));
        assert_eq!(history.undo(&mut garden).as_deref(), Some("first"));
        assert!(!history.can_undo());
    }
}
