use serde::Serialize;
use utoipa::ToSchema;

use crate::logic::{grid::Garden, selection::Selection};
use crate::models::cell::Cell;

/// The edit form as the editor opened it.
///
/// With one square selected it starts from that square's record; with several
/// it starts from an empty record that will be applied to all of them.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditForm {
    pub title: String,
    pub initial: Cell,
    pub multiple: bool,
    pub target_count: usize,
    pub submit_label: String,
    /// Whether the name, pH, sun and notes fields apply to the starting type.
    pub shows_details: bool,
}

impl EditForm {
    /// Builds the form for the current selection, or `None` if nothing is
    /// selected.
    pub fn for_selection(garden: &Garden, selection: &Selection) -> Option<Self> {
        if selection.is_empty() {
            return None;
        }
        let form = match selection.only() {
            Some(coord) => {
                let initial = garden.get(coord).cloned().unwrap_or_default();
                Self {
                    title: format!("Edit {}", initial.cell_type.label()),
                    shows_details: initial.cell_type.has_details(),
                    initial,
                    multiple: false,
                    target_count: 1,
                    submit_label: "Save".into(),
                }
            }
            None => Self {
                title: "Edit Multiple Squares".into(),
                initial: Cell::empty(),
                multiple: true,
                target_count: selection.len(),
                submit_label: "Apply to All Selected".into(),
                shows_details: false,
            },
        };
        Some(form)
    }
}

/// History description for a bulk edit of `count` squares.
pub fn edit_description(count: usize) -> String {
    format!("Edit {count} square{}", if count == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{cell::CellType, Coordinate};

    #[test]
    fn single_selection_starts_from_cell_data() {
        let mut garden = Garden::default();
        let basil = Cell::of_type(CellType::Plant).with_name("Basil");
        garden.set_cells(&[Coordinate::new(1, 2)], &basil);

        let form =
            EditForm::for_selection(&garden, &Selection::single(Coordinate::new(1, 2))).unwrap();
        assert_eq!(form.initial, basil);
        assert!(!form.multiple);
        assert_eq!(form.title, "Edit Plant");
        assert_eq!(form.submit_label, "Save");
        assert!(form.shows_details);
    }

    #[test]
    fn multiple_selection_starts_empty() {
        let mut garden = Garden::default();
        garden.set_cells(&[Coordinate::new(0, 0)], &Cell::of_type(CellType::Tree));
        let selection = Selection::rectangle(Coordinate::new(0, 0), Coordinate::new(1, 1));

        let form = EditForm::for_selection(&garden, &selection).unwrap();
        assert_eq!(form.initial, Cell::empty());
        assert!(form.multiple);
        assert_eq!(form.target_count, 4);
        assert_eq!(form.submit_label, "Apply to All Selected");
        assert!(!form.shows_details);
    }

    #[test]
    fn no_form_without_selection() {
        assert!(EditForm::for_selection(&Garden::default(), &Selection::new()).is_none());
    }

    #[test]
    fn description_pluralises() {
        assert_eq!(edit_description(1), "Edit 1 square");
        assert_eq!(edit_description(3), "Edit 3 squares");
    }
}
