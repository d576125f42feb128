use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::logic::{
    form::{edit_description, EditForm},
    gesture::{GestureAction, GestureInterpreter, Modifiers, PointerId, TimerCommand, Transition},
    grid::{Axis, Garden, GridError, Joins},
    history::History,
    zoom::Zoom,
};
use crate::models::{cell::Cell, Coordinate, Dimensions};
use crate::storage::{
    persisted::{load_state, save_state},
    KeyValueStore,
};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("{0}")]
    InvalidCell(String),
    #[error("No squares are selected.")]
    NothingSelected,
    #[error("No edit form is open.")]
    NoForm,
}

impl EditorError {
    pub fn title(&self) -> &'static str {
        match self {
            EditorError::Grid(e) => e.title(),
            EditorError::InvalidCell(_) => "Invalid square",
            EditorError::NothingSelected => "Nothing selected",
            EditorError::NoForm => "No form open",
        }
    }

    /// Bounds rejections are user-facing notices rather than bad input.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            EditorError::Grid(GridError::AboveMaximum { .. } | GridError::BelowMinimum { .. })
        )
    }
}

/// A short message for the user, shown as a toast by the front-end.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// What an event produced besides the state change itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub notice: Option<Notice>,
    /// Long-press timers the caller has to start or stop.
    pub timers: Vec<TimerCommand>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    #[serde(flatten)]
    pub cell: Cell,
    #[serde(flatten)]
    pub joins: Joins,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub rows: usize,
    pub cols: usize,
    pub grid: Vec<Vec<CellView>>,
    pub selection: Vec<Coordinate>,
    pub selection_mode: bool,
    pub multi_select: bool,
    #[schema(value_type = f64)]
    pub zoom: Zoom,
    pub zoom_percentage: u32,
    pub can_zoom_in: bool,
    pub can_zoom_out: bool,
    pub undo_count: usize,
    pub can_undo: bool,
    pub last_action: Option<String>,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub last_action_at: Option<DateTime<Utc>>,
    pub form: Option<EditForm>,
    pub drag_source: Option<Coordinate>,
    pub drag_target: Option<Coordinate>,
}

/// One editing session: the document, its undo history, the gesture state
/// and the store it is saved to after every change.
pub struct EditorSession {
    garden: Garden,
    history: History,
    gestures: GestureInterpreter,
    form: Option<EditForm>,
    zoom: Zoom,
    /// Raised outside a request (long-press timer); handed out with the next
    /// response.
    pending_notice: Option<Notice>,
    store: Box<dyn KeyValueStore>,
}

impl EditorSession {
    /// Restores the session from `store`, or starts an empty grid of
    /// `default_dims`.
    pub fn load(store: Box<dyn KeyValueStore>, default_dims: Dimensions) -> Self {
        let state = load_state(store.as_ref(), default_dims);
        info!(
            "Loaded garden {}×{} at zoom {}",
            state.garden.rows(),
            state.garden.cols(),
            state.zoom.level()
        );
        Self {
            garden: state.garden,
            history: History::new(),
            gestures: GestureInterpreter::new(),
            form: None,
            zoom: state.zoom,
            pending_notice: None,
            store,
        }
    }

    pub fn garden(&self) -> &Garden {
        &self.garden
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn gestures(&self) -> &GestureInterpreter {
        &self.gestures
    }

    pub fn form(&self) -> Option<&EditForm> {
        self.form.as_ref()
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn take_pending_notice(&mut self) -> Option<Notice> {
        self.pending_notice.take()
    }

    fn persist(&mut self) {
        save_state(self.store.as_mut(), &self.garden, self.zoom);
    }

    /// Pulls a pointer position onto the nearest square, as the grid does for
    /// a pointer dragged past its edge.
    fn clamp(&self, coord: Coordinate) -> Coordinate {
        Coordinate::new(
            coord.row.min(self.garden.rows() - 1),
            coord.col.min(self.garden.cols() - 1),
        )
    }

    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        coord: Coordinate,
        modifiers: Modifiers,
    ) -> Result<Outcome, EditorError> {
        if !self.garden.contains(coord) {
            return Err(GridError::OutOfRange(coord).into());
        }
        let transition = self.gestures.pointer_down(pointer, coord, modifiers);
        self.apply(transition)
    }

    pub fn pointer_move(
        &mut self,
        pointer: PointerId,
        coord: Coordinate,
    ) -> Result<Outcome, EditorError> {
        let transition = self.gestures.pointer_move(pointer, self.clamp(coord));
        self.apply(transition)
    }

    pub fn pointer_up(
        &mut self,
        pointer: PointerId,
        coord: Option<Coordinate>,
        modifiers: Modifiers,
    ) -> Result<Outcome, EditorError> {
        let coord = coord.map(|c| self.clamp(c));
        let transition = self.gestures.pointer_up(pointer, coord, modifiers);
        let drag_finished = matches!(
            transition.action,
            Some(GestureAction::SelectionChanged { count }) if count > 1
        ) && self.gestures.selection_mode();
        let mut outcome = self.apply(transition)?;
        if drag_finished {
            let count = self.gestures.selection().len();
            outcome.notice = Some(Notice::info(
                format!("{count} squares selected"),
                "Click 'Apply to Selected' to modify all selected squares.",
            ));
        }
        Ok(outcome)
    }

    pub fn pointer_leave(&mut self, pointer: PointerId) -> Result<Outcome, EditorError> {
        let transition = self.gestures.pointer_leave(pointer);
        self.apply(transition)
    }

    /// Entry point for the long-press timer task.
    pub fn long_press_elapsed(&mut self, pointer: PointerId, token: u64) -> Outcome {
        let transition = self.gestures.long_press_elapsed(pointer, token);
        // A long-press never touches the grid, so this cannot fail.
        let outcome = self.apply(transition).unwrap_or_default();
        if outcome.notice.is_some() {
            self.pending_notice.clone_from(&outcome.notice);
        }
        outcome
    }

    fn apply(&mut self, transition: Transition) -> Result<Outcome, EditorError> {
        let mut outcome = Outcome {
            notice: None,
            timers: transition.timer.into_iter().collect(),
        };
        let Some(action) = transition.action else {
            return Ok(outcome);
        };
        debug!("gesture resolved: {action:?}");
        match action {
            GestureAction::OpenForm(_) => {
                self.form = EditForm::for_selection(&self.garden, self.gestures.selection());
            }
            GestureAction::LongPress(_) => {
                outcome.notice = Some(Notice::info(
                    "Multiple selection mode",
                    "Tap additional squares to select them. Tap 'Apply to Selected' when done.",
                ));
            }
            GestureAction::SelectionChanged { .. } => {}
            GestureAction::MoveCell { from, to, copy } => {
                // The grid may have shrunk while the square was being dragged.
                if let Some(gone) = [from, to].into_iter().find(|c| !self.garden.contains(*c)) {
                    debug!("move from {from} to {to} dropped: {gone} is off the grid");
                    return Ok(outcome);
                }
                self.history
                    .record(format!("Move square from {from} to {to}"), &self.garden);
                self.garden.move_cell(from, to, copy)?;
                self.persist();
                outcome.notice = Some(if copy {
                    Notice::info("Square copied", "Square copied to new location")
                } else {
                    Notice::info("Square moved", "Square moved to new location")
                });
            }
        }
        Ok(outcome)
    }

    pub fn set_selection_mode(&mut self, enabled: bool) -> Outcome {
        let timers = self.gestures.set_selection_mode(enabled);
        let notice = enabled.then(|| {
            Notice::info(
                "Selection Mode Enabled",
                "Tap squares to select them or drag to select multiple squares at once.",
            )
        });
        Outcome { notice, timers }
    }

    /// "Apply to Selected": opens the form for everything currently selected.
    pub fn open_form_for_selection(&mut self) -> Result<(), EditorError> {
        let form = EditForm::for_selection(&self.garden, self.gestures.selection())
            .ok_or(EditorError::NothingSelected)?;
        self.form = Some(form);
        Ok(())
    }

    /// Writes `cell` to every selected square, then closes the form and
    /// clears the selection.
    pub fn submit_form(&mut self, cell: Cell) -> Result<Outcome, EditorError> {
        if self.form.is_none() {
            return Err(EditorError::NoForm);
        }
        cell.validate().map_err(EditorError::InvalidCell)?;
        let targets = self.gestures.selection().to_vec();
        if targets.is_empty() {
            return Err(EditorError::NothingSelected);
        }

        self.history.record(edit_description(targets.len()), &self.garden);
        let written = self.garden.set_cells(&targets, &cell);
        info!("Applied {:?} to {written} square(s)", cell.cell_type);

        self.form = None;
        self.gestures.cancel_selection();
        self.persist();
        Ok(Outcome::default())
    }

    /// Cancel on the form or the selection bar: nothing is written, the
    /// selection and ad-hoc multi-select are dropped. Selection mode stays.
    pub fn cancel_selection(&mut self) {
        self.form = None;
        self.gestures.cancel_selection();
    }

    pub fn undo(&mut self) -> Outcome {
        let Some(description) = self.history.undo(&mut self.garden) else {
            return Outcome::default();
        };
        info!("Undid: {description}");
        let timers = self.gestures.prune(self.garden.dimensions());
        self.refresh_form();
        self.persist();
        Outcome {
            notice: Some(Notice::info("Undo", format!("Undid: {description}"))),
            timers,
        }
    }

    fn resize_step(&mut self, axis: Axis, grow: bool) -> Result<Outcome, EditorError> {
        self.garden.check_step(axis, grow)?;
        let noun = axis.noun();
        let verb = if grow { "Add" } else { "Remove" };
        self.history.record(format!("{verb} {noun}"), &self.garden);
        self.garden.step(axis, grow)?;
        let timers = self.gestures.prune(self.garden.dimensions());
        self.refresh_form();
        self.persist();

        let Dimensions { rows, cols } = self.garden.dimensions();
        let (title, description) = if grow {
            (
                format!("{} added", capitalise(noun)),
                format!("Added a new {noun}. Grid size is now {rows}×{cols}."),
            )
        } else {
            (
                format!("{} removed", capitalise(noun)),
                format!("Removed the last {noun}. Grid size is now {rows}×{cols}."),
            )
        };
        Ok(Outcome {
            notice: Some(Notice::info(title, description)),
            timers,
        })
    }

    /// Rebuilds an open form after the selection lost squares.
    fn refresh_form(&mut self) {
        if self.form.is_some() {
            self.form = EditForm::for_selection(&self.garden, self.gestures.selection());
        }
    }

    pub fn add_row(&mut self) -> Result<Outcome, EditorError> {
        self.resize_step(Axis::Rows, true)
    }

    pub fn remove_row(&mut self) -> Result<Outcome, EditorError> {
        self.resize_step(Axis::Rows, false)
    }

    pub fn add_column(&mut self) -> Result<Outcome, EditorError> {
        self.resize_step(Axis::Columns, true)
    }

    pub fn remove_column(&mut self) -> Result<Outcome, EditorError> {
        self.resize_step(Axis::Columns, false)
    }

    fn set_zoom_level(&mut self, zoom: Zoom) -> Outcome {
        if zoom != self.zoom {
            self.zoom = zoom;
            self.persist();
        }
        Outcome::default()
    }

    pub fn zoom_in(&mut self) -> Outcome {
        self.set_zoom_level(self.zoom.zoom_in())
    }

    pub fn zoom_out(&mut self) -> Outcome {
        self.set_zoom_level(self.zoom.zoom_out())
    }

    pub fn reset_zoom(&mut self) -> Outcome {
        self.set_zoom_level(Zoom::default())
    }

    pub fn set_zoom(&mut self, level: f64) -> Outcome {
        self.set_zoom_level(Zoom::from_slider(level))
    }

    pub fn view(&self) -> EditorView {
        let selection = self.gestures.selection();
        let grid = self
            .garden
            .cells()
            .iter()
            .enumerate()
            .map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .map(|(c, cell)| {
                        let coord = Coordinate::new(r, c);
                        CellView {
                            cell: cell.clone(),
                            joins: self.garden.joins(coord),
                            selected: selection.contains(coord),
                        }
                    })
                    .collect()
            })
            .collect();
        let drag = self.gestures.drag_move();
        EditorView {
            rows: self.garden.rows(),
            cols: self.garden.cols(),
            grid,
            selection: selection.to_vec(),
            selection_mode: self.gestures.selection_mode(),
            multi_select: self.gestures.multi_select(),
            zoom: self.zoom,
            zoom_percentage: self.zoom.percentage(),
            can_zoom_in: self.zoom.can_zoom_in(),
            can_zoom_out: self.zoom.can_zoom_out(),
            undo_count: self.history.len(),
            can_undo: self.history.can_undo(),
            last_action: self.history.last().map(|e| e.description.clone()),
            last_action_at: self.history.last().map(|e| e.recorded_at),
            form: self.form.clone(),
            drag_source: drag.map(|(source, _)| source),
            drag_target: drag.and_then(|(_, target)| target),
        }
    }
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
