//! Pointer gesture interpretation.
//!
//! Each active pointer runs its own small state machine. Raw down/move/up/leave
//! events come in; semantic [`GestureAction`]s and long-press [`TimerCommand`]s
//! come out. The interpreter owns the selection set but never touches the grid:
//! cell moves are handed back to the caller, which snapshots history first.

use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::logic::selection::Selection;
use crate::models::{Coordinate, Dimensions};

/// How long a press must be held before it counts as a long-press.
pub const LONG_PRESS_THRESHOLD: Duration = Duration::from_millis(500);

pub type PointerId = u32;

/// Keyboard modifiers held during a pointer event.
///
/// `ctrl` or `alt` at press time starts a cell drag; `alt` at release turns the
/// move into a copy; `shift` extends the selection instead of replacing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn wants_move(&self) -> bool {
        self.ctrl || self.alt
    }

    pub fn wants_copy(&self) -> bool {
        self.alt
    }

    pub fn is_additive(&self) -> bool {
        self.shift
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PointerState {
    /// Held down with selection mode off; the long-press timer is running.
    Pressing { origin: Coordinate, token: u64 },
    /// The long-press fired; the pointer is still down but the gesture is done.
    LongPressResolved,
    DragSelecting {
        start: Coordinate,
        /// Selection as it was before the press, used when the drag turns out
        /// to be a tap.
        prior: Selection,
        moved: bool,
    },
    DragMovingCell {
        source: Coordinate,
        target: Option<Coordinate>,
    },
}

/// What a resolved gesture asks the editor to do.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureAction {
    /// Tap with selection mode off: the square is now the only selection.
    OpenForm(Coordinate),
    /// Long-press: ad-hoc multi-select started on this square.
    LongPress(Coordinate),
    /// The selection changed; `count` is its new size.
    SelectionChanged { count: usize },
    /// Drop of a dragged square onto a different square.
    MoveCell {
        from: Coordinate,
        to: Coordinate,
        copy: bool,
    },
}

/// Instructions for whoever runs the long-press timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Start (or restart) the pointer's timer. When it elapses, call
    /// [`GestureInterpreter::long_press_elapsed`] with the same token.
    Schedule { pointer: PointerId, token: u64 },
    Cancel { pointer: PointerId },
}

/// Outcome of feeding one event to the interpreter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    pub action: Option<GestureAction>,
    pub timer: Option<TimerCommand>,
}

impl Transition {
    fn none() -> Self {
        Self::default()
    }

    fn action(action: GestureAction) -> Self {
        Self {
            action: Some(action),
            timer: None,
        }
    }

    fn with_timer(mut self, timer: Option<TimerCommand>) -> Self {
        self.timer = timer;
        self
    }
}

#[derive(Debug, Default)]
pub struct GestureInterpreter {
    pointers: HashMap<PointerId, PointerState>,
    selection: Selection,
    selection_mode: bool,
    multi_select: bool,
    next_token: u64,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn selection_mode(&self) -> bool {
        self.selection_mode
    }

    /// True while a long-press started multi-select outside selection mode.
    pub fn multi_select(&self) -> bool {
        self.multi_select
    }

    /// Source and current drop target of any in-flight cell drag.
    pub fn drag_move(&self) -> Option<(Coordinate, Option<Coordinate>)> {
        self.pointers.values().find_map(|state| match state {
            PointerState::DragMovingCell { source, target } => Some((*source, *target)),
            _ => None,
        })
    }

    /// Switches selection mode. All in-flight gestures are dropped; turning the
    /// mode off also clears the selection.
    pub fn set_selection_mode(&mut self, enabled: bool) -> Vec<TimerCommand> {
        let cancels = self.reset_pointers();
        self.selection_mode = enabled;
        self.multi_select = false;
        if !enabled {
            self.selection.clear();
        }
        cancels
    }

    /// Clears the selection and leaves ad-hoc multi-select.
    pub fn cancel_selection(&mut self) {
        self.selection.clear();
        self.multi_select = false;
    }

    /// Forgets every coordinate that fell off the grid after a resize or undo.
    ///
    /// Selection is pruned, and so is the pre-press selection a drag keeps for
    /// a tap. A pointer whose press started on a vanished square is dropped
    /// together with its timer. A drop target that vanished is forgotten.
    pub fn prune(&mut self, dims: Dimensions) -> Vec<TimerCommand> {
        self.selection.prune(dims);
        let mut cancels = Vec::new();
        self.pointers.retain(|&pointer, state| match state {
            PointerState::Pressing { origin, .. } => {
                let keep = dims.contains(*origin);
                if !keep {
                    cancels.push(TimerCommand::Cancel { pointer });
                }
                keep
            }
            PointerState::LongPressResolved => true,
            PointerState::DragSelecting { start, prior, .. } => {
                prior.prune(dims);
                dims.contains(*start)
            }
            PointerState::DragMovingCell { source, target } => {
                if target.is_some_and(|t| !dims.contains(t)) {
                    *target = None;
                }
                dims.contains(*source)
            }
        });
        debug!(
            "gestures pruned to {}×{}, {} pointer(s) still down",
            dims.rows,
            dims.cols,
            self.pointers.len()
        );
        cancels
    }

    fn reset_pointers(&mut self) -> Vec<TimerCommand> {
        self.pointers
            .drain()
            .filter_map(|(pointer, state)| match state {
                PointerState::Pressing { .. } => Some(TimerCommand::Cancel { pointer }),
                _ => None,
            })
            .collect()
    }

    pub fn pointer_down(
        &mut self,
        pointer: PointerId,
        coord: Coordinate,
        modifiers: Modifiers,
    ) -> Transition {
        let was_pressing = matches!(
            self.pointers.get(&pointer),
            Some(PointerState::Pressing { .. })
        );
        let stale_timer = was_pressing.then_some(TimerCommand::Cancel { pointer });

        if modifiers.wants_move() {
            debug!("pointer {pointer}: drag-move from {coord}");
            self.pointers.insert(
                pointer,
                PointerState::DragMovingCell {
                    source: coord,
                    target: None,
                },
            );
            return Transition::none().with_timer(stale_timer);
        }

        if self.selection_mode {
            debug!("pointer {pointer}: drag-select from {coord}");
            let prior = self.selection.clone();
            if modifiers.is_additive() {
                self.selection.insert(coord);
            } else {
                self.selection = Selection::single(coord);
            }
            self.pointers.insert(
                pointer,
                PointerState::DragSelecting {
                    start: coord,
                    prior,
                    moved: false,
                },
            );
            return Transition::action(GestureAction::SelectionChanged {
                count: self.selection.len(),
            })
            .with_timer(stale_timer);
        }

        self.next_token += 1;
        let token = self.next_token;
        debug!("pointer {pointer}: pressing {coord} (token {token})");
        self.pointers
            .insert(pointer, PointerState::Pressing { origin: coord, token });
        Transition::none().with_timer(Some(TimerCommand::Schedule { pointer, token }))
    }

    pub fn pointer_move(&mut self, pointer: PointerId, coord: Coordinate) -> Transition {
        match self.pointers.get_mut(&pointer) {
            Some(PointerState::DragMovingCell { target, .. }) => {
                *target = Some(coord);
                Transition::none()
            }
            Some(PointerState::DragSelecting { start, moved, .. }) => {
                if !*moved && coord == *start {
                    return Transition::none();
                }
                *moved = true;
                self.selection = Selection::rectangle(*start, coord);
                Transition::action(GestureAction::SelectionChanged {
                    count: self.selection.len(),
                })
            }
            _ => Transition::none(),
        }
    }

    /// Release of `pointer`. `coord` is the square under the pointer, when it
    /// is over the grid at all.
    pub fn pointer_up(
        &mut self,
        pointer: PointerId,
        coord: Option<Coordinate>,
        modifiers: Modifiers,
    ) -> Transition {
        let Some(state) = self.pointers.remove(&pointer) else {
            return Transition::none();
        };
        match state {
            PointerState::DragMovingCell { source, target } => {
                match coord.or(target) {
                    Some(to) if to != source => Transition::action(GestureAction::MoveCell {
                        from: source,
                        to,
                        copy: modifiers.wants_copy(),
                    }),
                    _ => Transition::none(),
                }
            }
            PointerState::DragSelecting {
                start,
                prior,
                moved,
            } => {
                match coord {
                    // The release square closes the rectangle, even when no
                    // move event reported it.
                    Some(end) if moved || end != start => {
                        self.selection = Selection::rectangle(start, end);
                    }
                    _ if !moved => {
                        self.selection = prior;
                        self.selection.toggle(start);
                    }
                    _ => {}
                }
                Transition::action(GestureAction::SelectionChanged {
                    count: self.selection.len(),
                })
            }
            PointerState::Pressing { origin, .. } => {
                let cancel = Some(TimerCommand::Cancel { pointer });
                if self.multi_select {
                    self.selection.insert(origin);
                    Transition::action(GestureAction::SelectionChanged {
                        count: self.selection.len(),
                    })
                    .with_timer(cancel)
                } else {
                    self.selection = Selection::single(origin);
                    Transition::action(GestureAction::OpenForm(origin)).with_timer(cancel)
                }
            }
            PointerState::LongPressResolved => Transition::none(),
        }
    }

    /// The pointer left the grid. Whatever it was doing is abandoned.
    pub fn pointer_leave(&mut self, pointer: PointerId) -> Transition {
        match self.pointers.remove(&pointer) {
            Some(PointerState::Pressing { .. }) => {
                debug!("pointer {pointer}: press abandoned");
                Transition::none().with_timer(Some(TimerCommand::Cancel { pointer }))
            }
            _ => Transition::none(),
        }
    }

    /// Called by the timer runner. Stale tokens are ignored.
    pub fn long_press_elapsed(&mut self, pointer: PointerId, token: u64) -> Transition {
        let origin = match self.pointers.get(&pointer) {
            Some(PointerState::Pressing { origin, token: t }) if *t == token => *origin,
            _ => return Transition::none(),
        };
        if self.selection_mode {
            return Transition::none();
        }
        debug!("pointer {pointer}: long-press on {origin}");
        self.pointers.insert(pointer, PointerState::LongPressResolved);
        self.multi_select = true;
        self.selection = Selection::single(origin);
        Transition::action(GestureAction::LongPress(origin))
    }
}
