use grid_garden::{
    logic::{
        editor::EditorSession,
        gesture::{Modifiers, TimerCommand},
        zoom::Zoom,
    },
    models::{
        cell::{Cell, CellType, SunExposure},
        Coordinate, Dimensions,
    },
    storage::{
        persisted::{DIMENSIONS_KEY, GRID_KEY, ZOOM_KEY},
        FileStore, KeyValueStore, MemoryStore,
    },
};

fn at(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col)
}

fn tap(editor: &mut EditorSession, coord: Coordinate) {
    editor.pointer_down(1, coord, Modifiers::default()).unwrap();
    editor.pointer_up(1, Some(coord), Modifiers::default()).unwrap();
}

fn long_press(editor: &mut EditorSession, coord: Coordinate) {
    let down = editor.pointer_down(1, coord, Modifiers::default()).unwrap();
    let Some(TimerCommand::Schedule { pointer, token }) = down.timers.first().copied() else {
        panic!("press did not schedule a long-press timer");
    };
    editor.long_press_elapsed(pointer, token);
    editor.pointer_up(1, Some(coord), Modifiers::default()).unwrap();
}

// ---------------------------------------------------------------------------
// Scenario 1: plan a small herb bed with a long-press multi-select
// ---------------------------------------------------------------------------
#[test]
fn scenario_long_press_bulk_edit() {
    let mut editor = EditorSession::load(Box::new(MemoryStore::new()), Dimensions::new(8, 8));

    long_press(&mut editor, at(0, 0));
    assert!(editor.form().is_none(), "long-press must not open the form");
    tap(&mut editor, at(0, 1));
    tap(&mut editor, at(0, 2));
    assert_eq!(
        editor.gestures().selection().to_vec(),
        vec![at(0, 0), at(0, 1), at(0, 2)]
    );

    editor.open_form_for_selection().unwrap();
    let form = editor.form().unwrap();
    assert!(form.multiple);
    assert_eq!(form.initial, Cell::empty());

    let basil = Cell {
        cell_type: CellType::Plant,
        name: Some("Basil".into()),
        soil_ph: Some(6.5),
        sun_exposure: Some(SunExposure::Sun),
        notes: None,
        info_url: None,
    };
    editor.submit_form(basil.clone()).unwrap();

    for col in 0..3 {
        assert_eq!(editor.garden().get(at(0, col)), Some(&basil));
    }
    assert!(!editor.gestures().multi_select());
    let view = editor.view();
    assert!(view.grid[0][1].joins.join_left && view.grid[0][1].joins.join_right);
    assert!(!view.grid[0][2].joins.join_right);
    assert_eq!(view.last_action.as_deref(), Some("Edit 3 squares"));
}

// ---------------------------------------------------------------------------
// Scenario 2: copy a tree with alt-drag, then undo everything
// ---------------------------------------------------------------------------
#[test]
fn scenario_copy_and_undo_to_start() {
    let mut editor = EditorSession::load(Box::new(MemoryStore::new()), Dimensions::new(6, 6));
    let start = editor.garden().clone();

    tap(&mut editor, at(0, 0));
    editor
        .submit_form(Cell::of_type(CellType::Tree).with_name("Oak"))
        .unwrap();

    let alt = Modifiers {
        alt: true,
        ..Modifiers::default()
    };
    editor.pointer_down(2, at(0, 0), alt).unwrap();
    editor.pointer_move(2, at(5, 5)).unwrap();
    let up = editor.pointer_up(2, Some(at(5, 5)), alt).unwrap();
    assert_eq!(up.notice.unwrap().title, "Square copied");
    assert_eq!(editor.garden().get(at(0, 0)).unwrap().name.as_deref(), Some("Oak"));
    assert_eq!(editor.garden().get(at(5, 5)).unwrap().name.as_deref(), Some("Oak"));

    editor.add_row().unwrap();
    editor.add_column().unwrap();
    assert_eq!(editor.garden().dimensions(), Dimensions::new(7, 7));
    assert_eq!(editor.history().len(), 4);

    while editor.history().can_undo() {
        editor.undo();
    }
    assert_eq!(editor.garden(), &start);
}

// ---------------------------------------------------------------------------
// Scenario 3: the session survives a restart through the file store
// ---------------------------------------------------------------------------
#[test]
fn scenario_reload_from_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garden.json");

    {
        let mut editor = EditorSession::load(Box::new(FileStore::open(&path)), Dimensions::new(8, 8));
        editor.remove_row().unwrap();
        tap(&mut editor, at(3, 3));
        editor.submit_form(Cell::of_type(CellType::Water)).unwrap();
        editor.zoom_in();
    }

    let editor = EditorSession::load(Box::new(FileStore::open(&path)), Dimensions::new(8, 8));
    assert_eq!(editor.garden().dimensions(), Dimensions::new(7, 8));
    assert_eq!(
        editor.garden().get(at(3, 3)).map(|c| c.cell_type),
        Some(CellType::Water)
    );
    assert_eq!(editor.zoom().level(), 1.25);
    assert!(!editor.history().can_undo(), "history is not persisted");
}

// ---------------------------------------------------------------------------
// Scenario 4: corrupt saved entries fall back to defaults independently
// ---------------------------------------------------------------------------
#[test]
fn scenario_corrupt_entries_fall_back() {
    let mut store = MemoryStore::new();
    store.set(GRID_KEY, "{\"oops\": true}".into()).unwrap();
    store.set(DIMENSIONS_KEY, "{\"rows\": 12, \"cols\": 5}".into()).unwrap();
    store.set(ZOOM_KEY, "\"huge\"".into()).unwrap();

    let editor = EditorSession::load(Box::new(store), Dimensions::new(8, 8));
    assert_eq!(editor.garden().dimensions(), Dimensions::new(12, 5));
    assert!(editor.garden().cells().iter().flatten().all(Cell::is_empty));
    assert_eq!(editor.zoom(), Zoom::default());
}

// ---------------------------------------------------------------------------
// Scenario 5: selection mode drag, shift-extend and cancel
// ---------------------------------------------------------------------------
#[test]
fn scenario_selection_mode_drag_and_cancel() {
    let mut editor = EditorSession::load(Box::new(MemoryStore::new()), Dimensions::new(8, 8));
    editor.set_selection_mode(true);

    editor.pointer_down(1, at(1, 1), Modifiers::default()).unwrap();
    editor.pointer_move(1, at(3, 2)).unwrap();
    editor.pointer_up(1, Some(at(3, 2)), Modifiers::default()).unwrap();
    assert_eq!(editor.gestures().selection().len(), 6);

    let shift = Modifiers {
        shift: true,
        ..Modifiers::default()
    };
    editor.pointer_down(1, at(7, 7), shift).unwrap();
    editor.pointer_up(1, Some(at(7, 7)), shift).unwrap();
    assert_eq!(editor.gestures().selection().len(), 7);

    editor.open_form_for_selection().unwrap();
    editor.cancel_selection();
    assert!(editor.gestures().selection().is_empty());
    assert!(editor.gestures().selection_mode());
    assert_eq!(editor.history().len(), 0);
}
