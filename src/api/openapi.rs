use utoipa::OpenApi;

use crate::logic::{
    editor::{CellView, EditorView, Notice},
    form::EditForm,
    gesture::Modifiers,
    grid::Joins,
};
use crate::models::{
    cell::{Cell, CellType, SunExposure},
    request::{
        EditorApiResponse, EditorResponse, ErrorResponse, Link, PointerDownRequest,
        PointerLeaveRequest, PointerMoveRequest, PointerUpRequest, SelectionModeRequest,
        ZoomRequest,
    },
    Coordinate, Dimensions,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Grid Garden Editor API",
        description = "Local editing service behind the grid garden planner: feed it pointer gestures and control actions, get back the grid with joins, the selection, the open form and undo state.",
        version = "1.0.0",
        license(name = "MIT"),
    ),
    paths(
        crate::api::handlers::editor::get_garden,
        crate::api::handlers::pointer::pointer_down,
        crate::api::handlers::pointer::pointer_move,
        crate::api::handlers::pointer::pointer_up,
        crate::api::handlers::pointer::pointer_leave,
        crate::api::handlers::editor::set_selection_mode,
        crate::api::handlers::editor::apply_selection,
        crate::api::handlers::editor::cancel_selection,
        crate::api::handlers::editor::submit_form,
        crate::api::handlers::editor::cancel_form,
        crate::api::handlers::editor::undo,
        crate::api::handlers::editor::add_row,
        crate::api::handlers::editor::remove_row,
        crate::api::handlers::editor::add_column,
        crate::api::handlers::editor::remove_column,
        crate::api::handlers::editor::zoom_in,
        crate::api::handlers::editor::zoom_out,
        crate::api::handlers::editor::reset_zoom,
        crate::api::handlers::editor::set_zoom,
    ),
    components(
        schemas(
            // Enums
            CellType, SunExposure,
            // Document
            Cell, Coordinate, Dimensions, Joins, CellView,
            // Editor
            EditorView, EditForm, Notice, Modifiers,
            // Requests
            PointerDownRequest, PointerMoveRequest, PointerUpRequest, PointerLeaveRequest,
            SelectionModeRequest, ZoomRequest,
            // Shared
            Link, ErrorResponse, EditorResponse,
            // Concrete response envelope (via #[aliases])
            EditorApiResponse,
        )
    ),
    tags(
        (name = "garden",    description = "Current editor state"),
        (name = "pointer",   description = "Pointer gestures — press, move, release, leave"),
        (name = "selection", description = "Selection mode and bulk selection"),
        (name = "form",      description = "Edit form — submit or cancel"),
        (name = "history",   description = "Undo"),
        (name = "grid",      description = "Grid size — add/remove the last row or column"),
        (name = "zoom",      description = "Zoom controls"),
    )
)]
pub struct ApiDoc;
