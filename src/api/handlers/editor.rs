use actix_web::{delete, get, http::Method, post, put, web, Responder};

use crate::{
    api::{handlers::respond, state::AppState},
    logic::editor::Outcome,
    models::{
        cell::Cell,
        request::{EditorApiResponse, ErrorResponse, SelectionModeRequest, ZoomRequest},
    },
};

/// GET /api/garden
/// Returns the grid with join flags, the selection, zoom and undo state.
#[utoipa::path(
    get,
    path = "/api/garden",
    tag = "garden",
    responses((status = 200, description = "Current editor state", body = EditorApiResponse))
)]
#[get("/garden")]
pub async fn get_garden(state: web::Data<AppState>) -> impl Responder {
    respond(&state, "/api/garden", Method::GET, |_| Ok(Outcome::default()))
}

/// PUT /api/selection-mode
#[utoipa::path(
    put,
    path = "/api/selection-mode",
    tag = "selection",
    request_body = SelectionModeRequest,
    responses((status = 200, description = "Selection mode switched", body = EditorApiResponse))
)]
#[put("/selection-mode")]
pub async fn set_selection_mode(
    state: web::Data<AppState>,
    body: web::Json<SelectionModeRequest>,
) -> impl Responder {
    let enabled = body.into_inner().enabled;
    respond(&state, "/api/selection-mode", Method::PUT, |session| {
        Ok(session.set_selection_mode(enabled))
    })
}

/// POST /api/selection/apply
/// Opens the edit form for every selected square.
#[utoipa::path(
    post,
    path = "/api/selection/apply",
    tag = "selection",
    responses(
        (status = 200, description = "Form opened", body = EditorApiResponse),
        (status = 409, description = "Nothing is selected", body = ErrorResponse),
    )
)]
#[post("/selection/apply")]
pub async fn apply_selection(state: web::Data<AppState>) -> impl Responder {
    respond(&state, "/api/selection/apply", Method::POST, |session| {
        session.open_form_for_selection().map(|_| Outcome::default())
    })
}

/// POST /api/selection/cancel
#[utoipa::path(
    post,
    path = "/api/selection/cancel",
    tag = "selection",
    responses((status = 200, description = "Selection cleared", body = EditorApiResponse))
)]
#[post("/selection/cancel")]
pub async fn cancel_selection(state: web::Data<AppState>) -> impl Responder {
    respond(&state, "/api/selection/cancel", Method::POST, |session| {
        session.cancel_selection();
        Ok(Outcome::default())
    })
}

/// POST /api/form/submit
/// Writes the submitted square to every selected square.
#[utoipa::path(
    post,
    path = "/api/form/submit",
    tag = "form",
    request_body = Cell,
    responses(
        (status = 200, description = "Squares updated", body = EditorApiResponse),
        (status = 400, description = "Invalid square data", body = ErrorResponse),
        (status = 409, description = "No form open or nothing selected", body = ErrorResponse),
    )
)]
#[post("/form/submit")]
pub async fn submit_form(state: web::Data<AppState>, body: web::Json<Cell>) -> impl Responder {
    let cell = body.into_inner();
    respond(&state, "/api/form/submit", Method::POST, |session| {
        session.submit_form(cell)
    })
}

/// POST /api/form/cancel
#[utoipa::path(
    post,
    path = "/api/form/cancel",
    tag = "form",
    responses((status = 200, description = "Form closed", body = EditorApiResponse))
)]
#[post("/form/cancel")]
pub async fn cancel_form(state: web::Data<AppState>) -> impl Responder {
    respond(&state, "/api/form/cancel", Method::POST, |session| {
        session.cancel_selection();
        Ok(Outcome::default())
    })
}

/// POST /api/undo
#[utoipa::path(
    post,
    path = "/api/undo",
    tag = "history",
    responses((status = 200, description = "Last action undone, if any", body = EditorApiResponse))
)]
#[post("/undo")]
pub async fn undo(state: web::Data<AppState>) -> impl Responder {
    respond(&state, "/api/undo", Method::POST, |session| Ok(session.undo()))
}

/// POST /api/grid/rows
#[utoipa::path(
    post,
    path = "/api/grid/rows",
    tag = "grid",
    responses(
        (status = 200, description = "Row added", body = EditorApiResponse),
        (status = 409, description = "Maximum rows reached", body = ErrorResponse),
    )
)]
#[post("/grid/rows")]
pub async fn add_row(state: web::Data<AppState>) -> impl Responder {
    respond(&state, "/api/grid/rows", Method::POST, |session| {
        session.add_row()
    })
}

/// DELETE /api/grid/rows
#[utoipa::path(
    delete,
    path = "/api/grid/rows",
    tag = "grid",
    responses(
        (status = 200, description = "Last row removed", body = EditorApiResponse),
        (status = 409, description = "Minimum rows reached", body = ErrorResponse),
    )
)]
#[delete("/grid/rows")]
pub async fn remove_row(state: web::Data<AppState>) -> impl Responder {
    respond(&state, "/api/grid/rows", Method::DELETE, |session| {
        session.remove_row()
    })
}

/// POST /api/grid/columns
#[utoipa::path(
    post,
    path = "/api/grid/columns",
    tag = "grid",
    responses(
        (status = 200, description = "Column added", body = EditorApiResponse),
        (status = 409, description = "Maximum columns reached", body = ErrorResponse),
    )
)]
#[post("/grid/columns")]
pub async fn add_column(state: web::Data<AppState>) -> impl Responder {
    respond(&state, "/api/grid/columns", Method::POST, |session| {
        session.add_column()
    })
}

/// DELETE /api/grid/columns
#[utoipa::path(
    delete,
    path = "/api/grid/columns",
    tag = "grid",
    responses(
        (status = 200, description = "Last column removed", body = EditorApiResponse),
        (status = 409, description = "Minimum columns reached", body = ErrorResponse),
    )
)]
#[delete("/grid/columns")]
pub async fn remove_column(state: web::Data<AppState>) -> impl Responder {
    respond(&state, "/api/grid/columns", Method::DELETE, |session| {
        session.remove_column()
    })
}

#[utoipa::path(
    post,
    path = "/api/zoom/in",
    tag = "zoom",
    responses((status = 200, description = "Zoomed in one step", body = EditorApiResponse))
)]
#[post("/zoom/in")]
pub async fn zoom_in(state: web::Data<AppState>) -> impl Responder {
    respond(&state, "/api/zoom/in", Method::POST, |session| Ok(session.zoom_in()))
}

#[utoipa::path(
    post,
    path = "/api/zoom/out",
    tag = "zoom",
    responses((status = 200, description = "Zoomed out one step", body = EditorApiResponse))
)]
#[post("/zoom/out")]
pub async fn zoom_out(state: web::Data<AppState>) -> impl Responder {
    respond(&state, "/api/zoom/out", Method::POST, |session| Ok(session.zoom_out()))
}

#[utoipa::path(
    post,
    path = "/api/zoom/reset",
    tag = "zoom",
    responses((status = 200, description = "Zoom back to 100%", body = EditorApiResponse))
)]
#[post("/zoom/reset")]
pub async fn reset_zoom(state: web::Data<AppState>) -> impl Responder {
    respond(&state, "/api/zoom/reset", Method::POST, |session| Ok(session.reset_zoom()))
}

/// PUT /api/zoom
/// Slider input; snapped to 25% steps and clamped to 50%..300%.
#[utoipa::path(
    put,
    path = "/api/zoom",
    tag = "zoom",
    request_body = ZoomRequest,
    responses((status = 200, description = "Zoom set", body = EditorApiResponse))
)]
#[put("/zoom")]
pub async fn set_zoom(state: web::Data<AppState>, body: web::Json<ZoomRequest>) -> impl Responder {
    let level = body.into_inner().level;
    respond(&state, "/api/zoom", Method::PUT, |session| Ok(session.set_zoom(level)))
}
