use actix_web::{http::Method, post, web, Responder};

use crate::{
    api::{handlers::respond, state::AppState},
    models::request::{
        EditorApiResponse, ErrorResponse, PointerDownRequest, PointerLeaveRequest,
        PointerMoveRequest, PointerUpRequest,
    },
};

/// POST /api/pointer/down
/// Starts a press, a selection drag or a square drag depending on mode and modifiers.
#[utoipa::path(
    post,
    path = "/api/pointer/down",
    tag = "pointer",
    request_body = PointerDownRequest,
    responses(
        (status = 200, description = "Editor after the press", body = EditorApiResponse),
        (status = 400, description = "Square outside the grid", body = ErrorResponse),
    )
)]
#[post("/pointer/down")]
pub async fn pointer_down(
    state: web::Data<AppState>,
    body: web::Json<PointerDownRequest>,
) -> impl Responder {
    let request = body.into_inner();
    respond(&state, "/api/pointer/down", Method::POST, |session| {
        session.pointer_down(request.pointer_id, request.coordinate(), request.modifiers)
    })
}

/// POST /api/pointer/move
#[utoipa::path(
    post,
    path = "/api/pointer/move",
    tag = "pointer",
    request_body = PointerMoveRequest,
    responses((status = 200, description = "Editor after the move", body = EditorApiResponse))
)]
#[post("/pointer/move")]
pub async fn pointer_move(
    state: web::Data<AppState>,
    body: web::Json<PointerMoveRequest>,
) -> impl Responder {
    let request = body.into_inner();
    respond(&state, "/api/pointer/move", Method::POST, |session| {
        session.pointer_move(request.pointer_id, request.coordinate())
    })
}

/// POST /api/pointer/up
/// Resolves the pointer's gesture: tap, selection drag end or square drop.
#[utoipa::path(
    post,
    path = "/api/pointer/up",
    tag = "pointer",
    request_body = PointerUpRequest,
    responses((status = 200, description = "Editor after the release", body = EditorApiResponse))
)]
#[post("/pointer/up")]
pub async fn pointer_up(
    state: web::Data<AppState>,
    body: web::Json<PointerUpRequest>,
) -> impl Responder {
    let request = body.into_inner();
    respond(&state, "/api/pointer/up", Method::POST, |session| {
        session.pointer_up(request.pointer_id, request.coordinate(), request.modifiers)
    })
}

/// POST /api/pointer/leave
/// The pointer left the grid; its gesture is abandoned.
#[utoipa::path(
    post,
    path = "/api/pointer/leave",
    tag = "pointer",
    request_body = PointerLeaveRequest,
    responses((status = 200, description = "Editor after the leave", body = EditorApiResponse))
)]
#[post("/pointer/leave")]
pub async fn pointer_leave(
    state: web::Data<AppState>,
    body: web::Json<PointerLeaveRequest>,
) -> impl Responder {
    let request = body.into_inner();
    respond(&state, "/api/pointer/leave", Method::POST, |session| {
        session.pointer_leave(request.pointer_id)
    })
}
