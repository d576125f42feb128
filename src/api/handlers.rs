use std::collections::HashMap;

use actix_web::{http::Method, HttpResponse};

use crate::{
    api::state::AppState,
    logic::editor::{EditorError, EditorSession, Outcome},
    models::request::{link, ApiResponse, EditorResponse, ErrorResponse},
};

pub mod editor;
pub mod pointer;

fn editor_links(self_href: &str, self_method: Method) -> crate::models::request::Links {
    let mut links = HashMap::new();
    links.insert("self".into(), link(self_href, self_method));
    links.insert("garden".into(), link("/api/garden", Method::GET));
    links.insert("undo".into(), link("/api/undo", Method::POST));
    links
}

/// Renders the session after an action, together with the notice it raised
/// or, failing that, one a long-press timer left behind.
fn editor_response(
    session: &mut EditorSession,
    outcome: Outcome,
    self_href: &str,
    self_method: Method,
) -> HttpResponse {
    let pending = session.take_pending_notice();
    let payload = EditorResponse {
        view: session.view(),
        notice: outcome.notice.or(pending),
    };
    HttpResponse::Ok().json(ApiResponse::new(payload, editor_links(self_href, self_method)))
}

fn error_response(err: &EditorError) -> HttpResponse {
    let body = ErrorResponse {
        error: err.to_string(),
        title: Some(err.title().to_string()),
        destructive: err.is_rejection(),
    };
    match err {
        EditorError::NothingSelected | EditorError::NoForm => HttpResponse::Conflict().json(body),
        e if e.is_rejection() => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Applies one editor action under the session lock, hands any timer commands
/// to the timer runner and renders the result.
fn respond<F>(state: &AppState, self_href: &str, self_method: Method, action: F) -> HttpResponse
where
    F: FnOnce(&mut EditorSession) -> Result<Outcome, EditorError>,
{
    let mut session = state.session();
    match action(&mut *session) {
        Ok(outcome) => {
            state.timers.run(outcome.timers.iter().copied());
            editor_response(&mut session, outcome, self_href, self_method)
        }
        Err(err) => {
            log::info!("{self_method} {self_href} rejected: {err}");
            error_response(&err)
        }
    }
}
