use std::collections::HashMap;

use actix_web::http::Method;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use utoipa::ToSchema;

use crate::logic::{
    editor::{EditorView, Notice},
    gesture::{Modifiers, PointerId},
};
use crate::models::Coordinate;

/// Serde adapter for `actix_web::http::Method` (serialises as its uppercase string).
mod method_serde {
    use actix_web::http::Method;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(method.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Method, D::Error> {
        let s = String::deserialize(d)?;
        Method::from_bytes(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// A single HAL-style hyperlink.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub href: String,
    #[serde(with = "method_serde")]
    #[schema(value_type = String, example = "POST")]
    pub method: Method,
}

/// Map of relation name → link, serialised as the `_links` field in responses.
pub type Links = HashMap<String, Link>;

/// Helper to build a `Link` from an href and an HTTP method.
pub fn link(href: impl Into<String>, method: Method) -> Link {
    Link {
        href: href.into(),
        method,
    }
}

/// Generic single-item response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(EditorApiResponse = ApiResponse<EditorResponse>)]
pub struct ApiResponse<T> {
    pub payload: T,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<String>,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> ApiResponse<T> {
    pub fn new(payload: T, links: Links) -> Self {
        Self {
            payload,
            errors: vec![],
            links,
        }
    }
}

/// The editor as it looks after an action, plus the toast it raised.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EditorResponse {
    pub view: EditorView,
    pub notice: Option<Notice>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub title: Option<String>,
    /// Set for bounds rejections, which the front-end shows as a red toast.
    #[serde(default)]
    pub destructive: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointerDownRequest {
    #[schema(value_type = u32)]
    pub pointer_id: PointerId,
    pub row: usize,
    pub col: usize,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl PointerDownRequest {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.row, self.col)
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointerMoveRequest {
    #[schema(value_type = u32)]
    pub pointer_id: PointerId,
    pub row: usize,
    pub col: usize,
}

impl PointerMoveRequest {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.row, self.col)
    }
}

/// Release of a pointer. `row`/`col` are omitted when the pointer is not over
/// the grid.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointerUpRequest {
    #[schema(value_type = u32)]
    pub pointer_id: PointerId,
    pub row: Option<usize>,
    pub col: Option<usize>,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl PointerUpRequest {
    pub fn coordinate(&self) -> Option<Coordinate> {
        Some(Coordinate::new(self.row?, self.col?))
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PointerLeaveRequest {
    #[schema(value_type = u32)]
    pub pointer_id: PointerId,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SelectionModeRequest {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ZoomRequest {
    pub level: f64,
}
