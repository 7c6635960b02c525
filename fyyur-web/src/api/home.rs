//! Home page

use axum::response::Response;
use serde_json::json;

use crate::flash::Flashes;

/// GET /
pub async fn home(flashes: Flashes) -> Response {
    flashes.render(json!({ "page": "home" }))
}
