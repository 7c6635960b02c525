//! Venue pages and form submissions

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Router,
};
use fyyur_common::time;
use serde_json::json;
use tracing::{info, warn};

use super::{EntityId, FormFields};
use crate::error::{ApiError, ApiResult};
use crate::flash::Flashes;
use crate::forms::{VenueForm, CHOICES};
use crate::{db, query, AppState};

/// GET /venues
///
/// Venues grouped by state and city.
pub async fn list_venues(State(state): State<AppState>, flashes: Flashes) -> ApiResult<Response> {
    let areas = query::list_venue_areas(&state.db, time::now()).await?;
    Ok(flashes.render(json!({ "areas": areas })))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    flashes: Flashes,
    FormFields(raw): FormFields,
) -> ApiResult<Response> {
    let search_term = raw.values("search_term").first().copied().unwrap_or("").to_string();

    let results = query::search_venues(&state.db, &search_term, time::now()).await?;

    Ok(flashes.render(json!({
        "results": results,
        "search_term": search_term,
    })))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    flashes: Flashes,
) -> ApiResult<Response> {
    let venue = query::venue_detail(&state.db, id, time::now())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Venue {} not found", id)))?;

    Ok(flashes.render(json!({ "venue": venue })))
}

/// GET /venues/create
pub async fn create_venue_form(flashes: Flashes) -> Response {
    flashes.render(json!({
        "form": VenueForm::default(),
        "choices": CHOICES,
    }))
}

/// POST /venues/create
pub async fn create_venue_submission(
    State(state): State<AppState>,
    flashes: Flashes,
    FormFields(raw): FormFields,
) -> Response {
    let new_venue = match VenueForm::parse(&raw) {
        Ok(venue) => venue,
        Err(invalid) => {
            warn!("Rejected venue submission: {:?}", invalid.errors);
            return flashes.render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "form": invalid.form,
                    "errors": invalid.errors,
                    "choices": CHOICES,
                }),
            );
        }
    };

    match db::insert_venue(&state.db, &new_venue).await {
        Ok(id) => {
            info!("Venue {} listed as {}", new_venue.name, id);
            flashes
                .success(format!("Venue {} was successfully listed!", new_venue.name))
                .redirect(&format!("/venues/{}", id))
        }
        Err(e) => {
            warn!("Failed to list venue {}: {}", new_venue.name, e);
            flashes
                .error(format!(
                    "An error occurred. Venue {} could not be listed.",
                    new_venue.name
                ))
                .redirect("/")
        }
    }
}

/// DELETE /venues/:id
///
/// Outcome is reported through a flash message on the venue listing, never
/// through the status code.
pub async fn delete_venue(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    flashes: Flashes,
) -> Response {
    let flashes = match db::delete_venue(&state.db, id).await {
        Ok(Some(name)) => {
            info!("Venue {} ({}) removed", id, name);
            flashes.success(format!("Successfully removed venue {}", name))
        }
        Ok(None) => {
            warn!("Delete requested for missing venue {}", id);
            flashes.error(format!("Could not delete venue {}", id))
        }
        Err(e) => {
            warn!("Failed to delete venue {}: {}", id, e);
            flashes.error(format!("Could not delete venue {}", id))
        }
    };

    flashes.redirect("/venues")
}

/// GET /venues/:id/edit
pub async fn edit_venue(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    flashes: Flashes,
) -> ApiResult<Response> {
    let venue = db::load_venue(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Venue {} not found", id)))?;

    Ok(flashes.render(json!({
        "id": id,
        "form": VenueForm::from_record(&venue),
        "choices": CHOICES,
    })))
}

/// POST /venues/:id/edit
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    flashes: Flashes,
    FormFields(raw): FormFields,
) -> ApiResult<Response> {
    if !db::venue_exists(&state.db, id).await? {
        return Err(ApiError::NotFound(format!("Venue {} not found", id)));
    }

    let edited = match VenueForm::parse(&raw) {
        Ok(venue) => venue,
        Err(invalid) => {
            warn!("Rejected edit of venue {}: {:?}", id, invalid.errors);
            return Ok(flashes.render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "id": id,
                    "form": invalid.form,
                    "errors": invalid.errors,
                    "choices": CHOICES,
                }),
            ));
        }
    };

    let detail_page = format!("/venues/{}", id);
    match db::update_venue(&state.db, id, &edited).await {
        Ok(true) => {
            info!("Venue {} updated", id);
            Ok(flashes
                .success(format!("Successfully updated Venue {}", edited.name))
                .redirect(&detail_page))
        }
        Ok(false) => Err(ApiError::NotFound(format!("Venue {} not found", id))),
        Err(e) => {
            warn!("Failed to update venue {}: {}", id, e);
            Ok(flashes
                .error("Some error encountered. Venue could not be updated")
                .redirect(&detail_page))
        }
    }
}

/// Build venue routes
pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route(
            "/venues/create",
            get(create_venue_form).post(create_venue_submission),
        )
        .route("/venues/:id", get(show_venue).delete(delete_venue))
        .route(
            "/venues/:id/edit",
            get(edit_venue).post(edit_venue_submission),
        )
}
