//! Artist pages and form submissions

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
use crate::forms::{ArtistForm, CHOICES};
use crate::{db, query, AppState};

/// GET /artists
pub async fn list_artists(State(state): State<AppState>, flashes: Flashes) -> ApiResult<Response> {
    let artists = query::list_artists(&state.db).await?;
    Ok(flashes.render(json!({ "artists": artists })))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    flashes: Flashes,
    FormFields(raw): FormFields,
) -> ApiResult<Response> {
    let search_term = raw.values("search_term").first().copied().unwrap_or("").to_string();

    let results = query::search_artists(&state.db, &search_term, time::now()).await?;

    Ok(flashes.render(json!({
        "results": results,
        "search_term": search_term,
    })))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    flashes: Flashes,
) -> ApiResult<Response> {
    let artist = query::artist_detail(&state.db, id, time::now())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Artist {} not found", id)))?;

    Ok(flashes.render(json!({ "artist": artist })))
}

/// GET /artists/create
pub async fn create_artist_form(flashes: Flashes) -> Response {
    flashes.render(json!({
        "form": ArtistForm::default(),
        "choices": CHOICES,
    }))
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<AppState>,
    flashes: Flashes,
    FormFields(raw): FormFields,
) -> Response {
    let new_artist = match ArtistForm::parse(&raw) {
        Ok(artist) => artist,
        Err(invalid) => {
            warn!("Rejected artist submission: {:?}", invalid.errors);
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

    match db::insert_artist(&state.db, &new_artist).await {
        Ok(id) => {
            info!("Artist {} listed as {}", new_artist.name, id);
            flashes
                .success(format!("Artist {} was successfully listed!", new_artist.name))
                .redirect(&format!("/artists/{}", id))
        }
        Err(e) => {
            warn!("Failed to list artist {}: {}", new_artist.name, e);
            flashes
                .error(format!(
                    "An error occurred. Artist {} could not be listed.",
                    new_artist.name
                ))
                .redirect("/")
        }
    }
}

/// GET /artists/:id/edit
pub async fn edit_artist(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    flashes: Flashes,
) -> ApiResult<Response> {
    let artist = db::load_artist(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Artist {} not found", id)))?;

    Ok(flashes.render(json!({
        "id": id,
        "form": ArtistForm::from_record(&artist),
        "choices": CHOICES,
    })))
}

/// POST /artists/:id/edit
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    flashes: Flashes,
    FormFields(raw): FormFields,
) -> ApiResult<Response> {
    if !db::artist_exists(&state.db, id).await? {
        return Err(ApiError::NotFound(format!("Artist {} not found", id)));
    }

    let edited = match ArtistForm::parse(&raw) {
        Ok(artist) => artist,
        Err(invalid) => {
            warn!("Rejected edit of artist {}: {:?}", id, invalid.errors);
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

    let detail_page = format!("/artists/{}", id);
    match db::update_artist(&state.db, id, &edited).await {
        Ok(true) => {
            info!("Artist {} updated", id);
            Ok(flashes
                .success(format!("Successfully updated Artist {}", edited.name))
                .redirect(&detail_page))
        }
        Ok(false) => Err(ApiError::NotFound(format!("Artist {} not found", id))),
        Err(e) => {
            warn!("Failed to update artist {}: {}", id, e);
            Ok(flashes
                .error("Some error encountered. Artist could not be updated")
                .redirect(&detail_page))
        }
    }
}

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route(
            "/artists/create",
            get(create_artist_form).post(create_artist_submission),
        )
        .route("/artists/:id", get(show_artist))
        .route(
            "/artists/:id/edit",
            get(edit_artist).post(edit_artist_submission),
        )
}
