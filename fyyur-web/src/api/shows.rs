//! Show listing and booking forms

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use fyyur_common::db::NewShow;
use fyyur_common::time;
use serde_json::json;
use sqlx::SqlitePool;
use tracing::{info, warn};

use super::{EntityId, FormFields};
use crate::error::{ApiError, ApiResult};
use crate::flash::Flashes;
use crate::forms::{FieldErrors, Invalid, RawForm, ShowForm};
use crate::{db, query, AppState};

/// GET /shows
pub async fn list_shows(State(state): State<AppState>, flashes: Flashes) -> ApiResult<Response> {
    let shows = query::list_shows(&state.db).await?;
    Ok(flashes.render(json!({ "shows": shows })))
}

/// GET /shows/create
pub async fn create_show_form(flashes: Flashes) -> Response {
    flashes.render(json!({ "form": ShowForm::starting_at(time::now()) }))
}

/// POST /shows/create
pub async fn create_show_submission(
    State(state): State<AppState>,
    flashes: Flashes,
    FormFields(raw): FormFields,
) -> ApiResult<Response> {
    let new_show = match parse_show(&state.db, &raw).await? {
        Ok(show) => show,
        Err(invalid) => {
            warn!("Rejected show submission: {:?}", invalid.errors);
            return Ok(flashes.render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "form": invalid.form, "errors": invalid.errors }),
            ));
        }
    };

    match db::insert_show(&state.db, &new_show).await {
        Ok(id) => {
            info!(
                "Show {} listed: artist {} at venue {}",
                id, new_show.artist_id, new_show.venue_id
            );
            Ok(flashes.success("Show was successfully listed!").redirect("/shows"))
        }
        Err(e) => {
            warn!("Failed to list show: {}", e);
            Ok(flashes
                .error("Some error encountered! Show was not listed!")
                .redirect("/"))
        }
    }
}

/// GET /shows/:id/edit
pub async fn edit_show(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    flashes: Flashes,
) -> ApiResult<Response> {
    let show = db::load_show(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Show {} not found", id)))?;

    Ok(flashes.render(json!({
        "id": id,
        "form": ShowForm::from_record(&show),
    })))
}

/// POST /shows/:id/edit
pub async fn edit_show_submission(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    flashes: Flashes,
    FormFields(raw): FormFields,
) -> ApiResult<Response> {
    if db::load_show(&state.db, id).await?.is_none() {
        return Err(ApiError::NotFound(format!("Show {} not found", id)));
    }

    let edited = match parse_show(&state.db, &raw).await? {
        Ok(show) => show,
        Err(invalid) => {
            warn!("Rejected edit of show {}: {:?}", id, invalid.errors);
            return Ok(flashes.render_with_status(
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "id": id, "form": invalid.form, "errors": invalid.errors }),
            ));
        }
    };

    match db::update_show(&state.db, id, &edited).await {
        Ok(true) => {
            info!("Show {} updated", id);
            Ok(flashes.success("Successfully updated Show").redirect("/shows"))
        }
        Ok(false) => Err(ApiError::NotFound(format!("Show {} not found", id))),
        Err(e) => {
            warn!("Failed to update show {}: {}", id, e);
            Ok(flashes
                .error("Some error encountered. Show could not be updated")
                .redirect("/shows"))
        }
    }
}

/// Field rules plus a lookup of the referenced venue and artist
async fn parse_show(
    pool: &SqlitePool,
    raw: &RawForm,
) -> ApiResult<Result<NewShow, Invalid<ShowForm>>> {
    let show = match ShowForm::parse(raw) {
        Ok(show) => show,
        Err(invalid) => return Ok(Err(invalid)),
    };

    let mut errors = FieldErrors::default();
    if !db::venue_exists(pool, show.venue_id).await? {
        errors.add("venue_id", "Venue does not exist.");
    }
    if !db::artist_exists(pool, show.artist_id).await? {
        errors.add("artist_id", "Artist does not exist.");
    }

    if errors.is_empty() {
        Ok(Ok(show))
    } else {
        Ok(Err(Invalid {
            form: ShowForm::echo(raw),
            errors,
        }))
    }
}

/// Build show routes
pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route(
            "/shows/create",
            get(create_show_form).post(create_show_submission),
        )
        .route("/shows/:id/edit", get(edit_show).post(edit_show_submission))
}
