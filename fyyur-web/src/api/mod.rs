//! HTTP handlers for fyyur-web

pub mod artists;
pub mod errors;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

pub use artists::artist_routes;
pub use errors::{not_found, panic_response, EntityId, FormFields};
pub use health::health_routes;
pub use home::home;
pub use shows::show_routes;
pub use venues::venue_routes;
