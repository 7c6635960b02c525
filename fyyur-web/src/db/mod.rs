//! Persistence for venues, artists and shows
//!
//! Every mutation runs in its own transaction: `commit()` on success, and the
//! transaction guard rolls back when dropped on any early `?` return.

pub mod artists;
pub mod shows;
pub mod venues;

pub use artists::{artist_exists, insert_artist, load_artist, update_artist};
pub use shows::{insert_show, load_show, update_show};
pub use venues::{delete_venue, insert_venue, load_venue, update_venue, venue_exists};
