//! # Fyyur Common Library
//!
//! Shared code for the Fyyur booking directory:
//! - Database initialization and record models
//! - Genre normalization
//! - Configuration loading
//! - Timestamp helpers

pub mod config;
pub mod db;
pub mod error;
pub mod genres;
pub mod time;

pub use error::{Error, Result};
pub use genres::Genres;
