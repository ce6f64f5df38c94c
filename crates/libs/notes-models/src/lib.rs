//! Database models and ORM layer for the notes service.
//!
//! Provides the Diesel schema, embedded migrations, the SQLite connection pool
//! and the `User` / `Note` models.
//!
//! # Usage
//!
//! ```rust,no_run
//! use notes_models::db::{config::DbConfig, connection::DbConnection};
//! use notes_models::note::Note;
//!
//! let conn = DbConnection::new(&DbConfig::new("notes.db"))
//!     .and_then(DbConnection::setup)
//!     .unwrap();
//! let notes = Note::fetch_by_owner(1, &conn).unwrap();
//! println!("Found {} notes", notes.len());
//! ```

pub mod db;
pub mod error;
pub mod note;
pub mod prelude;
mod schema;
pub mod user;
