//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and joined views
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: the pooled `Storage` handle, users and ownership lookups
//! - `internships.rs`, `applications.rs`: the remaining queries, as `Storage` methods

mod applications;
mod internships;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, Storage};
