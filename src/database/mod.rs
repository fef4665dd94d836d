//! SQLite persistence for SelectionsSaver.
//!
//! Holds the connection wrapper and the versioned schema migrations behind
//! the durable state store.
//!
//! ```no_run
//! use selectionsaver::database::Database;
//!
//! let db = Database::open("selectionssaver.db").expect("failed to open database");
//! let scratch = Database::open_in_memory().expect("failed to open in-memory database");
//! # let _ = (db, scratch);
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
