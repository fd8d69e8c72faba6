//! Database abstraction for vidrec
//!
//! Simple SQLite wrapper for basic database operations. The store layer
//! owns the connection and defines the schema; this module only handles
//! opening and raw access.
//!
//! # Example
//! ```no_run
//! use vidrec::db::SqliteDatabase;
//!
//! let db = SqliteDatabase::open("recommendations.db")?;
//! db.execute("CREATE TABLE test (id INTEGER)", &[])?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod sqlite;
pub mod vectors;

pub use sqlite::SqliteDatabase;
pub use vectors::{bytes_to_vector, vector_to_bytes};
