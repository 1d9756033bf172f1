//! # polyglot-store
//!
//! Content stores for Polyglot: SQLite-backed for deployments, in-memory for
//! tests and embedding.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
