//! Analysis Stores
//!
//! Implementations of [`roaster_core::AnalysisStore`]: a SQLite file store for
//! the service and an in-memory store for tests and one-shot CLI runs.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
