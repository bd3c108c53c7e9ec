//! issue-tracker/crates/storage-adapters/src/lib.rs
//!
//! `IssueStore` implementations. The in-memory store is always compiled;
//! SQLite persistence sits behind the `db-sqlite` feature so the binary
//! can be built to order.

pub mod memory;

#[cfg(feature = "db-sqlite")]
pub mod sqlite;

pub use memory::MemoryIssueStore;

#[cfg(feature = "db-sqlite")]
pub use sqlite::SqliteIssueStore;
