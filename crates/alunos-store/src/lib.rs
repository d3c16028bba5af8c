// ABOUTME: Persistence layer for alunos, storing student records in a single SQLite table.
// ABOUTME: Creates the schema on open and runs one parameterized statement per operation.

pub mod sqlite;

pub use sqlite::{StoreError, StudentStore};
