//! # NGO Hub Database Crate
//!
//! This crate is the data-access layer for volunteers, donations and the
//! inventory derived from donations, backed by PostgreSQL.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The web server and CLI only see typed
//!   records and `DbError`.
//! - **Atomic reconciliation:** Logging a donation and updating the matching
//!   inventory row happen in one transaction, via a single upsert on the
//!   unique item name.
//! - **Asynchronous & Pooled:** All operations are asynchronous and borrow a
//!   connection from a process-wide `PgPool` for their own duration.
//!
//! ## Public API
//!
//! - `connect`: Builds the connection pool from `DatabaseSettings`.
//! - `run_migrations`: Applies the bundled schema.
//! - `DbRepository`: The volunteer, donation and inventory operations.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod id_column;
pub mod reconcile;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{check_connection, connect, run_migrations};
pub use error::DbError;
pub use id_column::IdColumn;
pub use repository::{DashboardSnapshot, DbRepository, DonationStats, RecordedDonation, VolunteerStats};
