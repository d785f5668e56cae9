use core_types::ValidationError;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Failures surfaced by the data-access layer. Nothing is retried.
///
/// An update or delete that matches no row is not an error: those
/// operations report zero affected rows and return `Ok`.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load environment variables for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The store is unreachable or the statement failed at the driver level.
    #[error("Database operation failed: {0}")]
    Connectivity(#[source] sqlx::Error),

    /// A write violated a store-level constraint (unique, check, foreign key,
    /// not null) or pushed a value out of its column's numeric range.
    #[error("Constraint violation: {0}")]
    Integrity(#[source] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// The table the operation needs is missing or has no columns.
    #[error("Unexpected schema: {0}")]
    Schema(String),
}

/// SQLSTATE `numeric_value_out_of_range`, e.g. an inventory total past `i32::MAX`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let is_constraint = err.as_database_error().is_some_and(|db_err| {
            matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) || db_err.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE)
        });
        if is_constraint {
            DbError::Integrity(err)
        } else {
            DbError::Connectivity(err)
        }
    }
}

impl DbError {
    pub fn is_validation(&self) -> bool {
        matches!(self, DbError::Validation(_))
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, DbError::Integrity(_))
    }
}
