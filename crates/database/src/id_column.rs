//! Resolution of the volunteer table's identifier column.
//!
//! Deployments created before the bundled migration used several names for
//! the volunteer key. The column is therefore picked at runtime from the
//! table's declared columns, with precedence `ID`, `VolunteerID`,
//! `volunteer_id`, and finally whichever column is declared first.
//!
//! The resolved name is only ever spliced into SQL as a quoted identifier;
//! values always travel as bind parameters.

use crate::error::DbError;
use sqlx::PgPool;

/// The identifier column of the `volunteers` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdColumn {
    Id,
    VolunteerId,
    VolunteerIdSnake,
    /// None of the known names exist; the first declared column is used.
    FirstColumn(String),
}

impl IdColumn {
    const PRECEDENCE: [(&'static str, IdColumn); 3] = [
        ("ID", IdColumn::Id),
        ("VolunteerID", IdColumn::VolunteerId),
        ("volunteer_id", IdColumn::VolunteerIdSnake),
    ];

    /// Picks the identifier from column names given in declared order.
    ///
    /// Matching is exact and case-sensitive. Returns `None` for a table with no columns.
    pub fn resolve<S: AsRef<str>>(columns: &[S]) -> Option<Self> {
        for (name, column) in Self::PRECEDENCE {
            if columns.iter().any(|c| c.as_ref() == name) {
                return Some(column);
            }
        }
        columns
            .first()
            .map(|c| IdColumn::FirstColumn(c.as_ref().to_string()))
    }

    pub fn name(&self) -> &str {
        match self {
            IdColumn::Id => "ID",
            IdColumn::VolunteerId => "VolunteerID",
            IdColumn::VolunteerIdSnake => "volunteer_id",
            IdColumn::FirstColumn(name) => name,
        }
    }

    /// The column as a double-quoted SQL identifier, with embedded quotes doubled.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.name().replace('"', "\"\""))
    }
}

/// Reads the declared column names of `volunteers` and resolves its identifier column.
pub async fn volunteer_id_column(pool: &PgPool) -> Result<IdColumn, DbError> {
    let columns: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT column_name::TEXT
        FROM information_schema.columns
        WHERE table_schema = current_schema() AND table_name = 'volunteers'
        ORDER BY ordinal_position
        "#,
    )
    .fetch_all(pool)
    .await?;

    let column = IdColumn::resolve(&columns)
        .ok_or_else(|| DbError::Schema("table 'volunteers' has no columns".to_string()))?;
    tracing::debug!(column = column.name(), "Resolved volunteer identifier column.");
    Ok(column)
}
