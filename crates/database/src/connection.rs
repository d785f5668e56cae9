use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::env;
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database.
///
/// The URL comes from `settings.url` when set, otherwise from `DATABASE_URL`
/// (a `.env` file is read if present). The pool is created once per process
/// and every repository operation borrows a connection from it for the
/// duration of that single operation.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let database_url = database_url(settings)?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect(&database_url)
        .await?;

    tracing::info!(max_connections = settings.max_connections, "Database pool established.");
    Ok(pool)
}

fn database_url(settings: &DatabaseSettings) -> Result<String, DbError> {
    if let Some(url) = settings.url.as_ref().filter(|u| !u.is_empty()) {
        return Ok(url.clone());
    }
    // A missing .env file is fine as long as DATABASE_URL is in the environment.
    dotenvy::dotenv().ok();
    env::var("DATABASE_URL").map_err(|_e| {
        DbError::ConnectionConfigError("DATABASE_URL must be set.".to_string())
    })
}

/// Applies the bundled migrations, creating the three tables if needed.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Round-trips a trivial query to prove the store is reachable.
pub async fn check_connection(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_url_wins_over_environment() {
        let settings = DatabaseSettings {
            url: Some("postgres://hub:hub@db:5432/hub".to_string()),
            ..Default::default()
        };
        assert_eq!(database_url(&settings).unwrap(), "postgres://hub:hub@db:5432/hub");
    }
}
