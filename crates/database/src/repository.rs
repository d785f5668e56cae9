use crate::id_column::{volunteer_id_column, IdColumn};
use crate::reconcile;
use crate::DbError;
use core_types::{
    Donation, DonationFilter, InventoryItem, NewDonation, NewVolunteer, QuantityByResource,
    Volunteer, VolunteerFilter,
};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPool;
use sqlx::FromRow;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
///
/// Each method borrows a pooled connection (or opens a transaction) for its
/// own duration only; the connection goes back to the pool on every exit
/// path, including errors.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// Headcount for the dashboard.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct VolunteerStats {
    pub total: i64,
    pub available: i64,
}

impl VolunteerStats {
    /// Share of volunteers currently available, in percent. Zero when nobody is registered.
    pub fn availability_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.available as f64 / self.total as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct DonationStats {
    pub total_donations: i64,
    pub total_items: i64,
}

/// A donation together with the inventory row it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedDonation {
    pub donation: Donation,
    pub inventory: InventoryItem,
}

/// Headline numbers, latest donations and top resource types for the landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub volunteers: VolunteerStats,
    pub availability_rate: f64,
    pub donations: DonationStats,
    pub recent_donations: Vec<Donation>,
    pub top_resource_types: Vec<QuantityByResource>,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // --- Volunteers ---

    /// Fetches all volunteers ordered by name, then applies `filter`.
    ///
    /// The identifier column is resolved from the live table definition, so
    /// legacy tables keyed by `ID` or `VolunteerID` are read the same way.
    pub async fn list_volunteers(&self, filter: &VolunteerFilter) -> Result<Vec<Volunteer>, DbError> {
        let id_column = volunteer_id_column(&self.pool).await?;
        let query = format!(
            r#"
            SELECT {id}::BIGINT AS id, name, email, phone, skills, availability, emergency_contact
            FROM volunteers
            ORDER BY name
            "#,
            id = id_column.quoted()
        );
        let volunteers = sqlx::query_as::<_, Volunteer>(&query)
            .fetch_all(&self.pool)
            .await?;

        let total = volunteers.len();
        let filtered = filter.apply(volunteers);
        tracing::debug!(total, shown = filtered.len(), "Listed volunteers.");
        Ok(filtered)
    }

    /// Registers a volunteer. Empty name or email is rejected before any write.
    pub async fn insert_volunteer(&self, form: NewVolunteer) -> Result<Volunteer, DbError> {
        let form = form.validate()?;
        let id_column = volunteer_id_column(&self.pool).await?;
        let query = format!(
            r#"
            INSERT INTO volunteers (name, email, phone, skills, availability, emergency_contact)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {id}::BIGINT AS id, name, email, phone, skills, availability, emergency_contact
            "#,
            id = id_column.quoted()
        );
        let volunteer = sqlx::query_as::<_, Volunteer>(&query)
            .bind(&form.name)
            .bind(&form.email)
            .bind(&form.phone)
            .bind(&form.skills)
            .bind(form.availability)
            .bind(&form.emergency_contact)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(volunteer_id = volunteer.id, name = %volunteer.name, "Volunteer registered.");
        Ok(volunteer)
    }

    /// Sets a volunteer's availability. An unknown id is a no-op; returns rows affected.
    pub async fn update_volunteer_availability(&self, id: i64, availability: bool) -> Result<u64, DbError> {
        let id_column = volunteer_id_column(&self.pool).await?;
        let query = format!(
            "UPDATE volunteers SET availability = $1 WHERE {} = $2",
            id_column.quoted()
        );
        let result = sqlx::query(&query)
            .bind(availability)
            .bind(id)
            .execute(&self.pool)
            .await?;

        log_noop(&id_column, id, result.rows_affected(), "update");
        Ok(result.rows_affected())
    }

    /// Permanently removes a volunteer. An unknown id is a no-op; returns rows affected.
    pub async fn delete_volunteer(&self, id: i64) -> Result<u64, DbError> {
        let id_column = volunteer_id_column(&self.pool).await?;
        let query = format!("DELETE FROM volunteers WHERE {} = $1", id_column.quoted());
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;

        log_noop(&id_column, id, result.rows_affected(), "delete");
        Ok(result.rows_affected())
    }

    /// Total and currently-available volunteer counts.
    pub async fn volunteer_stats(&self) -> Result<VolunteerStats, DbError> {
        let stats = sqlx::query_as::<_, VolunteerStats>(
            r#"
            SELECT COUNT(*) AS total, COUNT(*) FILTER (WHERE availability) AS available
            FROM volunteers
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    // --- Donations ---

    /// Records a donation dated today and folds it into the inventory.
    ///
    /// The donation insert and the inventory upsert share one transaction:
    /// if reconciliation fails the donation is rolled back too.
    pub async fn insert_donation(&self, form: NewDonation) -> Result<RecordedDonation, DbError> {
        let form = form.validate()?;
        let mut tx = self.pool.begin().await?;

        let donation = sqlx::query_as::<_, Donation>(
            r#"
            INSERT INTO donations (donor_name, resource_type, quantity, donation_date)
            VALUES ($1, $2, $3, CURRENT_DATE)
            RETURNING id, donor_name, resource_type, quantity, donation_date
            "#,
        )
        .bind(&form.donor_name)
        .bind(&form.resource_type)
        .bind(form.quantity)
        .fetch_one(&mut *tx)
        .await?;

        let inventory =
            reconcile::apply_donation(&mut *tx, &donation.resource_type, donation.quantity).await?;

        tx.commit().await?;

        tracing::info!(
            donation_id = donation.id,
            donor = %donation.donor_name,
            resource_type = %donation.resource_type,
            quantity = donation.quantity,
            quantity_available = inventory.quantity_available,
            "Donation recorded."
        );
        Ok(RecordedDonation { donation, inventory })
    }

    /// Fetches all donations, newest first, then applies `filter`.
    pub async fn list_donations(&self, filter: &DonationFilter) -> Result<Vec<Donation>, DbError> {
        let donations = sqlx::query_as::<_, Donation>(
            r#"
            SELECT id, donor_name, resource_type, quantity, donation_date
            FROM donations
            ORDER BY donation_date DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(filter.apply(donations))
    }

    /// The `limit` most recent donations.
    pub async fn recent_donations(&self, limit: i64) -> Result<Vec<Donation>, DbError> {
        let donations = sqlx::query_as::<_, Donation>(
            r#"
            SELECT id, donor_name, resource_type, quantity, donation_date
            FROM donations
            ORDER BY donation_date DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(donations)
    }

    /// Resource types ranked by total quantity donated.
    pub async fn top_resource_types(&self, limit: i64) -> Result<Vec<QuantityByResource>, DbError> {
        let rows = sqlx::query_as::<_, QuantityByResource>(
            r#"
            SELECT resource_type, SUM(quantity)::BIGINT AS quantity
            FROM donations
            GROUP BY resource_type
            ORDER BY quantity DESC, resource_type
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn donation_stats(&self) -> Result<DonationStats, DbError> {
        let stats = sqlx::query_as::<_, DonationStats>(
            r#"
            SELECT COUNT(*) AS total_donations, COALESCE(SUM(quantity), 0)::BIGINT AS total_items
            FROM donations
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    // --- Inventory ---

    /// All inventory rows ordered by item name.
    pub async fn list_inventory(&self) -> Result<Vec<InventoryItem>, DbError> {
        let items = sqlx::query_as::<_, InventoryItem>(
            "SELECT id, item_name, quantity_available FROM inventory ORDER BY item_name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Inventory rows with fewer than `threshold` units, ordered by item name.
    pub async fn low_stock(&self, threshold: i32) -> Result<Vec<InventoryItem>, DbError> {
        let items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, item_name, quantity_available
            FROM inventory
            WHERE quantity_available < $1
            ORDER BY item_name
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    // --- Dashboard ---

    /// Everything the landing page shows, fetched concurrently.
    pub async fn dashboard(&self, recent_limit: i64, top_limit: i64) -> Result<DashboardSnapshot, DbError> {
        let (volunteers, donations, recent, top) = tokio::join!(
            self.volunteer_stats(),
            self.donation_stats(),
            self.recent_donations(recent_limit),
            self.top_resource_types(top_limit),
        );
        let volunteers = volunteers?;

        Ok(DashboardSnapshot {
            availability_rate: volunteers.availability_rate(),
            volunteers,
            donations: donations?,
            recent_donations: recent?,
            top_resource_types: top?,
        })
    }
}

fn log_noop(id_column: &IdColumn, id: i64, rows_affected: u64, action: &str) {
    if rows_affected == 0 {
        tracing::debug!(column = id_column.name(), id, action, "No volunteer matched; nothing changed.");
    } else {
        tracing::info!(id, action, "Volunteer record changed.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_rate_handles_empty_directory() {
        let stats = VolunteerStats { total: 0, available: 0 };
        assert_eq!(stats.availability_rate(), 0.0);
    }

    #[test]
    fn availability_rate_is_a_percentage() {
        let stats = VolunteerStats { total: 8, available: 6 };
        assert!((stats.availability_rate() - 75.0).abs() < f64::EPSILON);
    }
}
