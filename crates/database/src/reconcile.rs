use crate::error::DbError;
use core_types::InventoryItem;
use sqlx::PgConnection;

/// Applies a donation to the inventory: increments the row whose `item_name`
/// equals `resource_type` exactly, or creates it with `quantity` if absent.
///
/// This is one `INSERT .. ON CONFLICT` statement against the unique
/// `item_name` key, so two first-time donations of the same resource type
/// can never produce two rows. Callers run it on the transaction that
/// inserted the donation, which makes the pair all-or-nothing.
pub async fn apply_donation(
    conn: &mut PgConnection,
    resource_type: &str,
    quantity: i32,
) -> Result<InventoryItem, DbError> {
    let item = sqlx::query_as::<_, InventoryItem>(
        r#"
        INSERT INTO inventory (item_name, quantity_available)
        VALUES ($1, $2)
        ON CONFLICT (item_name)
        DO UPDATE SET quantity_available = inventory.quantity_available + EXCLUDED.quantity_available
        RETURNING id, item_name, quantity_available
        "#,
    )
    .bind(resource_type)
    .bind(quantity)
    .fetch_one(conn)
    .await?;

    tracing::debug!(
        item_name = %item.item_name,
        added = quantity,
        quantity_available = item.quantity_available,
        "Inventory reconciled."
    );
    Ok(item)
}
