use crate::structs::{Donation, InventoryItem};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct QuantityByResource {
    pub resource_type: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityByDate {
    pub date: NaiveDate,
    pub quantity: i64,
}

/// Headline metrics and chart series for a (possibly filtered) donation list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationSummary {
    pub total_donations: usize,
    pub total_items: i64,
    pub unique_donors: usize,
    pub resource_types: usize,
    /// Sorted by resource type.
    pub by_resource: Vec<QuantityByResource>,
    /// Sorted by date, oldest first.
    pub by_date: Vec<QuantityByDate>,
}

impl DonationSummary {
    pub fn from_donations(donations: &[Donation]) -> Self {
        let mut by_resource: BTreeMap<&str, i64> = BTreeMap::new();
        let mut by_date: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        let mut donors = HashSet::new();

        for d in donations {
            *by_resource.entry(d.resource_type.as_str()).or_default() += i64::from(d.quantity);
            *by_date.entry(d.donation_date).or_default() += i64::from(d.quantity);
            donors.insert(d.donor_name.as_str());
        }

        Self {
            total_donations: donations.len(),
            total_items: by_resource.values().sum(),
            unique_donors: donors.len(),
            resource_types: by_resource.len(),
            by_resource: by_resource
                .into_iter()
                .map(|(resource_type, quantity)| QuantityByResource {
                    resource_type: resource_type.to_string(),
                    quantity,
                })
                .collect(),
            by_date: by_date
                .into_iter()
                .map(|(date, quantity)| QuantityByDate { date, quantity })
                .collect(),
        }
    }
}

/// Stock metrics for the inventory page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub item_types: usize,
    pub total_stock: i64,
    /// Items strictly below the low-stock threshold, in list order.
    pub low_stock: Vec<InventoryItem>,
}

impl InventorySummary {
    pub fn from_items(items: &[InventoryItem], low_stock_threshold: i32) -> Self {
        Self {
            item_types: items.len(),
            total_stock: items.iter().map(|i| i64::from(i.quantity_available)).sum(),
            low_stock: items
                .iter()
                .filter(|i| i.quantity_available < low_stock_threshold)
                .cloned()
                .collect(),
        }
    }
}
