use crate::{error::AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    Json,
};
use core_types::{
    Donation, DonationFilter, DonationSummary, InventoryItem, InventorySummary, NewDonation,
    NewVolunteer, ResourceCategory, Volunteer, VolunteerFilter,
};
use database::{DashboardSnapshot, RecordedDonation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// The landing page shows the five latest donations and the five biggest resource types.
const DASHBOARD_RECENT: i64 = 5;
const DASHBOARD_TOP: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct AvailabilityUpdate {
    pub availability: bool,
}

/// Result of an update or delete. Zero rows affected is still a success.
#[derive(Debug, Serialize)]
pub struct MutationResult {
    pub rows_affected: u64,
}

#[derive(Debug, Serialize)]
pub struct DonationHistory {
    pub donations: Vec<Donation>,
    pub summary: DonationSummary,
}

#[derive(Debug, Serialize)]
pub struct InventoryOverview {
    pub items: Vec<InventoryItem>,
    pub summary: InventorySummary,
}

/// # GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardSnapshot>, AppError> {
    let snapshot = state.db_repo.dashboard(DASHBOARD_RECENT, DASHBOARD_TOP).await?;
    Ok(Json(snapshot))
}

/// # GET /api/volunteers?availability=&search=
pub async fn list_volunteers(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<VolunteerFilter>,
) -> Result<Json<Vec<Volunteer>>, AppError> {
    let volunteers = state.db_repo.list_volunteers(&filter).await?;
    Ok(Json(volunteers))
}

/// # POST /api/volunteers
pub async fn create_volunteer(
    State(state): State<Arc<AppState>>,
    Json(form): Json<NewVolunteer>,
) -> Result<(StatusCode, Json<Volunteer>), AppError> {
    let volunteer = state.db_repo.insert_volunteer(form).await?;
    Ok((StatusCode::CREATED, Json(volunteer)))
}

/// # PATCH /api/volunteers/:id/availability
pub async fn update_volunteer_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<AvailabilityUpdate>,
) -> Result<Json<MutationResult>, AppError> {
    let rows_affected = state
        .db_repo
        .update_volunteer_availability(id, update.availability)
        .await?;
    Ok(Json(MutationResult { rows_affected }))
}

/// # DELETE /api/volunteers/:id
pub async fn delete_volunteer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<MutationResult>, AppError> {
    let rows_affected = state.db_repo.delete_volunteer(id).await?;
    Ok(Json(MutationResult { rows_affected }))
}

/// # GET /api/donations?resource_type=&donor=&from=&to=
/// The summary describes the filtered list, matching what the history page charts.
pub async fn list_donations(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<DonationFilter>,
) -> Result<Json<DonationHistory>, AppError> {
    let donations = state.db_repo.list_donations(&filter).await?;
    let summary = DonationSummary::from_donations(&donations);
    Ok(Json(DonationHistory { donations, summary }))
}

/// # POST /api/donations
pub async fn create_donation(
    State(state): State<Arc<AppState>>,
    Json(form): Json<NewDonation>,
) -> Result<(StatusCode, Json<RecordedDonation>), AppError> {
    let recorded = state.db_repo.insert_donation(form).await?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

/// # GET /api/inventory
pub async fn get_inventory(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InventoryOverview>, AppError> {
    let items = state.db_repo.list_inventory().await?;
    let summary = InventorySummary::from_items(&items, state.low_stock_threshold);
    Ok(Json(InventoryOverview { items, summary }))
}

/// # GET /api/resource-types
pub async fn list_resource_types() -> Json<Vec<&'static str>> {
    Json(ResourceCategory::ALL.iter().map(|c| c.as_str()).collect())
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
