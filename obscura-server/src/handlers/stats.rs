//! Counter handlers
//!
//! Pure counters over the registry population.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::parse_owner;

/// Global attestation count
#[derive(Serialize, ToSchema)]
pub struct CountResponse {
    /// Total number of registered photo hashes
    pub count: u64,
}

/// Per-owner attestation count
#[derive(Serialize, ToSchema)]
pub struct OwnerCountResponse {
    /// The queried owner address (hex, 0x-prefixed)
    pub owner: String,
    /// Number of photo hashes registered by this owner
    pub count: u64,
}

/// Get the total number of registered photo hashes
#[utoipa::path(
    get,
    path = "/attestations/count",
    tag = "Counters",
    responses(
        (status = 200, description = "Global attestation count", body = CountResponse)
    )
)]
pub async fn photo_count_handler(
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = state.registry.photo_count().await?;
    Ok(Json(CountResponse { count }))
}

/// Get the number of photo hashes registered by an owner
#[utoipa::path(
    get,
    path = "/owners/{owner}/count",
    tag = "Counters",
    params(
        ("owner" = String, Path, description = "Owner address (hex, 20 bytes)")
    ),
    responses(
        (status = 200, description = "Per-owner attestation count", body = OwnerCountResponse),
        (status = 400, description = "Malformed owner address")
    )
)]
pub async fn owner_count_handler(
    State(state): State<AppState>,
    Path(owner): Path<String>,
) -> Result<Json<OwnerCountResponse>, ApiError> {
    let owner = parse_owner("owner", &owner)?;
    let count = state.registry.owner_photo_count(&owner).await?;

    Ok(Json(OwnerCountResponse {
        owner: owner.to_string(),
        count,
    }))
}
