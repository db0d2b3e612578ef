//! Attestation lookup handlers
//!
//! Read-only lookups. Absence is not an error: an unregistered hash reads
//! as the zero tuple (timestamp 0, zero owner, zero commitment), and
//! callers distinguish "absent" via the `verified` flag.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::parse_word;

/// Full attestation record for a photo hash
#[derive(Serialize, ToSchema)]
pub struct AttestationResponse {
    /// The queried photo hash (hex, 0x-prefixed)
    pub photo_hash: String,
    /// Ledger timestamp (Unix epoch milliseconds); 0 when absent
    pub verified_at: u64,
    /// Owner address (hex, 0x-prefixed); zero address when absent
    pub owner: String,
    /// Stored commitment (hex, 0x-prefixed); zero when absent
    pub commitment: String,
    /// Whether a record exists
    pub verified: bool,
}

/// Verification flag for a photo hash
#[derive(Serialize, ToSchema)]
pub struct VerifiedResponse {
    /// The queried photo hash (hex, 0x-prefixed)
    pub photo_hash: String,
    /// Whether a record exists
    pub verified: bool,
}

/// Owner of a photo hash
#[derive(Serialize, ToSchema)]
pub struct OwnerResponse {
    /// The queried photo hash (hex, 0x-prefixed)
    pub photo_hash: String,
    /// Owner address (hex, 0x-prefixed); zero address when absent
    pub owner: String,
}

/// Get the attestation record for a photo hash
///
/// Pure lookup; returns the zero tuple for an unregistered hash rather
/// than a 404.
#[utoipa::path(
    get,
    path = "/attestations/{hash}",
    tag = "Lookup",
    params(
        ("hash" = String, Path, description = "Photo hash (hex, 32 bytes)")
    ),
    responses(
        (status = 200, description = "Attestation record (zeros when absent)", body = AttestationResponse),
        (status = 400, description = "Malformed photo hash")
    )
)]
pub async fn get_attestation_handler(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<AttestationResponse>, ApiError> {
    let photo_hash = parse_word("photo_hash", &hash)?;
    let record = state.registry.get_attestation(&photo_hash).await?;

    Ok(Json(AttestationResponse {
        photo_hash: photo_hash.to_string(),
        verified_at: record.verified_at,
        owner: record.owner.to_string(),
        commitment: record.commitment.to_string(),
        verified: record.is_present(),
    }))
}

/// Check whether a photo hash is registered
#[utoipa::path(
    get,
    path = "/attestations/{hash}/verified",
    tag = "Lookup",
    params(
        ("hash" = String, Path, description = "Photo hash (hex, 32 bytes)")
    ),
    responses(
        (status = 200, description = "Verification flag", body = VerifiedResponse),
        (status = 400, description = "Malformed photo hash")
    )
)]
pub async fn is_verified_handler(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<VerifiedResponse>, ApiError> {
    let photo_hash = parse_word("photo_hash", &hash)?;
    let verified = state.registry.is_verified(&photo_hash).await?;

    Ok(Json(VerifiedResponse {
        photo_hash: photo_hash.to_string(),
        verified,
    }))
}

/// Get the owner of a photo hash
#[utoipa::path(
    get,
    path = "/attestations/{hash}/owner",
    tag = "Lookup",
    params(
        ("hash" = String, Path, description = "Photo hash (hex, 32 bytes)")
    ),
    responses(
        (status = 200, description = "Owner address (zero address when absent)", body = OwnerResponse),
        (status = 400, description = "Malformed photo hash")
    )
)]
pub async fn get_owner_handler(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Json<OwnerResponse>, ApiError> {
    let photo_hash = parse_word("photo_hash", &hash)?;
    let owner = state.registry.get_owner_of(&photo_hash).await?;

    Ok(Json(OwnerResponse {
        photo_hash: photo_hash.to_string(),
        owner: owner.to_string(),
    }))
}
