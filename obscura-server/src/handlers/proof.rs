//! Ownership proof handler
//!
//! Handles POST /attestations/{hash}/proof requests. The secret travels in
//! the request body, never in a URL, so it does not end up in access logs
//! or proxies' request lines. Note the protocol itself still reveals the
//! secret to the registry and any observer of the call; that trade-off is
//! inherent to the hash-commitment scheme.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::parse_word;

/// Request body for an ownership proof
#[derive(Deserialize, ToSchema)]
pub struct ProofRequest {
    /// The revealed secret (hex, 32 bytes)
    #[schema(example = "1111111111111111111111111111111111111111111111111111111111111111")]
    pub secret: String,
}

/// Outcome of an ownership proof
#[derive(Serialize, ToSchema)]
pub struct ProofResponse {
    /// The queried photo hash (hex, 0x-prefixed)
    pub photo_hash: String,
    /// Whether the secret opens the stored commitment
    pub valid: bool,
}

/// Check an ownership proof for a photo hash
///
/// Recomputes `keccak256(photo_hash ‖ secret)` and compares it against the
/// stored commitment. A mismatch (or an absent record) yields `valid:
/// false` with status 200: proof failure is a first-class outcome, not an
/// error, and the call never mutates state, so third parties may repeat it
/// freely.
#[utoipa::path(
    post,
    path = "/attestations/{hash}/proof",
    tag = "Proof",
    params(
        ("hash" = String, Path, description = "Photo hash (hex, 32 bytes)")
    ),
    request_body = ProofRequest,
    responses(
        (status = 200, description = "Proof outcome", body = ProofResponse),
        (status = 400, description = "Malformed photo hash or secret")
    )
)]
pub async fn verify_proof_handler(
    State(state): State<AppState>,
    Path(hash): Path<String>,
    Json(request): Json<ProofRequest>,
) -> Result<Json<ProofResponse>, ApiError> {
    let photo_hash = parse_word("photo_hash", &hash)?;
    let secret = parse_word("secret", &request.secret)?;

    let valid = state.registry.verify_proof(&photo_hash, &secret).await?;

    tracing::debug!(photo_hash = %photo_hash, valid, "Ownership proof checked");

    Ok(Json(ProofResponse {
        photo_hash: photo_hash.to_string(),
        valid,
    }))
}
