//! Registration handler
//!
//! Handles POST /attestations requests to bind a photo hash to the caller
//! with a commitment.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::CallerIdentity;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::parse_word;

/// Request body for registration
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Content hash of the photo (hex, 32 bytes)
    #[schema(example = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa")]
    pub photo_hash: String,
    /// Hash commitment binding the secret (hex, 32 bytes)
    #[schema(example = "1ffe515422bec9c1f262bbd464ae9986bc7277a39eb22df243526de89b2da5f9")]
    pub commitment: String,
}

/// Response for successful registration
#[derive(Serialize, ToSchema)]
pub struct RegisterResponse {
    /// The registered photo hash (hex, 0x-prefixed)
    pub photo_hash: String,
    /// Assigned ledger timestamp (Unix epoch milliseconds)
    #[schema(example = 1720000000000u64)]
    pub verified_at: u64,
    /// Owner recorded for the attestation (hex, 0x-prefixed)
    pub owner: String,
}

/// Register a photo hash with its commitment
///
/// Creates the write-once attestation record for the hash with the caller
/// as owner and the current ledger clock as timestamp. The commitment is
/// stored opaquely; the registry does not verify its derivation here. That
/// happens at proof time.
///
/// A hash can be registered exactly once: a second attempt returns 409 with
/// code `ALREADY_REGISTERED` and changes nothing. Clients re-running a
/// registration pipeline should check `/attestations/{hash}/verified` first
/// and treat an existing record as success.
#[utoipa::path(
    post,
    path = "/attestations",
    tag = "Registration",
    request_body = RegisterRequest,
    params(
        ("x-owner-address" = String, Header, description = "Authenticated owner address (hex, 20 bytes)")
    ),
    responses(
        (status = 201, description = "Attestation recorded", body = RegisterResponse),
        (status = 400, description = "Malformed photo hash or commitment"),
        (status = 401, description = "Missing or invalid owner address"),
        (status = 409, description = "Photo hash already registered"),
        (status = 503, description = "Attestation storage unavailable")
    )
)]
pub async fn register_handler(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let photo_hash = parse_word("photo_hash", &request.photo_hash)?;
    let commitment = parse_word("commitment", &request.commitment)?;

    // The host's ledger clock; always positive.
    let ledger_time = Utc::now().timestamp_millis() as u64;

    let verified_at = state
        .registry
        .register(photo_hash, commitment, caller.owner, ledger_time)
        .await?;

    tracing::info!(
        photo_hash = %photo_hash,
        owner = %caller.owner,
        verified_at,
        "Attestation registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            photo_hash: photo_hash.to_string(),
            verified_at,
            owner: caller.owner.to_string(),
        }),
    ))
}
