//! OpenAPI documentation configuration
//!
//! Generates the OpenAPI 3.0 specification for the Obscura registry API.

use utoipa::OpenApi;

use crate::handlers::{
    AttestationResponse, CountResponse, HealthResponse, OwnerCountResponse, OwnerResponse,
    ProofRequest, ProofResponse, ReadyResponse, RegisterRequest, RegisterResponse,
    VerifiedResponse,
};

/// Obscura Attestation Registry - OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Obscura Attestation Registry",
        version = "0.1.0",
        description = r#"
## Photo Provenance Attestation API

Obscura binds a photo's content hash to a caller identity, a ledger
timestamp and a hash commitment, and later checks ownership proofs when the
commitment's secret is revealed.

### How It Works

1. The client hashes the captured photo and derives
   `commitment = keccak256(photo_hash ‖ secret)` with a fresh random secret
2. `POST /attestations` records the binding, exactly once per hash
3. Anyone can read the record back; absence reads as zeros, never a 404
4. Whoever holds the secret proves ownership via
   `POST /attestations/{hash}/proof`; a mismatch is a plain `valid: false`

### Guarantees and Limits

- Records are write-once: no revoke, no update, no transfer
- The commitment scheme binds without revealing, but a proof check
  discloses the secret to any observer of that call: it is a hash
  commitment, not a zero-knowledge proof
"#,
        license(
            name = "MIT OR Apache-2.0",
            url = "https://github.com/obscura-dev/obscura/blob/main/LICENSE"
        ),
        contact(
            name = "Obscura Team",
            url = "https://github.com/obscura-dev/obscura"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    tags(
        (name = "Registration", description = "Write-once attestation of photo hashes"),
        (name = "Lookup", description = "Read-only attestation lookups"),
        (name = "Proof", description = "Ownership proofs against stored commitments"),
        (name = "Counters", description = "Global and per-owner attestation counts"),
        (name = "Health", description = "Service health and readiness endpoints")
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::health::ready,
        crate::handlers::register::register_handler,
        crate::handlers::attestation::get_attestation_handler,
        crate::handlers::attestation::is_verified_handler,
        crate::handlers::attestation::get_owner_handler,
        crate::handlers::proof::verify_proof_handler,
        crate::handlers::stats::photo_count_handler,
        crate::handlers::stats::owner_count_handler,
    ),
    components(
        schemas(
            HealthResponse,
            ReadyResponse,
            RegisterRequest,
            RegisterResponse,
            AttestationResponse,
            VerifiedResponse,
            OwnerResponse,
            ProofRequest,
            ProofResponse,
            CountResponse,
            OwnerCountResponse,
        )
    )
)]
pub struct ApiDoc;
