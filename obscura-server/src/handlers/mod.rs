//! HTTP request handlers
//!
//! This module contains all the request handlers for the API endpoints.

pub mod attestation;
pub mod health;
pub mod proof;
pub mod register;
pub mod stats;

pub use crate::state::AppState;
pub use attestation::{
    get_attestation_handler, get_owner_handler, is_verified_handler, AttestationResponse,
    OwnerResponse, VerifiedResponse,
};
pub use health::{health, ready, HealthResponse, ReadyResponse};
pub use proof::{verify_proof_handler, ProofRequest, ProofResponse};
pub use register::{register_handler, RegisterRequest, RegisterResponse};
pub use stats::{owner_count_handler, photo_count_handler, CountResponse, OwnerCountResponse};
