//! HTTP client for the attestation registry.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::json;

use obscura_core::{OwnerId, Word};

/// Request timeout for registry calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the authenticated owner address.
const OWNER_HEADER: &str = "x-owner-address";

/// Outcome of a registration attempt.
#[derive(Debug)]
pub enum RegisterOutcome {
    /// The write landed; the registry assigned this timestamp.
    Registered { verified_at: u64 },
    /// Another writer got there first; the record is someone's already.
    AlreadyRegistered,
}

/// Attestation record as returned by the registry.
#[derive(Debug, Deserialize)]
pub struct AttestationInfo {
    pub verified_at: u64,
    pub owner: String,
    pub commitment: String,
    pub verified: bool,
}

#[derive(Deserialize)]
struct VerifiedResponse {
    verified: bool,
}

#[derive(Deserialize)]
struct ProofResponse {
    valid: bool,
}

#[derive(Deserialize)]
struct RegisterResponse {
    verified_at: u64,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    code: String,
}

/// Thin client over the registry's REST entrypoints.
pub struct RegistryClient {
    base_url: String,
    http: reqwest::Client,
}

impl RegistryClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub async fn is_verified(&self, photo_hash: &Word) -> Result<bool> {
        let url = format!(
            "{}/attestations/{}/verified",
            self.base_url,
            photo_hash.to_hex()
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach registry at {}", self.base_url))?;

        let response = Self::require_ok(response).await?;
        let body: VerifiedResponse = response
            .json()
            .await
            .context("Registry returned a malformed response")?;

        Ok(body.verified)
    }

    pub async fn get_attestation(&self, photo_hash: &Word) -> Result<AttestationInfo> {
        let url = format!("{}/attestations/{}", self.base_url, photo_hash.to_hex());

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach registry at {}", self.base_url))?;

        let response = Self::require_ok(response).await?;
        response
            .json()
            .await
            .context("Registry returned a malformed response")
    }

    pub async fn register(
        &self,
        photo_hash: &Word,
        commitment: &Word,
        owner: &OwnerId,
    ) -> Result<RegisterOutcome> {
        let url = format!("{}/attestations", self.base_url);

        let response = self
            .http
            .post(&url)
            .header(OWNER_HEADER, owner.to_hex())
            .json(&json!({
                "photo_hash": photo_hash.to_hex(),
                "commitment": commitment.to_hex(),
            }))
            .send()
            .await
            .with_context(|| format!("Failed to reach registry at {}", self.base_url))?;

        if response.status() == reqwest::StatusCode::CONFLICT {
            return Ok(RegisterOutcome::AlreadyRegistered);
        }

        let response = Self::require_ok(response).await?;
        let body: RegisterResponse = response
            .json()
            .await
            .context("Registry returned a malformed response")?;

        Ok(RegisterOutcome::Registered {
            verified_at: body.verified_at,
        })
    }

    pub async fn verify_proof(&self, photo_hash: &Word, secret: &Word) -> Result<bool> {
        let url = format!(
            "{}/attestations/{}/proof",
            self.base_url,
            photo_hash.to_hex()
        );

        let response = self
            .http
            .post(&url)
            .json(&json!({ "secret": secret.to_hex() }))
            .send()
            .await
            .with_context(|| format!("Failed to reach registry at {}", self.base_url))?;

        let response = Self::require_ok(response).await?;
        let body: ProofResponse = response
            .json()
            .await
            .context("Registry returned a malformed response")?;

        Ok(body.valid)
    }

    /// Turn non-2xx responses into errors carrying the registry's message.
    async fn require_ok(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) if !body.code.is_empty() => format!("{} ({})", body.error, body.code),
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };

        bail!("Registry call failed: {}", message)
    }
}
