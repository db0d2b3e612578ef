//! Caller identity extraction
//!
//! Registration needs the caller's identity for the `owner` field. Identity
//! is externally authenticated: a fronting wallet gateway or identity
//! provider validates the caller and forwards the opaque 160-bit address in
//! the `x-owner-address` header. The registry itself never interprets it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use obscura_core::OwnerId;

use crate::error::ApiError;

/// Header carrying the authenticated owner address (hex, 20 bytes).
pub const OWNER_HEADER: &str = "x-owner-address";

/// Extractor for the authenticated caller identity.
#[derive(Debug, Clone, Copy)]
pub struct CallerIdentity {
    pub owner: OwnerId,
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(OWNER_HEADER).ok_or_else(|| {
            ApiError::unauthorized(format!("Missing {} header", OWNER_HEADER))
        })?;

        let text = value.to_str().map_err(|_| {
            ApiError::unauthorized(format!("Malformed {} header", OWNER_HEADER))
        })?;

        let owner = OwnerId::from_hex(text.trim()).map_err(|e| {
            ApiError::unauthorized(format!("Invalid owner address: {}", e))
        })?;

        // The zero identity is the absent sentinel in owner lookups and can
        // never register.
        if owner.is_zero() {
            return Err(ApiError::unauthorized("Zero owner address is reserved"));
        }

        Ok(Self { owner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> Result<CallerIdentity, ApiError> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(OWNER_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        CallerIdentity::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_owner_is_extracted() {
        let hex = "42".repeat(20);
        let caller = extract(Some(&hex)).await.unwrap();
        assert_eq!(caller.owner, OwnerId::from_bytes([0x42; 20]));
    }

    #[tokio::test]
    async fn test_0x_prefix_is_accepted() {
        let hex = format!("0x{}", "42".repeat(20));
        let caller = extract(Some(&hex)).await.unwrap();
        assert_eq!(caller.owner, OwnerId::from_bytes([0x42; 20]));
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        assert!(extract(None).await.is_err());
    }

    #[tokio::test]
    async fn test_zero_owner_is_rejected() {
        let hex = "00".repeat(20);
        assert!(extract(Some(&hex)).await.is_err());
    }

    #[tokio::test]
    async fn test_bad_hex_is_rejected() {
        assert!(extract(Some("not-hex")).await.is_err());
    }
}
