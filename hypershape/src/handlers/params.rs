//! Case-insensitive query string extraction
//!
//! Query parameter names are matched without regard to case, so `Sort`,
//! `SORT` and `sort` all bind to the same field. Keys are folded to ASCII
//! lowercase before deserializing; the first occurrence of a folded key
//! wins. Target types therefore name (or alias) their fields in lowercase.
//!
//! Malformed values are rejected as [`Error::BadRequest`], so a bad filter
//! answers with the same JSON body as every other client error.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Query string extractor with case-insensitive parameter names
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T: DeserializeOwned> QueryParams<T> {
    /// Parse a raw query string
    pub fn parse(query: Option<&str>) -> Result<T> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query.unwrap_or_default())
            .map_err(|e| Error::BadRequest(format!("Malformed query string: {}", e)))?;

        let mut folded: Vec<(String, String)> = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            let key = key.to_ascii_lowercase();
            if !folded.iter().any(|(seen, _)| *seen == key) {
                folded.push((key, value));
            }
        }

        let encoded = serde_urlencoded::to_string(&folded)
            .map_err(|e| Error::BadRequest(format!("Malformed query string: {}", e)))?;
        serde_urlencoded::from_str(&encoded)
            .map_err(|e| Error::BadRequest(format!("Invalid query parameter: {}", e)))
    }
}

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        Self::parse(parts.uri.query()).map(QueryParams)
    }
}
