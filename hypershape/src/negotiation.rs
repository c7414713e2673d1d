//! Accept-header negotiation
//!
//! A request asks for hypermedia by naming a media type whose subtype carries
//! the configured marker, e.g. `application/vnd.habicode.hateoas+json`. The
//! same header selects the API version, either as a `v` parameter
//! (`application/json;v=2`) or as a `.vN` subtype segment
//! (`application/vnd.habicode.hateoas.v2+json`).
//!
//! The decision is made once per request by the [`MediaPreference`] extractor
//! and passed explicitly to the pipeline.
//!
//! # Example
//!
//! ```rust
//! use hypershape::config::HypermediaConfig;
//! use hypershape::negotiation::{media_types, MediaPreference};
//! use hypershape::versioning::ApiVersion;
//!
//! let config = HypermediaConfig::default();
//!
//! let preference = MediaPreference::from_accept(Some(media_types::HATEOAS_V2), &config);
//! assert!(preference.include_links);
//! assert_eq!(preference.version, ApiVersion::V2);
//!
//! let preference = MediaPreference::from_accept(Some("application/json"), &config);
//! assert!(!preference.include_links);
//! assert_eq!(preference.version, ApiVersion::V1);
//! ```

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::config::HypermediaConfig;
use crate::error::Error;
use crate::versioning::ApiVersion;

/// Media types the reference service answers with
pub mod media_types {
    /// Plain JSON
    pub const JSON: &str = "application/json";
    /// Plain JSON, version 1
    pub const JSON_V1: &str = "application/json;v=1";
    /// Plain JSON, version 2
    pub const JSON_V2: &str = "application/json;v=2";
    /// JSON with links
    pub const HATEOAS: &str = "application/vnd.habicode.hateoas+json";
    /// JSON with links, version 1
    pub const HATEOAS_V1: &str = "application/vnd.habicode.hateoas.v1+json";
    /// JSON with links, version 2
    pub const HATEOAS_V2: &str = "application/vnd.habicode.hateoas.v2+json";
}

/// What the client asked for in `Accept`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPreference {
    /// Negotiated JSON media type to echo in `Content-Type`
    pub media_type: Option<String>,
    /// Whether links should be built
    pub include_links: bool,
    /// Requested API version
    pub version: ApiVersion,
}

impl Default for MediaPreference {
    fn default() -> Self {
        Self {
            media_type: None,
            include_links: false,
            version: ApiVersion::default(),
        }
    }
}

impl MediaPreference {
    /// Decide from an `Accept` header value
    ///
    /// Only the first media range is considered. A missing, wildcard or
    /// unparsable header falls back to plain JSON, version 1.
    pub fn from_accept(accept: Option<&str>, config: &HypermediaConfig) -> Self {
        let Some(first) = accept.and_then(|value| value.split(',').next()) else {
            return Self::default();
        };
        let Ok(mime) = first.trim().parse::<mime::Mime>() else {
            return Self::default();
        };
        if mime.type_() == mime::STAR || mime.subtype() == mime::STAR {
            return Self::default();
        }

        // subtype() excludes any +suffix
        let subtype = mime.subtype().as_str().to_ascii_lowercase();
        let marker = config.marker.to_ascii_lowercase();
        let include_links = !marker.is_empty() && subtype.contains(&marker);

        let version = mime
            .get_param("v")
            .and_then(|v| ApiVersion::parse(v.as_str()))
            .or_else(|| subtype.split('.').find_map(ApiVersion::parse))
            .unwrap_or_default();

        let is_json = mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON);
        let media_type = is_json.then(|| mime.essence_str().to_string()).map(|essence| {
            match mime.get_param("v") {
                Some(_) => format!("{};v={}", essence, version.as_number()),
                None => essence,
            }
        });

        Self {
            media_type,
            include_links,
            version,
        }
    }

    /// Content type for a response body
    pub fn content_type(&self) -> &str {
        self.media_type.as_deref().unwrap_or(media_types::JSON)
    }

    /// Fail unless the negotiated version is one the endpoint serves
    pub fn ensure_supported(&self, supported: &[ApiVersion]) -> crate::error::Result<()> {
        if supported.contains(&self.version) {
            Ok(())
        } else {
            Err(Error::UnsupportedApiVersion(self.version))
        }
    }
}

impl<S> FromRequestParts<S> for MediaPreference
where
    HypermediaConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = HypermediaConfig::from_ref(state);
        let accept = parts
            .headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok());

        let preference = Self::from_accept(accept, &config);
        tracing::debug!(
            include_links = preference.include_links,
            version = %preference.version,
            "negotiated media type"
        );
        Ok(preference)
    }
}

/// JSON body answered with the negotiated `Content-Type`
#[derive(Debug)]
pub struct Negotiated<T> {
    media_type: String,
    body: T,
}

impl<T: Serialize> Negotiated<T> {
    /// Wrap a body for the given preference
    pub fn new(preference: &MediaPreference, body: T) -> Self {
        Self {
            media_type: preference.content_type().to_string(),
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for Negotiated<T> {
    fn into_response(self) -> Response {
        let bytes = match serde_json::to_vec(&self.body) {
            Ok(bytes) => bytes,
            Err(e) => return Error::Internal(format!("serialize response: {}", e)).into_response(),
        };
        let content_type = HeaderValue::from_str(&self.media_type)
            .unwrap_or_else(|_| HeaderValue::from_static(media_types::JSON));

        ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
    }
}
