use http::Method;
use serde::{Serialize, Serializer};

/// Well-known relation names
pub mod rel {
    /// The resource itself
    pub const SELF: &str = "self";
    /// Create a new member of the collection
    pub const CREATE: &str = "create";
    /// Replace the resource
    pub const UPDATE: &str = "update";
    /// Patch the resource
    pub const PARTIAL_UPDATE: &str = "partial-update";
    /// Delete the resource
    pub const DELETE: &str = "delete";
    /// Following page of a collection
    pub const NEXT_PAGE: &str = "next-page";
    /// Preceding page of a collection
    pub const PREVIOUS_PAGE: &str = "previous-page";
    /// Replace the tags attached to the resource
    pub const UPSERT_TAGS: &str = "upsert-tags";
}

/// A follow-up action on a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Target URL
    pub href: String,
    /// Relation name
    pub rel: String,
    /// HTTP method
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
}

impl Link {
    /// Create a link
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: Method) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method,
        }
    }
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(method.as_str())
}
