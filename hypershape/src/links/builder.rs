use http::Method;

use crate::error::{Error, Result};

use super::link::Link;
use super::routes::{RouteParams, RouteResolver};

/// Builds links for one owning resource
///
/// Only constructed when the request negotiated hypermedia.
#[derive(Clone, Copy)]
pub struct LinkBuilder<'a> {
    resolver: &'a dyn RouteResolver,
    resource: &'a str,
}

impl<'a> LinkBuilder<'a> {
    /// Create a builder whose actions default to `resource`
    pub fn new(resolver: &'a dyn RouteResolver, resource: &'a str) -> Self {
        Self { resolver, resource }
    }

    /// Owning resource
    pub fn resource(&self) -> &str {
        self.resource
    }

    /// Build a link to an action of the owning resource
    pub fn create(
        &self,
        action: &str,
        rel: &str,
        method: Method,
        params: &RouteParams,
    ) -> Result<Link> {
        self.create_in(self.resource, action, rel, method, params)
    }

    /// Build a link to an action of another resource
    ///
    /// An action with no route is a wiring defect and fails with
    /// [`Error::LinkResolution`].
    pub fn create_in(
        &self,
        resource: &str,
        action: &str,
        rel: &str,
        method: Method,
        params: &RouteParams,
    ) -> Result<Link> {
        let href = self
            .resolver
            .resolve(resource, action, params)
            .ok_or_else(|| Error::link_resolution(resource, action))?;
        Ok(Link::new(href, rel, method))
    }
}

impl std::fmt::Debug for LinkBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkBuilder")
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}
