//! # hypershape
//!
//! Query shaping for REST collection endpoints built on axum.
//!
//! ## Features
//!
//! - **Sort mapping**: client sort expressions resolved against per-type mapping tables, with
//!   multi-path expansion and a deterministic identity tie-breaker
//! - **Sparse fieldsets**: `fields=` projection validated against the output type
//! - **Stable pagination**: clamped page parameters and complete page metadata
//! - **Negotiated hypermedia**: links built only when the `Accept` media type asks for them
//! - **Versioned representations**: `v=N` media type parameters select the output type
//!
//! ## Example
//!
//! ```rust,no_run
//! use hypershape::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Load configuration
//!     let config = Config::load()?;
//!
//!     // Initialize tracing
//!     init_tracing(&config)?;
//!
//!     let app = Router::new().route("/health", get(|| async { "ok" }));
//!
//!     // Run server
//!     Server::new(config).serve(app).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod links;
pub mod mapping;
pub mod negotiation;
pub mod observability;
pub mod pagination;
pub mod pipeline;
pub mod server;
pub mod shaping;
pub mod sorting;
pub mod storage;
pub mod versioning;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, HypermediaConfig, PaginationConfig, ServiceConfig};
    pub use crate::error::{Error, ErrorResponse, Result};
    pub use crate::handlers::{CollectionQuery, CollectionResponse, ItemQuery, QueryParams};
    pub use crate::links::{rel, Link, LinkBuilder, RouteParams, RouteResolver, RouteTable};
    pub use crate::mapping::{FieldMapping, MappingRegistry, MappingTable, SourceShape};
    pub use crate::negotiation::{media_types, MediaPreference, Negotiated};
    pub use crate::observability::init_tracing;
    pub use crate::pagination::{PageLimits, PageMeta, PageRequest, PageWindow};
    pub use crate::pipeline::{
        CollectionPipeline, ListRequest, RelatedAction, ResourceActions, ResourceLinks,
    };
    pub use crate::server::Server;
    pub use crate::shape_fields;
    pub use crate::shaping::{DataShaper, FieldSelection, ShapeFields, ShapedRecord};
    pub use crate::sorting::{resolve_sort, ResolvedSortPlan, SortDirection, SortKey};
    pub use crate::storage::{
        FilterCondition, FilterValue, MemoryStore, QuerySpec, RecordSource, StorageError,
        StorageResult,
    };
    pub use crate::versioning::ApiVersion;

    pub use axum::{
        extract::{FromRef, Path, Query, State},
        http::{HeaderMap, HeaderValue, StatusCode},
        response::{IntoResponse, Json, Response},
        routing::{delete, get, patch, post, put},
        Router,
    };

    pub use serde::{Deserialize, Serialize};

    // Re-export tracing macros and types
    pub use tracing::{debug, error, info, instrument, trace, warn, Level, Span};

    // Re-export tokio for async runtime
    pub use tokio;
}
