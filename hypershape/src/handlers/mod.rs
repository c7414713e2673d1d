//! HTTP-facing request and response types for collection endpoints

pub mod params;
pub mod query;
pub mod response;

pub use params::QueryParams;
pub use query::{CollectionQuery, ItemQuery};
pub use response::CollectionResponse;
