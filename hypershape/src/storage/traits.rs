//! Record source trait
//!
//! Uses RPITIT (Return Position Impl Trait In Traits) for async methods
//! without `async_trait`.
//!
//! # Example
//!
//! ```rust,ignore
//! use hypershape::storage::{QuerySpec, RecordSource, StorageResult};
//!
//! struct PgHabits { pool: PgPool }
//!
//! impl RecordSource<HabitDto> for PgHabits {
//!     async fn count(&self, query: &QuerySpec) -> StorageResult<u64> {
//!         // SELECT COUNT(*) ... WHERE <filters>
//!         todo!()
//!     }
//!
//!     async fn fetch(&self, query: &QuerySpec) -> StorageResult<Vec<HabitDto>> {
//!         // SELECT ... WHERE <filters> ORDER BY <query.to_order_by_sql()> LIMIT/OFFSET
//!         todo!()
//!     }
//!
//!     async fn find_by_id(&self, id: &str) -> StorageResult<Option<HabitDto>> {
//!         todo!()
//!     }
//! }
//! ```

use std::future::Future;

use super::error::StorageError;
use super::query::QuerySpec;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Supplies records of one output type
///
/// `Record` is the projected output type; projection from the stored shape
/// happens inside the source.
pub trait RecordSource<Record>: Send + Sync {
    /// Count records matching `query.filters`
    ///
    /// Ordering and window are ignored.
    fn count(&self, query: &QuerySpec) -> impl Future<Output = StorageResult<u64>> + Send;

    /// Fetch records matching the filters, in `query.ordering`, within `query.window`
    fn fetch(&self, query: &QuerySpec) -> impl Future<Output = StorageResult<Vec<Record>>> + Send;

    /// Fetch a single record by identity
    fn find_by_id(&self, id: &str) -> impl Future<Output = StorageResult<Option<Record>>> + Send;
}
