pub mod habits;
pub mod health;
pub mod tags;

pub use habits::{get_habit, get_habits};
pub use health::health;
pub use tags::{get_tag, get_tags};

use hypershape::versioning::ApiVersion;

/// API versions every endpoint answers
pub const SUPPORTED_VERSIONS: &[ApiVersion] = &[ApiVersion::V1, ApiVersion::V2];
