//! Hypermedia links
//!
//! A [`LinkBuilder`] turns a logical action name into a [`Link`] by asking a
//! [`RouteResolver`] for the href. [`RouteTable`] is the resolver shipped with
//! the crate: a map of (resource, action) to path templates.
//!
//! # Example
//!
//! ```rust
//! use hypershape::links::{rel, LinkBuilder, RouteParams, RouteTable};
//! use http::Method;
//!
//! let routes = RouteTable::new()
//!     .route("Habits", "GetHabit", "/habits/{id}")
//!     .route("HabitTags", "UpsertHabitTags", "/habits/{habitId}/tags");
//!
//! let links = LinkBuilder::new(&routes, "Habits");
//! let link = links
//!     .create("GetHabit", rel::SELF, Method::GET, &RouteParams::new().with("id", "h_1"))
//!     .unwrap();
//! assert_eq!(link.href, "/habits/h_1");
//!
//! let link = links
//!     .create_in(
//!         "HabitTags",
//!         "UpsertHabitTags",
//!         rel::UPSERT_TAGS,
//!         Method::PUT,
//!         &RouteParams::new().with("habitId", "h_1"),
//!     )
//!     .unwrap();
//! assert_eq!(link.href, "/habits/h_1/tags");
//! ```

mod builder;
mod link;
mod routes;

pub use builder::LinkBuilder;
pub use link::{rel, Link};
pub use routes::{RouteParams, RouteResolver, RouteTable};
