//! Sparse fieldsets
//!
//! Output types declare their nameable fields once through [`ShapeFields`],
//! usually with the [`shape_fields!`](crate::shape_fields) macro, which emits
//! a static accessor table at compile time. A [`DataShaper`] validates the
//! request's `fields` parameter against that table and projects records into
//! ordered [`ShapedRecord`]s.

mod fields;
mod record;
mod selection;

pub use fields::{to_field_value, FieldAccessor, ShapeFields};
pub use record::ShapedRecord;
pub use selection::{DataShaper, FieldSelection};
