//! Per-type field accessor tables

use serde::Serialize;
use serde_json::Value;

/// Reads one named field from a record
pub struct FieldAccessor<T> {
    /// Serialized field name
    pub name: &'static str,
    /// Getter producing the field's JSON value
    pub get: fn(&T) -> Value,
}

impl<T> std::fmt::Debug for FieldAccessor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldAccessor")
            .field("name", &self.name)
            .finish()
    }
}

/// A record type whose fields can be selected by name
pub trait ShapeFields: Sized + 'static {
    /// Type name used in logs and errors
    const TYPE_NAME: &'static str;

    /// Field that is always part of a shaped record
    const IDENTITY: &'static str = "id";

    /// Accessors in declaration order
    fn field_accessors() -> &'static [FieldAccessor<Self>];

    /// Find an accessor by name, ignoring case
    fn field(name: &str) -> Option<&'static FieldAccessor<Self>> {
        Self::field_accessors()
            .iter()
            .find(|accessor| accessor.name.eq_ignore_ascii_case(name))
    }

    /// Declared field names in order
    fn field_names() -> Vec<&'static str> {
        Self::field_accessors().iter().map(|a| a.name).collect()
    }
}

/// Serialize a field value, falling back to `null`
pub fn to_field_value<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Implement [`ShapeFields`] for a struct from a list of `"name" => field.path`
///
/// Names should match the struct's serialized names so that a full shape
/// equals the plain serialization.
///
/// ```rust
/// use hypershape::shaping::ShapeFields;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// #[serde(rename_all = "camelCase")]
/// struct TagDto {
///     id: String,
///     name: String,
///     created_at_utc: String,
/// }
///
/// hypershape::shape_fields!(TagDto as "TagDto" {
///     "id" => id,
///     "name" => name,
///     "createdAtUtc" => created_at_utc,
/// });
///
/// assert_eq!(TagDto::field_names(), vec!["id", "name", "createdAtUtc"]);
/// assert!(TagDto::field("CREATEDATUTC").is_some());
/// ```
#[macro_export]
macro_rules! shape_fields {
    ($ty:ty as $type_name:literal { $($name:literal => $($field:ident).+),+ $(,)? }) => {
        impl $crate::shaping::ShapeFields for $ty {
            const TYPE_NAME: &'static str = $type_name;

            fn field_accessors() -> &'static [$crate::shaping::FieldAccessor<Self>] {
                static ACCESSORS: &[$crate::shaping::FieldAccessor<$ty>] = &[
                    $(
                        $crate::shaping::FieldAccessor {
                            name: $name,
                            get: |record: &$ty| $crate::shaping::to_field_value(&record.$($field).+),
                        },
                    )+
                ];
                ACCESSORS
            }
        }
    };
}
