//! Field mapping registry
//!
//! Translates client-visible output field names into the source property
//! paths a record source can order by. Tables are registered once per
//! (output type, source type) pair at startup and are read-only afterwards,
//! so a built [`MappingRegistry`] can be shared behind an `Arc` without locks.
//!
//! Registration checks every table against both types and refuses anything
//! that would only fail later at request time.
//!
//! # Example
//!
//! ```rust,ignore
//! use hypershape::mapping::{MappingRegistry, MappingTable};
//!
//! let registry = MappingRegistry::new()
//!     .register::<HabitDto, Habit>(
//!         MappingTable::new()
//!             .map("name", &["name"])
//!             .map("status", &["type", "status"]),
//!     )?
//!     .register::<HabitDtoV2, Habit>(
//!         MappingTable::new()
//!             .map("name", &["name"])
//!             .map("createdAt", &["createdAtUtc"]),
//!     )?;
//!
//! let table = registry.lookup::<HabitDto, Habit>()?;
//! ```

use std::any::TypeId;
use std::collections::HashMap;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::shaping::ShapeFields;
use crate::sorting::SortDirection;

/// Describes the storage-side record a mapping points into
///
/// `property_paths` lists every dotted path the source can order and filter
/// by; `property` reads one of them from a record.
pub trait SourceShape {
    /// Type name used in logs and errors
    const TYPE_NAME: &'static str;

    /// Path of the unique identity property, used as the sort tie-breaker
    const IDENTITY_PATH: &'static str = "id";

    /// Every addressable property path
    fn property_paths() -> &'static [&'static str];

    /// Read a property by path
    fn property(&self, path: &str) -> Option<Value>;
}

/// One output field and the source paths it sorts by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// Output field name (matched case-insensitively)
    pub name: &'static str,
    /// Source paths, applied in order
    pub source_paths: Vec<&'static str>,
    /// Direction used when the request names no direction
    pub default_direction: SortDirection,
}

/// Mapping entries for one (output, source) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    entries: Vec<FieldMapping>,
    identity_path: &'static str,
}

impl Default for MappingTable {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            identity_path: "id",
        }
    }
}

impl MappingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Map an output field to source paths, ascending by default
    #[must_use]
    pub fn map(self, name: &'static str, source_paths: &[&'static str]) -> Self {
        self.map_with_direction(name, source_paths, SortDirection::Asc)
    }

    /// Map an output field with an explicit default direction
    #[must_use]
    pub fn map_with_direction(
        mut self,
        name: &'static str,
        source_paths: &[&'static str],
        default_direction: SortDirection,
    ) -> Self {
        self.entries.push(FieldMapping {
            name,
            source_paths: source_paths.to_vec(),
            default_direction,
        });
        self
    }

    /// Set the tie-breaker path
    ///
    /// [`MappingRegistry::register`] overwrites this with the source's
    /// identity path.
    #[must_use]
    pub fn with_identity(mut self, path: &'static str) -> Self {
        self.identity_path = path;
        self
    }

    /// Find an entry by output field name, ignoring case
    pub fn entry(&self, name: &str) -> Option<&FieldMapping> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// All entries in registration order
    pub fn entries(&self) -> &[FieldMapping] {
        &self.entries
    }

    /// Tie-breaker source path
    pub fn identity_path(&self) -> &'static str {
        self.identity_path
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn validate<O: ShapeFields, S: SourceShape>(&self) -> Result<()> {
        let pair = format!("{} -> {}", O::TYPE_NAME, S::TYPE_NAME);
        let paths = S::property_paths();

        if !paths.contains(&S::IDENTITY_PATH) {
            return Err(Error::InvalidMapping(format!(
                "{}: identity path '{}' is not a property of {}",
                pair,
                S::IDENTITY_PATH,
                S::TYPE_NAME
            )));
        }
        if O::field(O::IDENTITY).is_none() {
            return Err(Error::InvalidMapping(format!(
                "{}: identity field '{}' is not declared on {}",
                pair,
                O::IDENTITY,
                O::TYPE_NAME
            )));
        }

        for (index, entry) in self.entries.iter().enumerate() {
            if self.entries[..index]
                .iter()
                .any(|earlier| earlier.name.eq_ignore_ascii_case(entry.name))
            {
                return Err(Error::InvalidMapping(format!(
                    "{}: field '{}' is mapped more than once",
                    pair, entry.name
                )));
            }
            if O::field(entry.name).is_none() {
                return Err(Error::InvalidMapping(format!(
                    "{}: field '{}' is not declared on {}",
                    pair,
                    entry.name,
                    O::TYPE_NAME
                )));
            }
            if entry.source_paths.is_empty() {
                return Err(Error::InvalidMapping(format!(
                    "{}: field '{}' has no source paths",
                    pair, entry.name
                )));
            }
            if let Some(missing) = entry.source_paths.iter().find(|p| !paths.contains(p)) {
                return Err(Error::InvalidMapping(format!(
                    "{}: field '{}' maps to unknown path '{}'",
                    pair, entry.name, missing
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
struct RegisteredTable {
    output_type: &'static str,
    source_type: &'static str,
    table: MappingTable,
}

/// Process-wide set of mapping tables keyed by (output, source) type pair
#[derive(Debug, Default)]
pub struct MappingRegistry {
    tables: HashMap<(TypeId, TypeId), RegisteredTable>,
}

impl MappingRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the table for an (output, source) pair
    ///
    /// Fails with [`Error::InvalidMapping`] if the table names a field the
    /// output type does not declare, a path the source does not expose, a
    /// field twice, or if the pair is already registered.
    pub fn register<O, S>(mut self, table: MappingTable) -> Result<Self>
    where
        O: ShapeFields + 'static,
        S: SourceShape + 'static,
    {
        let key = (TypeId::of::<O>(), TypeId::of::<S>());
        if self.tables.contains_key(&key) {
            return Err(Error::InvalidMapping(format!(
                "{} -> {} is already registered",
                O::TYPE_NAME,
                S::TYPE_NAME
            )));
        }

        let table = table.with_identity(S::IDENTITY_PATH);
        table.validate::<O, S>()?;

        tracing::info!(
            output_type = O::TYPE_NAME,
            source_type = S::TYPE_NAME,
            fields = table.len(),
            "registered sort mapping"
        );

        self.tables.insert(
            key,
            RegisteredTable {
                output_type: O::TYPE_NAME,
                source_type: S::TYPE_NAME,
                table,
            },
        );
        Ok(self)
    }

    /// Look up the table for an (output, source) pair
    ///
    /// A missing pair is a wiring defect and surfaces as
    /// [`Error::MappingNotRegistered`], which maps to a 500.
    pub fn lookup<O, S>(&self) -> Result<&MappingTable>
    where
        O: ShapeFields + 'static,
        S: SourceShape + 'static,
    {
        self.tables
            .get(&(TypeId::of::<O>(), TypeId::of::<S>()))
            .map(|registered| &registered.table)
            .ok_or(Error::MappingNotRegistered {
                output_type: O::TYPE_NAME,
                source_type: S::TYPE_NAME,
            })
    }

    /// Registered pairs as (output, source) type names
    pub fn pairs(&self) -> Vec<(&'static str, &'static str)> {
        let mut pairs: Vec<_> = self
            .tables
            .values()
            .map(|registered| (registered.output_type, registered.source_type))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    struct Widget {
        id: u32,
        label: String,
        size: u32,
    }

    impl SourceShape for Widget {
        const TYPE_NAME: &'static str = "Widget";

        fn property_paths() -> &'static [&'static str] {
            &["id", "label", "dimensions.size"]
        }

        fn property(&self, path: &str) -> Option<Value> {
            match path {
                "id" => Some(json!(self.id)),
                "label" => Some(json!(self.label)),
                "dimensions.size" => Some(json!(self.size)),
                _ => None,
            }
        }
    }

    #[derive(Serialize)]
    struct WidgetDto {
        id: u32,
        label: String,
        size: u32,
    }

    crate::shape_fields!(WidgetDto as "WidgetDto" {
        "id" => id,
        "label" => label,
        "size" => size,
    });

    #[derive(Serialize)]
    struct OtherDto {
        id: u32,
    }

    crate::shape_fields!(OtherDto as "OtherDto" {
        "id" => id,
    });

    fn widget_table() -> MappingTable {
        MappingTable::new()
            .map("label", &["label"])
            .map("size", &["dimensions.size", "id"])
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = MappingRegistry::new()
            .register::<WidgetDto, Widget>(widget_table())
            .unwrap();

        let table = registry.lookup::<WidgetDto, Widget>().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.identity_path(), "id");
        assert_eq!(
            table.entry("SIZE").map(|e| e.source_paths.clone()),
            Some(vec!["dimensions.size", "id"])
        );
        assert_eq!(registry.pairs(), vec![("WidgetDto", "Widget")]);
    }

    #[test]
    fn test_unregistered_pair_is_wiring_error() {
        let registry = MappingRegistry::new()
            .register::<WidgetDto, Widget>(widget_table())
            .unwrap();

        let err = registry.lookup::<OtherDto, Widget>().unwrap_err();
        assert!(matches!(
            err,
            Error::MappingNotRegistered {
                output_type: "OtherDto",
                source_type: "Widget"
            }
        ));
    }

    #[test]
    fn test_unknown_source_path_fails_at_registration() {
        let err = MappingRegistry::new()
            .register::<WidgetDto, Widget>(MappingTable::new().map("size", &["size"]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMapping(ref m) if m.contains("'size'")));
    }

    #[test]
    fn test_undeclared_output_field_fails_at_registration() {
        let err = MappingRegistry::new()
            .register::<WidgetDto, Widget>(MappingTable::new().map("colour", &["label"]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMapping(ref m) if m.contains("colour")));
    }

    #[test]
    fn test_duplicate_field_fails_at_registration() {
        let err = MappingRegistry::new()
            .register::<WidgetDto, Widget>(
                MappingTable::new()
                    .map("label", &["label"])
                    .map("Label", &["id"]),
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMapping(ref m) if m.contains("more than once")));
    }

    #[test]
    fn test_empty_source_paths_fail_at_registration() {
        let err = MappingRegistry::new()
            .register::<WidgetDto, Widget>(MappingTable::new().map("label", &[]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMapping(_)));
    }

    #[test]
    fn test_duplicate_pair_fails() {
        let err = MappingRegistry::new()
            .register::<WidgetDto, Widget>(widget_table())
            .unwrap()
            .register::<WidgetDto, Widget>(widget_table())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidMapping(ref m) if m.contains("already registered")));
    }

    #[test]
    fn test_several_outputs_share_a_source() {
        let registry = MappingRegistry::new()
            .register::<WidgetDto, Widget>(widget_table())
            .unwrap()
            .register::<OtherDto, Widget>(MappingTable::new())
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.lookup::<OtherDto, Widget>().unwrap().is_empty());
    }
}
