//! Field selection and the shaper that applies it

use std::marker::PhantomData;

use crate::error::{Error, Result};

use super::fields::ShapeFields;
use super::record::ShapedRecord;

/// Fields requested for a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelection {
    /// No `fields` parameter: every declared field
    All,
    /// Canonical names of the requested fields
    Only(Vec<&'static str>),
}

impl FieldSelection {
    /// Parse and validate a comma-separated field list for `T`
    ///
    /// A missing or blank list selects every field. Names match
    /// case-insensitively and are stored in their declared spelling. The
    /// first unknown name fails with [`Error::InvalidShapingField`].
    pub fn parse<T: ShapeFields>(fields: Option<&str>) -> Result<Self> {
        let Some(fields) = fields.filter(|f| !f.trim().is_empty()) else {
            return Ok(Self::All);
        };

        let mut selected: Vec<&'static str> = Vec::new();
        for token in fields.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let accessor = T::field(token).ok_or_else(|| {
                tracing::warn!(field = %token, type_name = T::TYPE_NAME, "unknown shaping field");
                Error::InvalidShapingField(token.to_string())
            })?;
            if !selected.contains(&accessor.name) {
                selected.push(accessor.name);
            }
        }
        Ok(Self::Only(selected))
    }

    /// Whether a declared field is part of the selection
    pub fn includes(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(names) => names.iter().any(|n| *n == name),
        }
    }
}

/// Projects records of one type through a validated selection
///
/// Validation happens once, in [`DataShaper::parse`], before any record is
/// fetched; shaping itself cannot fail.
#[derive(Debug, Clone)]
pub struct DataShaper<T> {
    selection: FieldSelection,
    _record: PhantomData<fn(&T)>,
}

impl<T: ShapeFields> DataShaper<T> {
    /// Validate a `fields` parameter for `T`
    pub fn parse(fields: Option<&str>) -> Result<Self> {
        FieldSelection::parse::<T>(fields).map(Self::new)
    }

    /// Shaper for an already validated selection
    pub fn new(selection: FieldSelection) -> Self {
        Self {
            selection,
            _record: PhantomData,
        }
    }

    /// Shaper that keeps every field
    pub fn all() -> Self {
        Self::new(FieldSelection::All)
    }

    /// The validated selection
    pub fn selection(&self) -> &FieldSelection {
        &self.selection
    }

    /// Shape one record
    ///
    /// Fields come out in declaration order. The identity field is always
    /// included.
    pub fn shape(&self, record: &T) -> ShapedRecord {
        let fields = T::field_accessors()
            .iter()
            .filter(|accessor| {
                accessor.name == T::IDENTITY || self.selection.includes(accessor.name)
            })
            .map(|accessor| (accessor.name, (accessor.get)(record)))
            .collect();
        ShapedRecord::new(fields)
    }

    /// Shape a slice of records
    pub fn shape_all(&self, records: &[T]) -> Vec<ShapedRecord> {
        records.iter().map(|record| self.shape(record)).collect()
    }
}
