//! Shaped output records

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::links::Link;

/// An ordered name/value projection of one record
///
/// Serializes as a JSON object with fields in declaration order. A `links`
/// key is written only when links were attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedRecord {
    fields: Vec<(&'static str, Value)>,
    links: Option<Vec<Link>>,
}

impl ShapedRecord {
    pub(crate) fn new(fields: Vec<(&'static str, Value)>) -> Self {
        Self {
            fields,
            links: None,
        }
    }

    /// Value of a field, if it is part of the shape
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Field names in output order
    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(name, _)| *name).collect()
    }

    /// Attach links
    pub fn set_links(&mut self, links: Vec<Link>) {
        self.links = Some(links);
    }

    /// Attach links, builder style
    #[must_use]
    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.set_links(links);
        self
    }

    /// Attached links, if any
    pub fn links(&self) -> Option<&[Link]> {
        self.links.as_deref()
    }

    /// Convert into a JSON value
    pub fn into_value(self) -> Value {
        serde_json::to_value(&self).unwrap_or(Value::Null)
    }
}

impl Serialize for ShapedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.fields.len() + usize::from(self.links.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        if let Some(links) = &self.links {
            map.serialize_entry("links", links)?;
        }
        map.end()
    }
}
