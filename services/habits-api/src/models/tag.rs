use chrono::{DateTime, Utc};
use hypershape::mapping::SourceShape;
use serde::Serialize;
use serde_json::Value;

/// Stored tag
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: Option<DateTime<Utc>>,
}

impl SourceShape for Tag {
    const TYPE_NAME: &'static str = "Tag";

    fn property_paths() -> &'static [&'static str] {
        &["id", "name", "description", "createdAtUtc", "updatedAtUtc"]
    }

    fn property(&self, path: &str) -> Option<Value> {
        let value = match path {
            "id" => serde_json::to_value(&self.id),
            "name" => serde_json::to_value(&self.name),
            "description" => serde_json::to_value(&self.description),
            "createdAtUtc" => serde_json::to_value(self.created_at_utc),
            "updatedAtUtc" => serde_json::to_value(self.updated_at_utc),
            _ => return None,
        };
        value.ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: Option<DateTime<Utc>>,
}

hypershape::shape_fields!(TagDto as "TagDto" {
    "id" => id,
    "name" => name,
    "description" => description,
    "createdAtUtc" => created_at_utc,
    "updatedAtUtc" => updated_at_utc,
});

impl From<&Tag> for TagDto {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id.clone(),
            name: tag.name.clone(),
            description: tag.description.clone(),
            created_at_utc: tag.created_at_utc,
            updated_at_utc: tag.updated_at_utc,
        }
    }
}
