use chrono::{DateTime, NaiveDate, Utc};
use hypershape::mapping::SourceShape;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitType {
    None,
    Binary,
    Measurable,
}

impl HabitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitType::None => "none",
            HabitType::Binary => "binary",
            HabitType::Measurable => "measurable",
        }
    }
}

impl fmt::Display for HabitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitStatus {
    None,
    Ongoing,
    Completed,
}

impl HabitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitStatus::None => "none",
            HabitStatus::Ongoing => "ongoing",
            HabitStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for HabitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyType {
    None,
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frequency {
    #[serde(rename = "type")]
    pub frequency_type: FrequencyType,
    pub times_per_period: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub value: u32,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub target: u32,
    pub current: u32,
}

/// Stored habit
#[derive(Debug, Clone, PartialEq)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub habit_type: HabitType,
    pub frequency: Frequency,
    pub target: Target,
    pub status: HabitStatus,
    pub is_archived: bool,
    pub end_date: Option<NaiveDate>,
    pub milestone: Option<Milestone>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: Option<DateTime<Utc>>,
    pub last_completed_at_utc: Option<DateTime<Utc>>,
    /// Names of the tags attached to the habit
    pub tags: Vec<String>,
}

fn json<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

impl SourceShape for Habit {
    const TYPE_NAME: &'static str = "Habit";

    fn property_paths() -> &'static [&'static str] {
        &[
            "id",
            "name",
            "description",
            "type",
            "frequency.type",
            "frequency.timesPerPeriod",
            "target.value",
            "target.unit",
            "status",
            "isArchived",
            "endDate",
            "milestone.target",
            "milestone.current",
            "createdAtUtc",
            "updatedAtUtc",
            "lastCompletedAtUtc",
        ]
    }

    fn property(&self, path: &str) -> Option<Value> {
        match path {
            "id" => json(&self.id),
            "name" => json(&self.name),
            "description" => json(&self.description),
            "type" => json(&self.habit_type),
            "frequency.type" => json(&self.frequency.frequency_type),
            "frequency.timesPerPeriod" => json(&self.frequency.times_per_period),
            "target.value" => json(&self.target.value),
            "target.unit" => json(&self.target.unit),
            "status" => json(&self.status),
            "isArchived" => json(&self.is_archived),
            "endDate" => json(&self.end_date),
            "milestone.target" => json(&self.milestone.as_ref().map(|m| m.target)),
            "milestone.current" => json(&self.milestone.as_ref().map(|m| m.current)),
            "createdAtUtc" => json(&self.created_at_utc),
            "updatedAtUtc" => json(&self.updated_at_utc),
            "lastCompletedAtUtc" => json(&self.last_completed_at_utc),
            _ => None,
        }
    }
}

/// Habit representation, version 1
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    pub frequency: Frequency,
    pub target: Target,
    pub status: HabitStatus,
    pub is_archived: bool,
    pub end_date: Option<NaiveDate>,
    pub milestone: Option<Milestone>,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: Option<DateTime<Utc>>,
    pub last_completed_at_utc: Option<DateTime<Utc>>,
}

hypershape::shape_fields!(HabitDto as "HabitDto" {
    "id" => id,
    "name" => name,
    "description" => description,
    "type" => habit_type,
    "frequency" => frequency,
    "target" => target,
    "status" => status,
    "isArchived" => is_archived,
    "endDate" => end_date,
    "milestone" => milestone,
    "createdAtUtc" => created_at_utc,
    "updatedAtUtc" => updated_at_utc,
    "lastCompletedAtUtc" => last_completed_at_utc,
});

impl From<&Habit> for HabitDto {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id.clone(),
            name: habit.name.clone(),
            description: habit.description.clone(),
            habit_type: habit.habit_type,
            frequency: habit.frequency.clone(),
            target: habit.target.clone(),
            status: habit.status,
            is_archived: habit.is_archived,
            end_date: habit.end_date,
            milestone: habit.milestone.clone(),
            created_at_utc: habit.created_at_utc,
            updated_at_utc: habit.updated_at_utc,
            last_completed_at_utc: habit.last_completed_at_utc,
        }
    }
}

/// Habit representation, version 2
///
/// Timestamps drop the `Utc` suffix; everything else matches version 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDtoV2 {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub habit_type: HabitType,
    pub frequency: Frequency,
    pub target: Target,
    pub status: HabitStatus,
    pub is_archived: bool,
    pub end_date: Option<NaiveDate>,
    pub milestone: Option<Milestone>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub last_completed_at: Option<DateTime<Utc>>,
}

hypershape::shape_fields!(HabitDtoV2 as "HabitDtoV2" {
    "id" => id,
    "name" => name,
    "description" => description,
    "type" => habit_type,
    "frequency" => frequency,
    "target" => target,
    "status" => status,
    "isArchived" => is_archived,
    "endDate" => end_date,
    "milestone" => milestone,
    "createdAt" => created_at,
    "updatedAt" => updated_at,
    "lastCompletedAt" => last_completed_at,
});

impl From<&Habit> for HabitDtoV2 {
    fn from(habit: &Habit) -> Self {
        Self {
            id: habit.id.clone(),
            name: habit.name.clone(),
            description: habit.description.clone(),
            habit_type: habit.habit_type,
            frequency: habit.frequency.clone(),
            target: habit.target.clone(),
            status: habit.status,
            is_archived: habit.is_archived,
            end_date: habit.end_date,
            milestone: habit.milestone.clone(),
            created_at: habit.created_at_utc,
            updated_at: habit.updated_at_utc,
            last_completed_at: habit.last_completed_at_utc,
        }
    }
}

/// Single habit with its tag names, version 1
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitWithTagsDto {
    #[serde(flatten)]
    pub habit: HabitDto,
    pub tags: Vec<String>,
}

hypershape::shape_fields!(HabitWithTagsDto as "HabitWithTagsDto" {
    "id" => habit.id,
    "name" => habit.name,
    "description" => habit.description,
    "type" => habit.habit_type,
    "frequency" => habit.frequency,
    "target" => habit.target,
    "status" => habit.status,
    "isArchived" => habit.is_archived,
    "endDate" => habit.end_date,
    "milestone" => habit.milestone,
    "createdAtUtc" => habit.created_at_utc,
    "updatedAtUtc" => habit.updated_at_utc,
    "lastCompletedAtUtc" => habit.last_completed_at_utc,
    "tags" => tags,
});

impl From<&Habit> for HabitWithTagsDto {
    fn from(habit: &Habit) -> Self {
        Self {
            habit: HabitDto::from(habit),
            tags: habit.tags.clone(),
        }
    }
}

/// Single habit with its tag names, version 2
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitWithTagsDtoV2 {
    #[serde(flatten)]
    pub habit: HabitDtoV2,
    pub tags: Vec<String>,
}

hypershape::shape_fields!(HabitWithTagsDtoV2 as "HabitWithTagsDtoV2" {
    "id" => habit.id,
    "name" => habit.name,
    "description" => habit.description,
    "type" => habit.habit_type,
    "frequency" => habit.frequency,
    "target" => habit.target,
    "status" => habit.status,
    "isArchived" => habit.is_archived,
    "endDate" => habit.end_date,
    "milestone" => habit.milestone,
    "createdAt" => habit.created_at,
    "updatedAt" => habit.updated_at,
    "lastCompletedAt" => habit.last_completed_at,
    "tags" => tags,
});

impl From<&Habit> for HabitWithTagsDtoV2 {
    fn from(habit: &Habit) -> Self {
        Self {
            habit: HabitDtoV2::from(habit),
            tags: habit.tags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hypershape::shaping::ShapeFields;
    use serde_json::json;

    fn habit() -> Habit {
        Habit {
            id: "h_1".to_string(),
            name: "Read".to_string(),
            description: None,
            habit_type: HabitType::Measurable,
            frequency: Frequency {
                frequency_type: FrequencyType::Daily,
                times_per_period: 1,
            },
            target: Target {
                value: 30,
                unit: "pages".to_string(),
            },
            status: HabitStatus::Ongoing,
            is_archived: false,
            end_date: None,
            milestone: None,
            created_at_utc: Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap(),
            updated_at_utc: None,
            last_completed_at_utc: None,
            tags: vec!["learning".to_string(), "mind".to_string()],
        }
    }

    #[test]
    fn test_every_path_resolves() {
        let habit = habit();
        for path in Habit::property_paths() {
            assert!(habit.property(path).is_some(), "path {path} did not resolve");
        }
        assert_eq!(habit.property("frequency.type"), Some(json!("daily")));
        assert_eq!(habit.property("milestone.target"), Some(Value::Null));
        assert_eq!(habit.property("nope"), None);
    }

    #[test]
    fn test_declared_fields_match_serialized_keys() {
        let habit = habit();
        let v1 = serde_json::to_value(HabitDto::from(&habit)).unwrap();
        let v2 = serde_json::to_value(HabitDtoV2::from(&habit)).unwrap();

        for name in HabitDto::field_names() {
            assert!(v1.get(name).is_some(), "v1 key {name} missing");
        }
        for name in HabitDtoV2::field_names() {
            assert!(v2.get(name).is_some(), "v2 key {name} missing");
        }
        assert!(v2.get("createdAtUtc").is_none());
    }

    #[test]
    fn test_with_tags_views_flatten_and_shape() {
        let habit = habit();
        let v1 = serde_json::to_value(HabitWithTagsDto::from(&habit)).unwrap();
        let v2 = serde_json::to_value(HabitWithTagsDtoV2::from(&habit)).unwrap();

        for name in HabitWithTagsDto::field_names() {
            assert!(v1.get(name).is_some(), "v1 key {name} missing");
        }
        for name in HabitWithTagsDtoV2::field_names() {
            assert!(v2.get(name).is_some(), "v2 key {name} missing");
        }
        assert_eq!(v1["tags"], json!(["learning", "mind"]));
        assert_eq!(v2["tags"], json!(["learning", "mind"]));
        assert_eq!(v1["name"], "Read");
    }
}
