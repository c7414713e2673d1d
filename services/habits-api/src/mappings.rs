//! Sort mappings from output representations to stored properties

use hypershape::error::Result;
use hypershape::mapping::{MappingRegistry, MappingTable};

use crate::models::{Habit, HabitDto, HabitDtoV2, Tag, TagDto};

/// Build the registry for every (representation, source) pair the service serves
pub fn build_registry() -> Result<MappingRegistry> {
    MappingRegistry::new()
        .register::<HabitDto, Habit>(habit_table(
            "createdAtUtc",
            "updatedAtUtc",
            "lastCompletedAtUtc",
        ))?
        .register::<HabitDtoV2, Habit>(habit_table(
            "createdAt",
            "updatedAt",
            "lastCompletedAt",
        ))?
        .register::<TagDto, Tag>(
            MappingTable::new()
                .map("id", &["id"])
                .map("name", &["name"])
                .map("description", &["description"])
                .map("createdAtUtc", &["createdAtUtc"])
                .map("updatedAtUtc", &["updatedAtUtc"]),
        )
}

/// Versions differ only in the names of the timestamp fields
fn habit_table(
    created: &'static str,
    updated: &'static str,
    last_completed: &'static str,
) -> MappingTable {
    MappingTable::new()
        .map("id", &["id"])
        .map("name", &["name"])
        .map("description", &["description"])
        .map("type", &["type"])
        .map("frequency", &["frequency.type", "frequency.timesPerPeriod"])
        .map("target", &["target.value", "target.unit"])
        .map("status", &["status"])
        .map("isArchived", &["isArchived"])
        .map("endDate", &["endDate"])
        .map("milestone", &["milestone.target"])
        .map(created, &["createdAtUtc"])
        .map(updated, &["updatedAtUtc"])
        .map(last_completed, &["lastCompletedAtUtc"])
}
