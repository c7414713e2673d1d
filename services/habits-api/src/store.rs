//! Seed data for the in-memory stores

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::models::{
    Frequency, FrequencyType, Habit, HabitStatus, HabitType, Milestone, Tag, Target,
};

struct HabitSeed {
    name: &'static str,
    description: Option<&'static str>,
    habit_type: HabitType,
    frequency: (FrequencyType, u32),
    target: (u32, &'static str),
    status: HabitStatus,
    milestone: Option<u32>,
    tags: &'static [&'static str],
}

const HABITS: &[HabitSeed] = &[
    HabitSeed {
        name: "Read",
        description: Some("Read before bed"),
        habit_type: HabitType::Measurable,
        frequency: (FrequencyType::Daily, 1),
        target: (30, "pages"),
        status: HabitStatus::Ongoing,
        milestone: Some(1000),
        tags: &["learning", "mind"],
    },
    HabitSeed {
        name: "Meditate",
        description: Some("Morning breathing session"),
        habit_type: HabitType::Binary,
        frequency: (FrequencyType::Daily, 1),
        target: (1, "session"),
        status: HabitStatus::Ongoing,
        milestone: None,
        tags: &["mind", "health"],
    },
    HabitSeed {
        name: "Run",
        description: Some("Easy pace, outdoors"),
        habit_type: HabitType::Measurable,
        frequency: (FrequencyType::Weekly, 3),
        target: (5, "km"),
        status: HabitStatus::Ongoing,
        milestone: Some(500),
        tags: &["health"],
    },
    HabitSeed {
        name: "Drink water",
        description: None,
        habit_type: HabitType::Measurable,
        frequency: (FrequencyType::Daily, 8),
        target: (250, "ml"),
        status: HabitStatus::Ongoing,
        milestone: None,
        tags: &["health"],
    },
    HabitSeed {
        name: "Journal",
        description: Some("Three lines about the day"),
        habit_type: HabitType::Binary,
        frequency: (FrequencyType::Daily, 1),
        target: (1, "entry"),
        status: HabitStatus::Ongoing,
        milestone: None,
        tags: &["mind"],
    },
    HabitSeed {
        name: "Stretch",
        description: Some("Post-run mobility"),
        habit_type: HabitType::Binary,
        frequency: (FrequencyType::Weekly, 3),
        target: (1, "session"),
        status: HabitStatus::Ongoing,
        milestone: None,
        tags: &["health"],
    },
    HabitSeed {
        name: "Practice guitar",
        description: Some("Scales, then songs"),
        habit_type: HabitType::Measurable,
        frequency: (FrequencyType::Weekly, 4),
        target: (20, "minutes"),
        status: HabitStatus::Ongoing,
        milestone: Some(100),
        tags: &["learning"],
    },
    HabitSeed {
        name: "Call family",
        description: None,
        habit_type: HabitType::Binary,
        frequency: (FrequencyType::Weekly, 1),
        target: (1, "call"),
        status: HabitStatus::Ongoing,
        milestone: None,
        tags: &["social"],
    },
    HabitSeed {
        name: "Read",
        description: Some("Technical books at lunch"),
        habit_type: HabitType::Measurable,
        frequency: (FrequencyType::Weekly, 5),
        target: (10, "pages"),
        status: HabitStatus::Completed,
        milestone: Some(300),
        tags: &["learning"],
    },
    HabitSeed {
        name: "No sugar",
        description: Some("Skip desserts on weekdays"),
        habit_type: HabitType::Binary,
        frequency: (FrequencyType::Daily, 1),
        target: (1, "day"),
        status: HabitStatus::Completed,
        milestone: None,
        tags: &["health"],
    },
    HabitSeed {
        name: "Learn Spanish",
        description: Some("Vocabulary drills"),
        habit_type: HabitType::Measurable,
        frequency: (FrequencyType::Daily, 1),
        target: (15, "minutes"),
        status: HabitStatus::Ongoing,
        milestone: Some(365),
        tags: &["learning"],
    },
    HabitSeed {
        name: "Budget review",
        description: None,
        habit_type: HabitType::Binary,
        frequency: (FrequencyType::Monthly, 1),
        target: (1, "review"),
        status: HabitStatus::Ongoing,
        milestone: None,
        tags: &["finance"],
    },
];

const TAGS: &[(&str, Option<&str>)] = &[
    ("health", Some("Body and sleep")),
    ("mind", Some("Focus and calm")),
    ("learning", None),
    ("social", Some("People who matter")),
    ("finance", None),
];

fn seeded_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Seed habits, one created per day
pub fn seed_habits() -> Vec<Habit> {
    let start = seeded_at();
    HABITS
        .iter()
        .enumerate()
        .map(|(day, seed)| {
            let created = start + Duration::days(day as i64);
            let completed = seed.status == HabitStatus::Completed;
            Habit {
                id: format!("h_{}", Uuid::now_v7()),
                name: seed.name.to_string(),
                description: seed.description.map(str::to_string),
                habit_type: seed.habit_type,
                frequency: Frequency {
                    frequency_type: seed.frequency.0,
                    times_per_period: seed.frequency.1,
                },
                target: Target {
                    value: seed.target.0,
                    unit: seed.target.1.to_string(),
                },
                status: seed.status,
                is_archived: completed,
                end_date: completed.then(|| NaiveDate::from_ymd_opt(2025, 6, 30)).flatten(),
                milestone: seed.milestone.map(|target| Milestone {
                    target,
                    current: target / 4,
                }),
                created_at_utc: created,
                updated_at_utc: completed.then(|| created + Duration::days(30)),
                last_completed_at_utc: Some(created + Duration::days(1)),
                tags: seed.tags.iter().map(|tag| tag.to_string()).collect(),
            }
        })
        .collect()
}

/// Seed tags
pub fn seed_tags() -> Vec<Tag> {
    let start = seeded_at();
    TAGS.iter()
        .enumerate()
        .map(|(hour, (name, description))| Tag {
            id: format!("t_{}", Uuid::now_v7()),
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at_utc: start + Duration::hours(hour as i64),
            updated_at_utc: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let habits = seed_habits();
        let ids: HashSet<&str> = habits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids.len(), habits.len());
        assert!(habits.iter().all(|h| h.id.starts_with("h_")));
    }

    #[test]
    fn test_seed_shape() {
        let habits = seed_habits();
        assert_eq!(habits.len(), 12);
        assert_eq!(
            habits
                .iter()
                .filter(|h| h.habit_type == HabitType::Binary)
                .count(),
            6
        );
        assert_eq!(seed_tags().len(), 5);
    }

    #[test]
    fn test_habit_tags_name_seeded_tags() {
        let tags: HashSet<String> = seed_tags().into_iter().map(|t| t.name).collect();
        let habits = seed_habits();
        assert!(habits.iter().all(|h| !h.tags.is_empty()));
        assert!(habits
            .iter()
            .flat_map(|h| h.tags.iter())
            .all(|name| tags.contains(name)));
    }
}
