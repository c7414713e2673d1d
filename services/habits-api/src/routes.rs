//! Named actions, their route templates, and the HTTP router

use axum::{routing::get, Router};
use http::Method;
use hypershape::links::{rel, RouteTable};
use hypershape::pipeline::{RelatedAction, ResourceActions};

use crate::handlers;
use crate::AppState;

/// Resource names links are resolved in
pub mod resources {
    pub const HABITS: &str = "Habits";
    pub const HABIT_TAGS: &str = "HabitTags";
    pub const TAGS: &str = "Tags";
}

/// Action names
pub mod actions {
    pub const GET_HABITS: &str = "GetHabits";
    pub const GET_HABIT: &str = "GetHabit";
    pub const CREATE_HABIT: &str = "CreateHabit";
    pub const UPDATE_HABIT: &str = "UpdateHabit";
    pub const PARTIALLY_UPDATE_HABIT: &str = "PartiallyUpdateHabit";
    pub const DELETE_HABIT: &str = "DeleteHabit";
    pub const UPSERT_HABIT_TAGS: &str = "UpsertHabitTags";

    pub const GET_TAGS: &str = "GetTags";
    pub const GET_TAG: &str = "GetTag";
    pub const CREATE_TAG: &str = "CreateTag";
    pub const UPDATE_TAG: &str = "UpdateTag";
    pub const DELETE_TAG: &str = "DeleteTag";
}

/// Route templates for every named action, including write endpoints served elsewhere
pub fn route_table(base_url: Option<String>) -> RouteTable {
    use actions::*;
    use resources::*;

    RouteTable::new()
        .with_base_url(base_url)
        .route(HABITS, GET_HABITS, "/habits")
        .route(HABITS, GET_HABIT, "/habits/{id}")
        .route(HABITS, CREATE_HABIT, "/habits")
        .route(HABITS, UPDATE_HABIT, "/habits/{id}")
        .route(HABITS, PARTIALLY_UPDATE_HABIT, "/habits/{id}")
        .route(HABITS, DELETE_HABIT, "/habits/{id}")
        .route(HABIT_TAGS, UPSERT_HABIT_TAGS, "/habits/{habitId}/tags")
        .route(TAGS, GET_TAGS, "/tags")
        .route(TAGS, GET_TAG, "/tags/{id}")
        .route(TAGS, CREATE_TAG, "/tags")
        .route(TAGS, UPDATE_TAG, "/tags/{id}")
        .route(TAGS, DELETE_TAG, "/tags/{id}")
}

/// Habit links: full CRUD plus tag association
pub fn habit_actions() -> ResourceActions {
    use actions::*;

    ResourceActions::read_only(GET_HABITS, GET_HABIT)
        .with_create(CREATE_HABIT)
        .with_update(UPDATE_HABIT)
        .with_partial_update(PARTIALLY_UPDATE_HABIT)
        .with_delete(DELETE_HABIT)
        .with_related(RelatedAction {
            resource: resources::HABIT_TAGS,
            action: UPSERT_HABIT_TAGS,
            rel: rel::UPSERT_TAGS,
            method: Method::PUT,
            id_param: "habitId",
        })
}

/// Tag links; tags have no partial update
pub fn tag_actions() -> ResourceActions {
    use actions::*;

    ResourceActions::read_only(GET_TAGS, GET_TAG)
        .with_create(CREATE_TAG)
        .with_update(UPDATE_TAG)
        .with_delete(DELETE_TAG)
}

/// HTTP routes served by this process
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/habits", get(handlers::get_habits))
        .route("/habits/{id}", get(handlers::get_habit))
        .route("/tags", get(handlers::get_tags))
        .route("/tags/{id}", get(handlers::get_tag))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypershape::links::{RouteParams, RouteResolver};

    #[test]
    fn test_every_linked_action_has_a_route() {
        let table = route_table(None);
        for set in [habit_actions(), tag_actions()] {
            let resource = if set.list == actions::GET_HABITS {
                resources::HABITS
            } else {
                resources::TAGS
            };
            let named = [Some(set.list), Some(set.get)]
                .into_iter()
                .chain([set.create, set.update, set.partial_update, set.delete])
                .flatten();
            for action in named {
                assert!(
                    table.template(resource, action).is_some(),
                    "{resource}/{action} has no route"
                );
            }
            for related in &set.related {
                assert!(table.template(related.resource, related.action).is_some());
            }
        }
    }

    #[test]
    fn test_upsert_tags_route() {
        let table = route_table(Some("https://api.example.com/".to_string()));
        let href = table.resolve(
            resources::HABIT_TAGS,
            actions::UPSERT_HABIT_TAGS,
            &RouteParams::new().with("habitId", "h_1"),
        );
        assert_eq!(href.as_deref(), Some("https://api.example.com/habits/h_1/tags"));
    }
}
