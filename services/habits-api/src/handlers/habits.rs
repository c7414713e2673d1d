use axum::extract::{Path, State};
use hypershape::error::Result;
use hypershape::handlers::{CollectionQuery, CollectionResponse, ItemQuery, QueryParams};
use hypershape::negotiation::{MediaPreference, Negotiated};
use hypershape::pipeline::{ListRequest, ResourceLinks};
use hypershape::shaping::ShapedRecord;
use hypershape::storage::FilterCondition;
use hypershape::versioning::ApiVersion;
use serde::Deserialize;

use super::SUPPORTED_VERSIONS;
use crate::models::{
    Habit, HabitDto, HabitDtoV2, HabitStatus, HabitType, HabitWithTagsDto, HabitWithTagsDtoV2,
};
use crate::routes::resources;
use crate::AppState;

/// Habit-specific collection filters
#[derive(Debug, Default, Deserialize)]
pub struct HabitFilters {
    #[serde(rename = "type")]
    pub habit_type: Option<HabitType>,
    pub status: Option<HabitStatus>,
}

/// List habits
///
/// `Accept` version 2 answers with [`HabitDtoV2`]; everything else with [`HabitDto`].
pub async fn get_habits(
    State(state): State<AppState>,
    preference: MediaPreference,
    QueryParams(query): QueryParams<CollectionQuery>,
    QueryParams(filters): QueryParams<HabitFilters>,
) -> Result<Negotiated<CollectionResponse>> {
    preference.ensure_supported(SUPPORTED_VERSIONS)?;
    let links = ResourceLinks::new(
        state.routes.as_ref(),
        resources::HABITS,
        &state.habit_actions,
    );

    let mut request = ListRequest::new(&query, &preference);
    if let Some(term) = query.search_term() {
        request = request.with_filter(FilterCondition::search(&["name", "description"], term));
    }
    if let Some(habit_type) = filters.habit_type {
        request = request
            .with_filter(FilterCondition::eq("type", habit_type.as_str()))
            .with_param("type", habit_type);
    }
    if let Some(status) = filters.status {
        request = request
            .with_filter(FilterCondition::eq("status", status.as_str()))
            .with_param("status", status);
    }

    let store = state.habits.as_ref();
    let page = match preference.version {
        ApiVersion::V2 => {
            state
                .pipeline
                .list::<HabitDtoV2, Habit, _>(store, request, &links)
                .await?
        }
        _ => {
            state
                .pipeline
                .list::<HabitDto, Habit, _>(store, request, &links)
                .await?
        }
    };

    Ok(Negotiated::new(&preference, page))
}

/// Get one habit with its tag names
pub async fn get_habit(
    State(state): State<AppState>,
    preference: MediaPreference,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<ItemQuery>,
) -> Result<Negotiated<ShapedRecord>> {
    preference.ensure_supported(SUPPORTED_VERSIONS)?;
    let links = ResourceLinks::new(
        state.routes.as_ref(),
        resources::HABITS,
        &state.habit_actions,
    );

    let fields = query.fields.as_deref();
    let store = state.habits.as_ref();
    let habit = match preference.version {
        ApiVersion::V2 => {
            state
                .pipeline
                .get::<HabitWithTagsDtoV2, _>(store, &id, fields, &preference, &links)
                .await?
        }
        _ => {
            state
                .pipeline
                .get::<HabitWithTagsDto, _>(store, &id, fields, &preference, &links)
                .await?
        }
    };

    Ok(Negotiated::new(&preference, habit))
}
