use axum::extract::{Path, State};
use hypershape::error::Result;
use hypershape::handlers::{CollectionQuery, CollectionResponse, ItemQuery, QueryParams};
use hypershape::negotiation::{MediaPreference, Negotiated};
use hypershape::pipeline::{ListRequest, ResourceLinks};
use hypershape::shaping::ShapedRecord;
use hypershape::storage::FilterCondition;

use super::SUPPORTED_VERSIONS;
use crate::models::{Tag, TagDto};
use crate::routes::resources;
use crate::AppState;

/// List tags
pub async fn get_tags(
    State(state): State<AppState>,
    preference: MediaPreference,
    QueryParams(query): QueryParams<CollectionQuery>,
) -> Result<Negotiated<CollectionResponse>> {
    preference.ensure_supported(SUPPORTED_VERSIONS)?;
    let links = ResourceLinks::new(state.routes.as_ref(), resources::TAGS, &state.tag_actions);

    let mut request = ListRequest::new(&query, &preference);
    if let Some(term) = query.search_term() {
        request = request.with_filter(FilterCondition::search(&["name", "description"], term));
    }

    let page = state
        .pipeline
        .list::<TagDto, Tag, _>(state.tags.as_ref(), request, &links)
        .await?;

    Ok(Negotiated::new(&preference, page))
}

/// Get one tag
pub async fn get_tag(
    State(state): State<AppState>,
    preference: MediaPreference,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<ItemQuery>,
) -> Result<Negotiated<ShapedRecord>> {
    preference.ensure_supported(SUPPORTED_VERSIONS)?;
    let links = ResourceLinks::new(state.routes.as_ref(), resources::TAGS, &state.tag_actions);

    let tag = state
        .pipeline
        .get::<TagDto, _>(
            state.tags.as_ref(),
            &id,
            query.fields.as_deref(),
            &preference,
            &links,
        )
        .await?;

    Ok(Negotiated::new(&preference, tag))
}
