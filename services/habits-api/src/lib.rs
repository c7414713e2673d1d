pub mod handlers;
pub mod mappings;
pub mod models;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::extract::FromRef;
use hypershape::config::{Config, HypermediaConfig};
use hypershape::error::Result;
use hypershape::links::RouteTable;
use hypershape::pipeline::{CollectionPipeline, ResourceActions};
use hypershape::storage::MemoryStore;

use crate::models::{Habit, Tag};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: CollectionPipeline,
    pub routes: Arc<RouteTable>,
    pub habit_actions: Arc<ResourceActions>,
    pub tag_actions: Arc<ResourceActions>,
    pub habits: Arc<MemoryStore<Habit>>,
    pub tags: Arc<MemoryStore<Tag>>,
}

impl AppState {
    /// Build state over the given records
    ///
    /// Fails if a sort mapping does not match its types.
    pub fn new(config: Config, habits: Vec<Habit>, tags: Vec<Tag>) -> Result<Self> {
        let registry = mappings::build_registry()?;
        let pipeline = CollectionPipeline::new(Arc::new(registry), config.pagination.limits());
        let routes = routes::route_table(config.hypermedia.base_url.clone());

        Ok(Self {
            config: Arc::new(config),
            pipeline,
            routes: Arc::new(routes),
            habit_actions: Arc::new(routes::habit_actions()),
            tag_actions: Arc::new(routes::tag_actions()),
            habits: Arc::new(MemoryStore::new(habits)),
            tags: Arc::new(MemoryStore::new(tags)),
        })
    }

    /// Build state over the seed data
    pub fn seeded(config: Config) -> Result<Self> {
        Self::new(config, store::seed_habits(), store::seed_tags())
    }
}

impl FromRef<AppState> for HypermediaConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.hypermedia.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use hypershape::negotiation::media_types;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        let state = AppState::seeded(Config::named("habits-api")).unwrap();
        routes::router(state)
    }

    async fn get(app: Router, uri: &str, accept: Option<&str>) -> (StatusCode, String, Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(accept) = accept {
            request = request.header(header::ACCEPT, accept);
        }
        let response = app
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, content_type, body)
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_plain_json_has_no_links() {
        let (status, content_type, body) = get(app(), "/habits", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "application/json");
        assert_eq!(body["totalCount"], 12);
        assert_eq!(body["pageSize"], 10);
        assert_eq!(body["items"].as_array().unwrap().len(), 10);
        assert!(body.get("links").is_none());
        assert!(body["items"][0].get("links").is_none());
    }

    #[tokio::test]
    async fn test_list_hateoas_has_links() {
        let (status, content_type, body) =
            get(app(), "/habits?page=2&pageSize=5&sort=name", Some(media_types::HATEOAS)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, media_types::HATEOAS);

        let rels: Vec<&str> = body["links"]
            .as_array()
            .unwrap()
            .iter()
            .map(|link| link["rel"].as_str().unwrap())
            .collect();
        assert_eq!(rels, vec!["self", "create", "next-page", "previous-page"]);
        assert_eq!(
            body["links"][0]["href"],
            "/habits?page=2&pageSize=5&sort=name"
        );

        let item_rels: Vec<&str> = body["items"][0]["links"]
            .as_array()
            .unwrap()
            .iter()
            .map(|link| link["rel"].as_str().unwrap())
            .collect();
        assert_eq!(
            item_rels,
            vec!["self", "update", "partial-update", "delete", "upsert-tags"]
        );
        assert_eq!(body["items"][0]["links"][4]["method"], "PUT");
    }

    #[tokio::test]
    async fn test_invalid_shaping_field_is_400() {
        let (status, _, body) = get(app(), "/habits?fields=name,invalidField", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_SHAPING_FIELD");
        assert_eq!(body["field"], "invalidField");
    }

    #[tokio::test]
    async fn test_invalid_sort_field_is_400() {
        let (status, _, body) = get(app(), "/habits?sort=bogus%20desc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_SORT_FIELD");
        assert_eq!(body["field"], "bogus");
    }

    #[tokio::test]
    async fn test_fields_keep_identity() {
        let (status, _, body) = get(app(), "/habits?fields=name", None).await;
        assert_eq!(status, StatusCode::OK);
        let item = body["items"][0].as_object().unwrap();
        let keys: Vec<&str> = item.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 2);
        assert!(item.contains_key("id"));
        assert!(item.contains_key("name"));
    }

    #[tokio::test]
    async fn test_version_two_representation() {
        let (status, content_type, body) =
            get(app(), "/habits?sort=createdAt%20desc", Some(media_types::JSON_V2)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, media_types::JSON_V2);
        assert!(body["items"][0].get("createdAt").is_some());
        assert!(body["items"][0].get("createdAtUtc").is_none());
        assert_eq!(body["items"][0]["name"], "Budget review");

        let (status, _, _) =
            get(app(), "/habits?sort=createdAtUtc", Some(media_types::JSON_V2)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_filters_and_search() {
        let (_, _, body) = get(app(), "/habits?type=binary", None).await;
        assert_eq!(body["totalCount"], 6);

        let (_, _, body) = get(app(), "/habits?status=completed&type=binary", None).await;
        assert_eq!(body["totalCount"], 1);

        let (_, _, body) = get(app(), "/habits?q=READ", None).await;
        assert_eq!(body["totalCount"], 2);

        let (_, _, body) = get(app(), "/habits?q=books", None).await;
        assert_eq!(body["totalCount"], 1);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let (status, _, body) = get(app(), "/habits?page=5&pageSize=10", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["items"].as_array().unwrap().is_empty());
        assert_eq!(body["hasNextPage"], false);
        assert_eq!(body["hasPreviousPage"], true);
    }

    #[tokio::test]
    async fn test_get_habit_roundtrip() {
        let app = app();
        let (_, _, list) = get(app.clone(), "/habits?pageSize=1", None).await;
        let id = list["items"][0]["id"].as_str().unwrap().to_string();

        let (status, _, body) = get(
            app.clone(),
            &format!("/habits/{}?fields=name", id),
            Some(media_types::HATEOAS),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id.as_str());
        assert_eq!(
            body["links"][0]["href"],
            format!("/habits/{}?fields=name", id).as_str()
        );

        let (status, _, body) = get(app, "/habits/h_missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_parameter_names_ignore_case() {
        let (status, _, body) = get(app(), "/habits?Sort=bogus", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_SORT_FIELD");

        let (status, _, body) = get(app(), "/habits?FIELDS=invalidField", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_SHAPING_FIELD");

        let (status, _, body) = get(app(), "/habits?PageSize=3&TYPE=binary", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["pageSize"], 3);
        assert_eq!(body["totalCount"], 6);
        assert_eq!(body["items"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_bad_filter_value_is_json_error() {
        let (status, content_type, body) = get(app(), "/habits?type=bogus", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type, "application/json");
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_unsupported_version_is_rejected() {
        let (status, _, body) = get(app(), "/habits", Some("application/json;v=3")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNSUPPORTED_API_VERSION");

        let (status, _, body) = get(app(), "/tags", Some("application/json;v=3")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNSUPPORTED_API_VERSION");
    }

    #[tokio::test]
    async fn test_get_habit_carries_tags() {
        let app = app();
        let (_, _, list) = get(app.clone(), "/habits?sort=createdAtUtc&pageSize=1", None).await;
        let id = list["items"][0]["id"].as_str().unwrap().to_string();
        assert!(list["items"][0].get("tags").is_none());

        let (status, _, body) = get(app.clone(), &format!("/habits/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Read");
        assert_eq!(body["tags"], serde_json::json!(["learning", "mind"]));
        assert!(body.get("createdAtUtc").is_some());

        let (status, _, body) = get(
            app.clone(),
            &format!("/habits/{}?fields=tags", id),
            Some(media_types::JSON_V2),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(body["id"], id.as_str());
        assert_eq!(body["tags"], serde_json::json!(["learning", "mind"]));

        let (status, _, body) = get(app, &format!("/habits/{}?fields=createdAt", id), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_SHAPING_FIELD");
    }

    #[tokio::test]
    async fn test_tags() {
        let (status, _, body) = get(app(), "/tags?sort=name", Some(media_types::HATEOAS)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalCount"], 5);
        assert_eq!(body["items"][0]["name"], "finance");

        let item_rels: Vec<&str> = body["items"][0]["links"]
            .as_array()
            .unwrap()
            .iter()
            .map(|link| link["rel"].as_str().unwrap())
            .collect();
        assert_eq!(item_rels, vec!["self", "update", "delete"]);
    }
}
