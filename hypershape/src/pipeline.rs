//! Collection and item request pipeline
//!
//! Order of work for a collection read:
//!
//! 1. resolve the sort expression against the mapping table
//! 2. validate the `fields` selection
//! 3. count and fetch the page window from the record source
//! 4. shape each record
//! 5. compute page metadata
//! 6. attach links, only when hypermedia was negotiated
//!
//! Steps 1 and 2 fail before any storage call is made.
//!
//! # Example
//!
//! ```rust,ignore
//! let pipeline = CollectionPipeline::new(registry, config.pagination.limits());
//! let links = ResourceLinks::new(&routes, "Habits", habit_actions());
//!
//! let request = ListRequest::new(&query, &preference)
//!     .with_filter(FilterCondition::eq("status", "ongoing"));
//! let page = pipeline.list::<HabitDto, Habit, _>(&store, request, &links).await?;
//! ```

use std::sync::Arc;

use http::Method;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::handlers::{CollectionQuery, CollectionResponse};
use crate::links::{rel, Link, LinkBuilder, RouteParams, RouteResolver};
use crate::mapping::{MappingRegistry, SourceShape};
use crate::negotiation::MediaPreference;
use crate::pagination::{PageLimits, PageMeta, PageResult};
use crate::shaping::{DataShaper, ShapeFields, ShapedRecord};
use crate::sorting::{apply_sort, resolve_sort};
use crate::storage::{FilterCondition, QuerySpec, RecordSource};

/// An action of another resource linked from every item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedAction {
    /// Resource that owns the action
    pub resource: &'static str,
    /// Action name
    pub action: &'static str,
    /// Relation name of the link
    pub rel: &'static str,
    /// HTTP method of the link
    pub method: Method,
    /// Route parameter that receives the item's identity
    pub id_param: &'static str,
}

/// Action names of one resource
///
/// `list` and `get` are required; write actions are linked only when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceActions {
    /// Collection read
    pub list: &'static str,
    /// Item read
    pub get: &'static str,
    /// Create a member
    pub create: Option<&'static str>,
    /// Replace an item
    pub update: Option<&'static str>,
    /// Patch an item
    pub partial_update: Option<&'static str>,
    /// Delete an item
    pub delete: Option<&'static str>,
    /// Actions of other resources that take the item's identity
    pub related: Vec<RelatedAction>,
}

impl ResourceActions {
    /// Read-only resource
    pub fn read_only(list: &'static str, get: &'static str) -> Self {
        Self {
            list,
            get,
            create: None,
            update: None,
            partial_update: None,
            delete: None,
            related: Vec::new(),
        }
    }

    /// Set the create action
    #[must_use]
    pub fn with_create(mut self, action: &'static str) -> Self {
        self.create = Some(action);
        self
    }

    /// Set the update action
    #[must_use]
    pub fn with_update(mut self, action: &'static str) -> Self {
        self.update = Some(action);
        self
    }

    /// Set the partial update action
    #[must_use]
    pub fn with_partial_update(mut self, action: &'static str) -> Self {
        self.partial_update = Some(action);
        self
    }

    /// Set the delete action
    #[must_use]
    pub fn with_delete(mut self, action: &'static str) -> Self {
        self.delete = Some(action);
        self
    }

    /// Add a cross-resource action
    #[must_use]
    pub fn with_related(mut self, related: RelatedAction) -> Self {
        self.related.push(related);
        self
    }
}

/// Link set for one resource
#[derive(Debug, Clone, Copy)]
pub struct ResourceLinks<'a> {
    builder: LinkBuilder<'a>,
    actions: &'a ResourceActions,
}

impl<'a> ResourceLinks<'a> {
    /// Bind a resource's actions to a route resolver
    pub fn new(
        resolver: &'a dyn RouteResolver,
        resource: &'a str,
        actions: &'a ResourceActions,
    ) -> Self {
        Self {
            builder: LinkBuilder::new(resolver, resource),
            actions,
        }
    }

    /// Links for one item: self, write actions, then related actions
    pub fn item_links(&self, id: &str, fields: Option<&str>) -> Result<Vec<Link>> {
        let id_only = RouteParams::new().with("id", id);
        let mut links = vec![self.builder.create(
            self.actions.get,
            rel::SELF,
            Method::GET,
            &id_only.clone().with_opt("fields", fields),
        )?];

        let writes = [
            (self.actions.update, rel::UPDATE, Method::PUT),
            (self.actions.partial_update, rel::PARTIAL_UPDATE, Method::PATCH),
            (self.actions.delete, rel::DELETE, Method::DELETE),
        ];
        for (action, relation, method) in writes {
            if let Some(action) = action {
                links.push(self.builder.create(action, relation, method, &id_only)?);
            }
        }

        for related in &self.actions.related {
            links.push(self.builder.create_in(
                related.resource,
                related.action,
                related.rel,
                related.method.clone(),
                &RouteParams::new().with(related.id_param, id),
            )?);
        }
        Ok(links)
    }

    /// Links for a collection page: self, create, then next/previous when they exist
    pub fn collection_links(
        &self,
        query: &CollectionQuery,
        extra: &RouteParams,
        meta: &PageMeta,
    ) -> Result<Vec<Link>> {
        let params_for = |page: u32| {
            let mut params = query.route_params(page, meta.page_size);
            params.extend(extra);
            params
        };

        let mut links = vec![self.builder.create(
            self.actions.list,
            rel::SELF,
            Method::GET,
            &params_for(meta.page),
        )?];
        if let Some(create) = self.actions.create {
            links.push(self.builder.create(
                create,
                rel::CREATE,
                Method::POST,
                &RouteParams::new(),
            )?);
        }
        if meta.has_next_page {
            links.push(self.builder.create(
                self.actions.list,
                rel::NEXT_PAGE,
                Method::GET,
                &params_for(meta.page.saturating_add(1)),
            )?);
        }
        if meta.has_previous_page {
            links.push(self.builder.create(
                self.actions.list,
                rel::PREVIOUS_PAGE,
                Method::GET,
                &params_for(meta.page - 1),
            )?);
        }
        Ok(links)
    }
}

/// One collection read
#[derive(Debug, Clone)]
pub struct ListRequest<'q> {
    /// Shared query parameters
    pub query: &'q CollectionQuery,
    /// Negotiated media preference
    pub preference: &'q MediaPreference,
    /// Resource-specific filters, in source-path terms
    pub filters: Vec<FilterCondition>,
    /// Resource-specific parameters echoed into collection links
    pub params: RouteParams,
}

impl<'q> ListRequest<'q> {
    /// Create a request without extra filters
    pub fn new(query: &'q CollectionQuery, preference: &'q MediaPreference) -> Self {
        Self {
            query,
            preference,
            filters: Vec::new(),
            params: RouteParams::new(),
        }
    }

    /// Add a filter
    #[must_use]
    pub fn with_filter(mut self, filter: FilterCondition) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add a parameter to echo into collection links
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key, value);
        self
    }
}

/// Runs collection and item reads against record sources
#[derive(Debug, Clone)]
pub struct CollectionPipeline {
    registry: Arc<MappingRegistry>,
    limits: PageLimits,
}

impl CollectionPipeline {
    /// Create a pipeline over a built registry
    pub fn new(registry: Arc<MappingRegistry>, limits: PageLimits) -> Self {
        Self { registry, limits }
    }

    /// The mapping registry
    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    /// Page size limits
    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    /// Read one page of `O` records projected from source type `S`
    pub async fn list<O, S, R>(
        &self,
        source: &R,
        request: ListRequest<'_>,
        links: &ResourceLinks<'_>,
    ) -> Result<CollectionResponse>
    where
        O: ShapeFields,
        S: SourceShape + 'static,
        R: RecordSource<O>,
    {
        let ListRequest {
            query,
            preference,
            filters,
            params,
        } = request;

        let table = self.registry.lookup::<O, S>()?;
        let plan = resolve_sort(query.sort.as_deref(), table)?;
        let shaper = DataShaper::<O>::parse(query.fields.as_deref())?;
        let page = query.page_request(&self.limits);

        let filtered = QuerySpec::new().with_filters(filters);
        let total = source.count(&filtered).await?;
        let records = if page.offset() < total {
            let spec = apply_sort(filtered, &plan).with_window(page.window());
            source.fetch(&spec).await?
        } else {
            Vec::new()
        };
        let fetched = PageResult::new(records, &page, total);

        tracing::debug!(
            output_type = O::TYPE_NAME,
            sort_keys = plan.len(),
            offset = page.offset(),
            limit = page.page_size,
            total,
            include_links = preference.include_links,
            "collection page fetched"
        );

        let mut items = Vec::with_capacity(fetched.items.len());
        for record in &fetched.items {
            let mut shaped = shaper.shape(record);
            if preference.include_links {
                let id = identity_of::<O>(&shaped)?;
                shaped.set_links(links.item_links(&id, query.fields.as_deref())?);
            }
            items.push(shaped);
        }

        let meta = fetched.meta;
        let response = CollectionResponse::from(PageResult { items, meta });
        if preference.include_links {
            let collection_links = links.collection_links(query, &params, &meta)?;
            return Ok(response.with_links(collection_links));
        }
        Ok(response)
    }

    /// Read one `O` record by identity
    ///
    /// `fields` is validated before the source is called; a missing record
    /// is [`Error::NotFound`].
    pub async fn get<O, R>(
        &self,
        source: &R,
        id: &str,
        fields: Option<&str>,
        preference: &MediaPreference,
        links: &ResourceLinks<'_>,
    ) -> Result<ShapedRecord>
    where
        O: ShapeFields,
        R: RecordSource<O>,
    {
        let shaper = DataShaper::<O>::parse(fields)?;
        let record = source
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("{} '{}' not found", O::TYPE_NAME, id)))?;

        let mut shaped = shaper.shape(&record);
        if preference.include_links {
            shaped.set_links(links.item_links(id, fields)?);
        }
        Ok(shaped)
    }
}

/// Identity of a shaped record as a route parameter
fn identity_of<O: ShapeFields>(shaped: &ShapedRecord) -> Result<String> {
    match shaped.get(O::IDENTITY) {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Null) | None => Err(Error::Internal(format!(
            "{} record has no '{}' value",
            O::TYPE_NAME,
            O::IDENTITY
        ))),
        Some(other) => Ok(other.to_string()),
    }
}
