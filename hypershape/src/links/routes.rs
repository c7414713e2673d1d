//! Route resolution for link hrefs

use std::collections::HashMap;

/// Ordered route parameters
///
/// Parameters consumed by a path template are substituted; the rest become
/// the query string, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pairs: Vec<(String, String)>,
}

impl RouteParams {
    /// Create an empty parameter bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, builder style
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a parameter only when a value is present
    #[must_use]
    pub fn with_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    /// Set a parameter, replacing an existing value in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Append every parameter of another bag
    pub fn extend(&mut self, other: &RouteParams) {
        for (key, value) in &other.pairs {
            self.insert(key.clone(), value);
        }
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether no parameters are set
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Resolves a logical action to an href
pub trait RouteResolver: Send + Sync {
    /// Resolve `action` within `resource`, or `None` if it has no route
    fn resolve(&self, resource: &str, action: &str, params: &RouteParams) -> Option<String>;
}

/// Path templates keyed by (resource, action)
///
/// Templates use `{name}` placeholders. Hrefs are root-relative unless a base
/// URL is configured.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    base_url: Option<String>,
    routes: HashMap<(String, String), String>,
}

impl RouteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every href with an absolute origin
    #[must_use]
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url.map(|url| url.trim_end_matches('/').to_string());
        self
    }

    /// Register a template for an action
    #[must_use]
    pub fn route(
        mut self,
        resource: impl Into<String>,
        action: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.routes
            .insert((resource.into(), action.into()), template.into());
        self
    }

    /// Template registered for an action
    pub fn template(&self, resource: &str, action: &str) -> Option<&str> {
        self.routes
            .get(&(resource.to_string(), action.to_string()))
            .map(String::as_str)
    }

    /// Number of registered actions
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether no actions are registered
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteResolver for RouteTable {
    fn resolve(&self, resource: &str, action: &str, params: &RouteParams) -> Option<String> {
        let template = self.template(resource, action)?;
        let (path, used) = render_path(template, params)?;

        let query: Vec<(&str, &str)> = params.iter().filter(|(k, _)| !used.contains(k)).collect();
        let mut href = format!("{}{}", self.base_url.as_deref().unwrap_or_default(), path);
        if !query.is_empty() {
            href.push('?');
            href.push_str(&serde_urlencoded::to_string(&query).ok()?);
        }
        Some(href)
    }
}

/// Substitute `{name}` placeholders; `None` if one has no value
fn render_path<'p>(template: &str, params: &'p RouteParams) -> Option<(String, Vec<&'p str>)> {
    let mut path = String::with_capacity(template.len());
    let mut used = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let close = open + rest[open..].find('}')?;
        let name = &rest[open + 1..close];
        let (key, value) = params.iter().find(|(k, _)| *k == name)?;
        path.push_str(&rest[..open]);
        path.push_str(&urlencoding::encode(value));
        used.push(key);
        rest = &rest[close + 1..];
    }
    path.push_str(rest);
    Some((path, used))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new()
            .route("Habits", "GetHabits", "/habits")
            .route("Habits", "GetHabit", "/habits/{id}")
            .route("HabitTags", "DeleteHabitTag", "/habits/{habitId}/tags/{tagId}")
    }

    #[test]
    fn test_params_insert_replaces_in_place() {
        let mut params = RouteParams::new().with("page", 1).with("sort", "name");
        params.insert("page", 2);
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("page", "2"), ("sort", "name")]);
        assert_eq!(params.get("page"), Some("2"));
    }

    #[test]
    fn test_with_opt_skips_none() {
        let params = RouteParams::new()
            .with_opt("fields", None::<&str>)
            .with_opt("q", Some("run"));
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("q", "run")]);
    }

    #[test]
    fn test_resolve_path_params() {
        let href = table()
            .resolve(
                "HabitTags",
                "DeleteHabitTag",
                &RouteParams::new().with("habitId", "h_1").with("tagId", "t 2"),
            )
            .unwrap();
        assert_eq!(href, "/habits/h_1/tags/t%202");
    }

    #[test]
    fn test_leftover_params_become_query_string() {
        let params = RouteParams::new()
            .with("page", 2)
            .with("pageSize", 10)
            .with("sort", "name desc,status");
        let href = table().resolve("Habits", "GetHabits", &params).unwrap();
        assert_eq!(href, "/habits?page=2&pageSize=10&sort=name+desc%2Cstatus");
    }

    #[test]
    fn test_base_url_prefix() {
        let routes = table().with_base_url(Some("https://api.example.com/".into()));
        let href = routes
            .resolve("Habits", "GetHabit", &RouteParams::new().with("id", "h_1"))
            .unwrap();
        assert_eq!(href, "https://api.example.com/habits/h_1");
    }

    #[test]
    fn test_unknown_action_or_missing_param() {
        let routes = table();
        assert!(routes.resolve("Habits", "Nope", &RouteParams::new()).is_none());
        assert!(routes.resolve("Tags", "GetHabit", &RouteParams::new()).is_none());
        assert!(routes.resolve("Habits", "GetHabit", &RouteParams::new()).is_none());
    }
}
