//! Caller-supplied query options for list and get endpoints.

use std::collections::BTreeMap;

/// Query string parameters sent with a request.
///
/// Keys are unique; setting a key twice keeps the last value. Values are
/// sent verbatim, so callers must pass values that are already URL-safe.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    params: BTreeMap<String, String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an arbitrary parameter.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.set(key, value);
        self
    }

    /// Sets the page number (1-indexed).
    pub fn with_page(self, page: i64) -> Self {
        self.with("page", &page.to_string())
    }

    /// Sets the number of results per page.
    pub fn with_per_page(self, per_page: i64) -> Self {
        self.with("per_page", &per_page.to_string())
    }

    /// Requests extra nested data, e.g. `tags,assignments`.
    pub fn with_fields(self, fields: &str) -> Self {
        self.with("fields", fields)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.params.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The requested page, if one was set and is numeric.
    pub fn page(&self) -> Option<i64> {
        self.get("page").and_then(|p| p.parse().ok())
    }

    pub fn per_page(&self) -> Option<i64> {
        self.get("per_page").and_then(|p| p.parse().ok())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Joins the parameters as `k=v` pairs separated by `&`.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Appends the query string to `url`, adding `?` only when there is something to append.
    pub fn add_to_url(&self, url: &str) -> String {
        if self.is_empty() {
            url.to_string()
        } else {
            format!("{}?{}", url, self.to_query_string())
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ListOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
