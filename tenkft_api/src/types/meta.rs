use serde::{Deserialize, Serialize};

/// Position within a paginated collection, as reported by the API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Paging {
    pub per_page: i64,
    pub page: i64,
    /// Link to the previous page. `None` or `"null"` on the first page.
    pub previous: Option<String>,
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    /// Link to the next page. `None`, empty or `"null"` on the last page.
    pub next: Option<String>,
}

impl Paging {
    /// Whether the API reported another page after this one.
    pub fn has_next(&self) -> bool {
        matches!(self.next.as_deref(), Some(next) if !next.is_empty() && next != "null")
    }

    /// Page number to request next.
    ///
    /// Always `page + 1`; the `next` link itself is never followed, so this
    /// relies on the API numbering pages contiguously.
    pub fn next_page(&self) -> i64 {
        self.page + 1
    }
}

/// Envelope returned by every list endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub paging: Paging,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            paging: Paging::default(),
        }
    }
}

impl<T> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// First item matching `pred`, in response order.
    pub fn find<F>(&self, mut pred: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.data.iter().find(|item| pred(item))
    }

    /// Appends another page: items go after the current ones and its paging replaces ours.
    pub fn extend_page(&mut self, page: Collection<T>) {
        self.data.extend(page.data);
        self.paging = page.paging;
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paging_with_next(next: Option<&str>) -> Paging {
        Paging {
            per_page: 2,
            page: 1,
            next: next.map(str::to_string),
            ..Paging::default()
        }
    }

    #[test]
    fn has_next_rules() {
        assert!(!paging_with_next(None).has_next());
        assert!(!paging_with_next(Some("")).has_next());
        assert!(!paging_with_next(Some("null")).has_next());
        assert!(paging_with_next(Some("/api/v1/projects?page=2")).has_next());
    }

    #[test]
    fn next_page_increments() {
        let paging = Paging {
            page: 7,
            ..Paging::default()
        };
        assert_eq!(paging.next_page(), 8);
    }

    #[test]
    fn decodes_null_links() {
        let paging: Paging = serde_json::from_str(
            r#"{"per_page":20,"page":1,"previous":null,"self":"/api/v1/roles?page=1","next":null}"#,
        )
        .unwrap();
        assert_eq!(paging.self_link.as_deref(), Some("/api/v1/roles?page=1"));
        assert!(!paging.has_next());
    }

    #[test]
    fn extend_page_keeps_order_and_takes_latest_paging() {
        let mut acc = Collection {
            data: vec![1, 2],
            paging: paging_with_next(Some("/p2")),
        };
        acc.extend_page(Collection {
            data: vec![3],
            paging: Paging {
                page: 2,
                ..Paging::default()
            },
        });
        assert_eq!(acc.data, vec![1, 2, 3]);
        assert_eq!(acc.paging.page, 2);
        assert!(!acc.paging.has_next());
    }

    #[derive(Debug, Deserialize)]
    struct Label {
        text: String,
    }

    fn decode<T: serde::de::DeserializeOwned>(json: &str) -> Collection<T> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn decodes_items_without_default() {
        let labels: Collection<Label> =
            decode(r#"{"data":[{"text":"a"},{"text":"b"}],"paging":{"page":1,"per_page":2}}"#);
        let texts: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);

        let empty: Collection<Label> = decode("{}");
        assert!(empty.is_empty());
        assert_eq!(empty.paging, Paging::default());
    }
}
