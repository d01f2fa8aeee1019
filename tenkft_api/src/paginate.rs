//! Accumulates every page of a list endpoint into one collection.

use std::future::Future;

use crate::errors::PaginationError;
use crate::query::ListOptions;
use crate::types::Collection;
use crate::Error;

/// Initial `per_page` for large collections (projects, users).
pub const LARGE_PAGE: i64 = 201;
/// Initial `per_page` for assignments.
pub const ASSIGNMENT_PAGE: i64 = 250;
/// Initial `per_page` for small reference collections (roles, leave types, bill rates).
pub const REFERENCE_PAGE: i64 = 50;

/// Fetches the first page with `per_page` set, then keeps requesting
/// `page + 1` while the latest page reports a next page.
///
/// Pages are fetched one at a time. Items are concatenated in fetch order
/// and the returned paging is the last page's. If any fetch fails, looping
/// stops and the error carries everything gathered before that page.
pub async fn fetch_all<T, F, Fut>(
    opts: &ListOptions,
    per_page: i64,
    mut fetch_page: F,
) -> Result<Collection<T>, PaginationError<T>>
where
    F: FnMut(ListOptions) -> Fut,
    Fut: Future<Output = Result<Collection<T>, Error>>,
{
    let mut opts = opts.clone().with_per_page(per_page);
    let first_page = opts.page().unwrap_or(1);

    let mut all = fetch_page(opts.clone())
        .await
        .map_err(|source| PaginationError {
            page: first_page,
            partial: Collection::new(),
            source,
        })?;

    while all.paging.has_next() {
        let next = all.paging.next_page();
        opts.set("page", &next.to_string());
        tracing::debug!("fetching page {} ({} items so far)", next, all.len());

        match fetch_page(opts.clone()).await {
            Ok(page) => all.extend_page(page),
            Err(source) => {
                tracing::error!(
                    "page {} failed, returning {} items fetched so far",
                    next,
                    all.len()
                );
                return Err(PaginationError {
                    page: next,
                    partial: all,
                    source,
                });
            }
        }
    }

    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Paging;
    use std::cell::RefCell;

    fn page(n: i64, items: Vec<i64>, last: bool) -> Collection<i64> {
        Collection {
            data: items,
            paging: Paging {
                per_page: 2,
                page: n,
                next: if last {
                    Some(String::new())
                } else {
                    Some(format!("/things?page={}", n + 1))
                },
                ..Paging::default()
            },
        }
    }

    #[tokio::test]
    async fn concatenates_pages_in_order() {
        let requested = RefCell::new(Vec::new());
        let result = fetch_all(&ListOptions::new(), 2, |opts| {
            requested.borrow_mut().push(opts.clone());
            let n = opts.page().unwrap_or(1);
            async move {
                Ok(match n {
                    1 => page(1, vec![1, 2], false),
                    2 => page(2, vec![3, 4], false),
                    _ => page(3, vec![5], true),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(result.data, vec![1, 2, 3, 4, 5]);
        assert_eq!(result.paging.page, 3);
        let requested = requested.into_inner();
        assert_eq!(requested.len(), 3);
        assert_eq!(requested[0].page(), None);
        assert_eq!(requested[0].per_page(), Some(2));
        assert_eq!(requested[2].page(), Some(3));
    }

    #[tokio::test]
    async fn stops_on_failed_page_and_keeps_partial() {
        let calls = RefCell::new(0);
        let err = fetch_all(&ListOptions::new(), 2, |opts| {
            *calls.borrow_mut() += 1;
            let n = opts.page().unwrap_or(1);
            async move {
                match n {
                    1 => Ok(page(1, vec![1, 2], false)),
                    _ => Err(Error::Config("boom".to_string())),
                }
            }
        })
        .await
        .unwrap_err();

        assert_eq!(*calls.borrow(), 2);
        assert_eq!(err.page, 2);
        assert_eq!(err.partial.data, vec![1, 2]);
        assert!(err.partial.paging.has_next());
    }

    #[tokio::test]
    async fn first_page_failure_has_empty_partial() {
        let err = fetch_all::<i64, _, _>(&ListOptions::new(), 50, |_| async {
            Err(Error::Config("boom".to_string()))
        })
        .await
        .unwrap_err();
        assert_eq!(err.page, 1);
        assert!(err.partial.is_empty());
    }
}
