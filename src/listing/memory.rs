//! In-process [`ListSource`] holding rows in a vector.
//!
//! Evaluates queries with the same semantics as the SQL repository
//! (case-insensitive contains, identifier tie-break following the sort
//! direction) and can inject latency or failures per request, which makes it
//! the data store of choice for exercising the listing engine.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::row::{Field, Row, RowKind};
use crate::domain::types::RowId;
use crate::listing::descriptor::SortDirection;
use crate::listing::errors::FetchError;
use crate::listing::result::ListResult;
use crate::listing::store::{ListSource, StoreQuery};

#[derive(Default)]
pub struct MemorySource {
    rows: Mutex<Vec<Row>>,
    requests: Mutex<Vec<StoreQuery>>,
    latencies: Mutex<VecDeque<Duration>>,
    failures: Mutex<VecDeque<FetchError>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemorySource {
    pub fn new(rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            rows: Mutex::new(rows.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn insert(&self, row: Row) {
        lock(&self.rows).push(row);
    }

    pub fn remove(&self, kind: RowKind, id: RowId) -> bool {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|row| !(row.kind() == kind && row.id() == id));
        rows.len() != before
    }

    /// Page queries received so far, in arrival order.
    pub fn requests(&self) -> Vec<StoreQuery> {
        lock(&self.requests).clone()
    }

    /// Delays the next not-yet-received page request by `latency`.
    pub fn push_latency(&self, latency: Duration) {
        lock(&self.latencies).push_back(latency);
    }

    /// Makes the next page request fail with `error`.
    pub fn fail_next(&self, error: FetchError) {
        lock(&self.failures).push_back(error);
    }

    /// Evaluates `query` against the current rows.
    pub fn evaluate(&self, query: &StoreQuery) -> ListResult<Row> {
        let rows = lock(&self.rows);
        let needles: Vec<(Field, String)> = query
            .filters
            .iter()
            .map(|filter| (filter.field, filter.contains.to_lowercase()))
            .collect();

        let mut matching: Vec<Row> = rows
            .iter()
            .filter(|row| row.kind() == query.kind)
            .filter(|row| {
                needles.iter().all(|(field, needle)| {
                    row.text(*field)
                        .is_some_and(|value| value.to_lowercase().contains(needle.as_str()))
                })
            })
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            let ordering = compare(a, b, query.sort.field).then_with(|| a.id().cmp(&b.id()));
            match query.sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        let total_count = matching.len();
        let items = matching
            .into_iter()
            .skip(query.offset)
            .take(query.limit)
            .collect();
        ListResult::new(items, total_count)
    }
}

fn compare(a: &Row, b: &Row, field: Field) -> Ordering {
    match field {
        Field::CreatedAt => a.created_at().cmp(&b.created_at()),
        Field::StartsAt => starts_at(a).cmp(&starts_at(b)),
        _ => {
            let left = a.text(field).map(str::to_lowercase);
            let right = b.text(field).map(str::to_lowercase);
            left.cmp(&right)
        }
    }
}

fn starts_at(row: &Row) -> Option<chrono::NaiveDateTime> {
    match row {
        Row::Event(event) => Some(event.starts_at),
        _ => None,
    }
}

#[async_trait]
impl ListSource for MemorySource {
    async fn fetch_page(&self, query: StoreQuery) -> Result<ListResult<Row>, FetchError> {
        lock(&self.requests).push(query.clone());
        let latency = lock(&self.latencies).pop_front().unwrap_or_default();
        let failure = lock(&self.failures).pop_front();

        tokio::time::sleep(latency).await;

        match failure {
            Some(error) => Err(error),
            None => Ok(self.evaluate(&query)),
        }
    }

    async fn fetch_featured(&self, kind: RowKind) -> Result<Option<Row>, FetchError> {
        let rows = lock(&self.rows);
        let pin = rows
            .iter()
            .filter(|row| matches!(row, Row::BlogPost(post) if post.featured))
            .filter(|row| row.kind() == kind)
            .max_by(|a, b| {
                a.created_at()
                    .cmp(&b.created_at())
                    .then_with(|| a.id().cmp(&b.id()))
            })
            .cloned();
        Ok(pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::descriptor::SortSpec;
    use crate::listing::store::FieldFilter;
    use crate::listing::testing::{download, lead, posts};

    fn all(kind: RowKind, sort: SortSpec) -> StoreQuery {
        StoreQuery {
            kind,
            filters: Vec::new(),
            sort,
            offset: 0,
            limit: usize::MAX,
        }
    }

    #[test]
    fn evaluation_only_sees_the_queried_kind() {
        let source = MemorySource::new(vec![lead(1, "Jane", "Pricing"), download(2, "Jon", "Acme")]);
        let result = source.evaluate(&all(RowKind::Lead, SortSpec::descending(Field::CreatedAt)));
        assert_eq!(result.total_count, 1);
        assert_eq!(result.items[0].kind(), RowKind::Lead);
    }

    #[test]
    fn filters_ignore_case_and_rows_without_the_column() {
        let source = MemorySource::new(vec![
            lead(1, "Jane", "Pricing"),
            lead(2, "Bob", "PRICE list"),
            lead(3, "Eve", "Support"),
        ]);
        let query = StoreQuery {
            filters: vec![FieldFilter {
                field: Field::Subject,
                contains: "pRic".to_string(),
            }],
            ..all(RowKind::Lead, SortSpec::ascending(Field::Name))
        };
        let names: Vec<_> = source
            .evaluate(&query)
            .items
            .iter()
            .filter_map(|row| row.text(Field::Name).map(str::to_string))
            .collect();
        assert_eq!(names, vec!["Bob", "Jane"]);

        let query = StoreQuery {
            filters: vec![FieldFilter {
                field: Field::Company,
                contains: "a".to_string(),
            }],
            ..all(RowKind::Lead, SortSpec::ascending(Field::Name))
        };
        assert_eq!(source.evaluate(&query).total_count, 0);
    }

    #[test]
    fn ties_follow_the_sort_direction_and_removal_is_visible() {
        let source = MemorySource::new(posts(3));
        let ids = |sort| -> Vec<i32> {
            source
                .evaluate(&all(RowKind::BlogPost, sort))
                .items
                .iter()
                .map(|row| row.id().get())
                .collect()
        };
        // Same author on every post, so only the identifier decides.
        assert_eq!(ids(SortSpec::ascending(Field::Author)), vec![1, 2, 3]);
        assert_eq!(ids(SortSpec::descending(Field::Author)), vec![3, 2, 1]);

        assert!(source.remove(RowKind::BlogPost, RowId::new(2).unwrap()));
        assert!(!source.remove(RowKind::Lead, RowId::new(1).unwrap()));
        assert_eq!(ids(SortSpec::ascending(Field::Author)), vec![1, 3]);
    }

    #[tokio::test]
    async fn repeating_a_query_repeats_the_result() {
        let source = MemorySource::new(posts(9));
        let query = StoreQuery {
            offset: 3,
            limit: 3,
            ..all(RowKind::BlogPost, SortSpec::descending(Field::Author))
        };

        let first = source.fetch_page(query.clone()).await.unwrap();
        let second = source.fetch_page(query).await.unwrap();

        assert_eq!(first, second);
        let ids: Vec<i32> = first.items.iter().map(|row| row.id().get()).collect();
        assert_eq!(ids, vec![6, 5, 4]);
    }
}
