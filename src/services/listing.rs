//! Paginated listings served to the console and to the public blog index.
//!
//! A request carries the whole descriptor (page, sort, filters), so each call
//! builds a fresh [`ListQueryController`], queries once and, when the page
//! turns out to be past the end, clamps and queries again.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::row::{Field, Row, RowKind};
use crate::listing::config::ListingConfig;
use crate::listing::controller::ListQueryController;
use crate::listing::descriptor::{SortDirection, SortSpec};
use crate::listing::featured::merge_featured;
use crate::listing::result::{EmptyState, ListResult};
use crate::listing::store::StoreQuery;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::RowReader;
use crate::services::{ServiceError, ServiceResult, ensure_site_admin};

/// Listing parameters decoded from a query string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ListingParams {
    pub page: Option<usize>,
    pub sort: Option<Field>,
    pub direction: Option<SortDirection>,
    pub filters: Vec<(Field, String)>,
}

impl ListingParams {
    /// Reads `page`, `sort` and `direction`; any other key must name a
    /// [`Field`] and is taken as a "contains" filter.
    pub fn from_query(query: &HashMap<String, String>) -> ServiceResult<Self> {
        let mut params = Self::default();
        for (key, value) in query {
            match key.as_str() {
                "page" => {
                    let page = value
                        .parse()
                        .map_err(|_| ServiceError::Form(format!("invalid page: {value}")))?;
                    params.page = Some(page);
                }
                "sort" => {
                    let field =
                        Field::from_str(value).map_err(|err| ServiceError::Form(err.to_string()))?;
                    params.sort = Some(field);
                }
                "direction" => {
                    let direction = SortDirection::from_str(value)
                        .map_err(|_| ServiceError::Form(format!("invalid direction: {value}")))?;
                    params.direction = Some(direction);
                }
                other => {
                    let field =
                        Field::from_str(other).map_err(|err| ServiceError::Form(err.to_string()))?;
                    params.filters.push((field, value.clone()));
                }
            }
        }
        params.filters.sort();
        Ok(params)
    }
}

/// One admin listing page.
#[derive(Debug, Serialize)]
pub struct ListingPage {
    pub kind: RowKind,
    #[serde(flatten)]
    pub page: Paginated<Row>,
    pub empty: Option<EmptyState>,
}

/// Public blog index: pinned post plus one page of the rest.
#[derive(Debug, Serialize)]
pub struct BlogIndex {
    pub highlighted: Option<Row>,
    #[serde(flatten)]
    pub page: Paginated<Row>,
    pub empty: Option<EmptyState>,
}

fn controller_for(
    kind: RowKind,
    page_size: usize,
    params: &ListingParams,
) -> ServiceResult<ListQueryController> {
    let config = ListingConfig::for_kind(kind).with_page_size(page_size)?;
    let mut controller = ListQueryController::new(config);
    for (field, value) in &params.filters {
        controller.set_filter(*field, value.as_str())?;
    }
    if let Some(field) = params.sort {
        let direction = params.direction.unwrap_or(SortDirection::Ascending);
        controller.set_sort(SortSpec { field, direction })?;
    }
    if let Some(page) = params.page {
        controller.set_page(page);
    }
    Ok(controller)
}

/// Runs the controller's query; when the page was past the end it is clamped
/// and the query repeated once.
fn fetch_clamped<R>(repo: &R, controller: &mut ListQueryController) -> ServiceResult<ListResult<Row>>
where
    R: RowReader + ?Sized,
{
    let query = StoreQuery::from_descriptor(controller.kind(), controller.descriptor());
    let result = repo.list_rows(&query).map_err(|err| {
        log::error!("Failed to list {}: {err}", controller.kind());
        ServiceError::from(err)
    })?;

    if !controller.observe_total(result.total_count) {
        return Ok(result);
    }

    let query = StoreQuery::from_descriptor(controller.kind(), controller.descriptor());
    repo.list_rows(&query).map_err(|err| {
        log::error!("Failed to list {}: {err}", controller.kind());
        ServiceError::from(err)
    })
}

/// Lists rows of `kind` for a console administrator.
pub fn list_rows<R>(
    repo: &R,
    user: &AuthenticatedUser,
    kind: RowKind,
    params: &ListingParams,
    page_size: usize,
) -> ServiceResult<ListingPage>
where
    R: RowReader + ?Sized,
{
    ensure_site_admin(user)?;

    let mut controller = controller_for(kind, page_size, params)?;
    let result = fetch_clamped(repo, &mut controller)?;
    let descriptor = controller.descriptor();
    let empty = EmptyState::classify(&result, descriptor);

    Ok(ListingPage {
        kind,
        page: Paginated::from_result(result, descriptor),
        empty,
    })
}

/// Builds the public blog index with the most recent featured post pinned on
/// the first page. Only title, author and category filters are honoured;
/// the order is always newest first.
pub fn blog_index<R>(repo: &R, params: &ListingParams, page_size: usize) -> ServiceResult<BlogIndex>
where
    R: RowReader + ?Sized,
{
    let params = ListingParams {
        sort: None,
        direction: None,
        ..params.clone()
    };
    let mut controller = controller_for(RowKind::BlogPost, page_size, &params)?;
    let result = fetch_clamped(repo, &mut controller)?;

    let descriptor = controller.descriptor();
    let pin = if descriptor.page() == 1 {
        repo.latest_featured(RowKind::BlogPost).map_err(|err| {
            log::error!("Failed to load featured post: {err}");
            ServiceError::from(err)
        })?
    } else {
        None
    };

    let listing = merge_featured(descriptor.page(), pin, result, descriptor.has_filters());
    Ok(BlogIndex {
        highlighted: listing.highlighted,
        page: Paginated::new(
            listing.result.items,
            listing.page,
            listing.result.total_count,
            descriptor.page_size(),
        ),
        empty: listing.empty,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::domain::types::RowId;
    use crate::listing::memory::MemorySource;
    use crate::listing::testing::{featured_post, lead, posts};
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{admin_user, viewer_user};

    /// Repository evaluating queries in memory and recording them.
    struct MemoryRepo {
        source: MemorySource,
        queries: RefCell<Vec<StoreQuery>>,
    }

    impl MemoryRepo {
        fn new(rows: Vec<Row>) -> Self {
            Self {
                source: MemorySource::new(rows),
                queries: RefCell::new(Vec::new()),
            }
        }
    }

    impl RowReader for MemoryRepo {
        fn get_row(&self, _kind: RowKind, _id: RowId) -> RepositoryResult<Option<Row>> {
            Ok(None)
        }

        fn list_rows(&self, query: &StoreQuery) -> RepositoryResult<ListResult<Row>> {
            self.queries.borrow_mut().push(query.clone());
            Ok(self.source.evaluate(query))
        }

        fn latest_featured(&self, _kind: RowKind) -> RepositoryResult<Option<Row>> {
            let mut featured: Vec<Row> = self
                .source
                .evaluate(&StoreQuery {
                    kind: RowKind::BlogPost,
                    filters: Vec::new(),
                    sort: SortSpec::descending(Field::CreatedAt),
                    offset: 0,
                    limit: usize::MAX,
                })
                .items
                .into_iter()
                .filter(|row| matches!(row, Row::BlogPost(post) if post.featured))
                .collect();
            Ok((!featured.is_empty()).then(|| featured.remove(0)))
        }
    }

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn params_parse_fields_and_reject_unknown_keys() {
        let params = ListingParams::from_query(&query(&[
            ("page", "2"),
            ("sort", "title"),
            ("direction", "desc"),
            ("author", "ann"),
        ]))
        .unwrap();
        assert_eq!(params.page, Some(2));
        assert_eq!(params.sort, Some(Field::Title));
        assert_eq!(params.direction, Some(SortDirection::Descending));
        assert_eq!(params.filters, vec![(Field::Author, "ann".to_string())]);

        assert!(matches!(
            ListingParams::from_query(&query(&[("colour", "red")])),
            Err(ServiceError::Form(_))
        ));
        assert!(matches!(
            ListingParams::from_query(&query(&[("page", "two")])),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn viewer_cannot_list() {
        let repo = MockRepository::new();
        let result = list_rows(
            &repo,
            &viewer_user(),
            RowKind::Lead,
            &ListingParams::default(),
            10,
        );
        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn page_past_the_end_is_clamped_and_refetched() {
        let repo = MemoryRepo::new(posts(23));
        let params = ListingParams {
            page: Some(5),
            ..ListingParams::default()
        };

        let page = list_rows(&repo, &admin_user(), RowKind::BlogPost, &params, 10).unwrap();

        assert_eq!(page.page.page, 3);
        assert_eq!(page.page.total_pages, 3);
        assert_eq!(page.page.items.len(), 3);
        let queries = repo.queries.borrow();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].offset, 40);
        assert_eq!(queries[1].offset, 20);
    }

    #[test]
    fn largest_page_number_is_clamped_not_an_error() {
        let repo = MemoryRepo::new(posts(23));
        let params = ListingParams {
            page: Some(usize::MAX),
            ..ListingParams::default()
        };

        let page = list_rows(&repo, &admin_user(), RowKind::BlogPost, &params, 10).unwrap();
        assert_eq!(page.page.page, 3);
        assert_eq!(page.page.items.len(), 3);
        assert_eq!(repo.queries.borrow()[0].offset, usize::MAX);

        let index = blog_index(&repo, &params, 10).unwrap();
        assert_eq!(index.page.page, 3);
        assert_eq!(index.page.items.len(), 3);
    }

    #[test]
    fn undeclared_filter_is_a_listing_error() {
        let repo = MemoryRepo::new(posts(3));
        let params = ListingParams {
            filters: vec![(Field::Company, "acme".to_string())],
            ..ListingParams::default()
        };
        let result = list_rows(&repo, &admin_user(), RowKind::BlogPost, &params, 10);
        assert!(matches!(result, Err(ServiceError::Listing(_))));
        assert!(repo.queries.borrow().is_empty());
    }

    #[test]
    fn empty_states_are_reported() {
        let repo = MemoryRepo::new(vec![lead(1, "Jane", "Pricing")]);
        let params = ListingParams {
            filters: vec![(Field::Name, "zed".to_string())],
            ..ListingParams::default()
        };
        let page = list_rows(&repo, &admin_user(), RowKind::Lead, &params, 10).unwrap();
        assert_eq!(page.empty, Some(EmptyState::NoMatches));

        let page = list_rows(
            &repo,
            &admin_user(),
            RowKind::PdfDownload,
            &ListingParams::default(),
            10,
        )
        .unwrap();
        assert_eq!(page.empty, Some(EmptyState::NoRecords));
    }

    #[test]
    fn store_failure_is_logged_and_surfaced() {
        let mut repo = MockRepository::new();
        repo.expect_list_rows()
            .times(1)
            .returning(|_| Err(RepositoryError::ConnectionError("pool exhausted".into())));
        let result = list_rows(
            &repo,
            &admin_user(),
            RowKind::Article,
            &ListingParams::default(),
            10,
        );
        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[test]
    fn blog_index_pins_featured_post_on_first_page_only() {
        let mut rows = posts(12);
        rows.push(featured_post(13, "Editor's pick"));
        let repo = MemoryRepo::new(rows);

        let index = blog_index(&repo, &ListingParams::default(), 10).unwrap();
        let pin = index.highlighted.unwrap();
        assert_eq!(pin.text(Field::Title), Some("Editor's pick"));
        assert_eq!(index.page.items.len(), 9);
        assert!(index.page.items.iter().all(|row| row.id() != pin.id()));
        assert_eq!(index.page.total_pages, 2);

        let params = ListingParams {
            page: Some(2),
            ..ListingParams::default()
        };
        let index = blog_index(&repo, &params, 10).unwrap();
        assert_eq!(index.highlighted, None);
        assert_eq!(index.page.items.len(), 3);
    }

    #[test]
    fn blog_index_ignores_requested_sort() {
        let repo = MemoryRepo::new(posts(3));
        let params = ListingParams {
            sort: Some(Field::Title),
            direction: Some(SortDirection::Ascending),
            ..ListingParams::default()
        };
        blog_index(&repo, &params, 10).unwrap();
        assert_eq!(
            repo.queries.borrow()[0].sort,
            SortSpec::descending(Field::CreatedAt)
        );
    }
}
