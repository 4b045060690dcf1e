//! Featured-item merge for the blog index.
//!
//! The pinned post is fetched independently of the paginated query. On the
//! first page it takes the highlighted slot and is removed from the body by
//! identifier, so it is never rendered twice.

use serde::Serialize;

use crate::domain::row::Row;
use crate::listing::controller::ListQueryController;
use crate::listing::errors::FetchError;
use crate::listing::fetcher::RemoteListFetcher;
use crate::listing::result::{EmptyState, ListResult};
use crate::listing::store::ListSource;

/// Blog index ready for rendering.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct FeaturedListing {
    /// Pinned row, only ever set on page 1.
    pub highlighted: Option<Row>,
    /// Paginated body with the pinned row removed.
    pub result: ListResult<Row>,
    pub page: usize,
    pub empty: Option<EmptyState>,
}

/// Combines a pin with one page of the regular listing.
pub fn merge_featured(
    page: usize,
    pin: Option<Row>,
    mut result: ListResult<Row>,
    filtered: bool,
) -> FeaturedListing {
    let highlighted = pin.filter(|_| page == 1);
    if let Some(pin) = &highlighted {
        result
            .items
            .retain(|row| !(row.kind() == pin.kind() && row.id() == pin.id()));
    }

    let empty = if highlighted.is_none() && result.items.is_empty() {
        Some(if filtered {
            EmptyState::NoMatches
        } else {
            EmptyState::NoRecords
        })
    } else {
        None
    };

    FeaturedListing {
        highlighted,
        result,
        page,
        empty,
    }
}

/// Fetches the pin and the current page concurrently and merges them.
pub async fn load_featured_listing<S>(
    fetcher: &RemoteListFetcher<S>,
    controller: &ListQueryController,
) -> Result<FeaturedListing, FetchError>
where
    S: ListSource + ?Sized + 'static,
{
    let descriptor = controller.descriptor();
    let kind = controller.kind();
    let (pin, page) = tokio::join!(
        fetcher.fetch_featured(kind),
        fetcher.fetch(kind, descriptor)
    );
    Ok(merge_featured(
        descriptor.page(),
        pin?,
        page?,
        descriptor.has_filters(),
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::row::{Field, RowKind};
    use crate::domain::types::RowId;
    use crate::listing::config::ListingConfig;
    use crate::listing::memory::MemorySource;
    use crate::listing::testing::{featured_post, post, posts};

    fn ids(listing: &FeaturedListing) -> Vec<i32> {
        listing.result.items.iter().map(|row| row.id().get()).collect()
    }

    #[test]
    fn pin_is_removed_from_first_page() {
        let page = ListResult::new(vec![post(3, "c"), post(2, "b"), post(1, "a")], 3);
        let listing = merge_featured(1, Some(featured_post(2, "b")), page, false);

        assert_eq!(listing.highlighted.as_ref().map(Row::id), RowId::new(2).ok());
        assert_eq!(ids(&listing), vec![3, 1]);
        assert_eq!(listing.result.total_count, 3);
        assert_eq!(listing.empty, None);
    }

    #[test]
    fn pin_absent_from_page_leaves_body_untouched() {
        let page = ListResult::new(vec![post(3, "c"), post(2, "b")], 2);
        let listing = merge_featured(1, Some(featured_post(9, "old")), page, false);

        assert!(listing.highlighted.is_some());
        assert_eq!(ids(&listing), vec![3, 2]);
    }

    #[test]
    fn later_pages_have_no_highlighted_slot() {
        let page = ListResult::new(vec![post(2, "b"), post(1, "a")], 12);
        let listing = merge_featured(2, Some(featured_post(2, "b")), page, false);

        assert_eq!(listing.highlighted, None);
        assert_eq!(ids(&listing), vec![2, 1]);
    }

    #[test]
    fn no_pin_and_no_rows_is_an_explicit_empty_state() {
        let listing = merge_featured(1, None, ListResult::empty(), false);
        assert_eq!(listing.empty, Some(EmptyState::NoRecords));

        let listing = merge_featured(1, None, ListResult::empty(), true);
        assert_eq!(listing.empty, Some(EmptyState::NoMatches));
    }

    #[test]
    fn only_the_pin_is_not_empty() {
        let page = ListResult::new(vec![featured_post(1, "solo")], 1);
        let listing = merge_featured(1, Some(featured_post(1, "solo")), page, false);

        assert!(listing.result.items.is_empty());
        assert_eq!(listing.empty, None);
    }

    #[tokio::test]
    async fn most_recent_featured_post_is_pinned() {
        let mut rows = posts(5);
        rows.push(featured_post(6, "Older pick"));
        rows.push(featured_post(7, "Editor's pick"));
        let source = Arc::new(MemorySource::new(rows));
        let fetcher = RemoteListFetcher::new(source);
        let controller = ListQueryController::new(ListingConfig::for_kind(RowKind::BlogPost));

        let listing = load_featured_listing(&fetcher, &controller).await.unwrap();

        let pin = listing.highlighted.unwrap();
        assert_eq!(pin.text(Field::Title), Some("Editor's pick"));
        assert_eq!(listing.result.items.len(), 6);
        assert!(listing.result.items.iter().all(|row| row.id() != pin.id()));
    }
}
