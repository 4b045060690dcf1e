//! Translates discrete user intents into a well-formed [`QueryDescriptor`].
//!
//! The controller performs no I/O. It remembers the last total count it was
//! told about so that page requests can be clamped against it.

use crate::domain::row::{Field, RowKind};
use crate::listing::config::ListingConfig;
use crate::listing::descriptor::{QueryDescriptor, SortSpec};
use crate::listing::errors::ListingError;
use crate::listing::result::total_pages;

#[derive(Clone, Debug)]
pub struct ListQueryController {
    config: ListingConfig,
    descriptor: QueryDescriptor,
    total_count: Option<usize>,
}

impl ListQueryController {
    pub fn new(config: ListingConfig) -> Self {
        let descriptor = QueryDescriptor::new(config.default_sort(), config.page_size());
        Self {
            config,
            descriptor,
            total_count: None,
        }
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    pub fn kind(&self) -> RowKind {
        self.config.kind()
    }

    pub fn descriptor(&self) -> &QueryDescriptor {
        &self.descriptor
    }

    /// Pages available for the last observed total, if any was observed.
    pub fn total_pages(&self) -> Option<usize> {
        self.total_count
            .map(|total| total_pages(total, self.config.page_size()))
    }

    /// Sets or clears (empty string) the filter on `field` and goes back to
    /// page 1. Returns whether the descriptor changed.
    pub fn set_filter(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> Result<bool, ListingError> {
        if !self.config.can_filter(field) {
            return Err(ListingError::NotFilterable {
                kind: self.kind(),
                field,
            });
        }
        let before = self.descriptor.clone();
        self.descriptor.set_filter(field, value.into());
        Ok(before != self.descriptor)
    }

    /// Drops every filter value; the page goes back to 1.
    pub fn clear_filters(&mut self) -> bool {
        let before = self.descriptor.clone();
        self.descriptor.retain_filters(|_| false);
        self.descriptor.set_page(1);
        before != self.descriptor
    }

    /// Flips the direction of the active field, or activates `field`
    /// ascending. The page is kept.
    pub fn toggle_sort(&mut self, field: Field) -> Result<SortSpec, ListingError> {
        if !self.config.can_sort(field) {
            return Err(ListingError::NotSortable {
                kind: self.kind(),
                field,
            });
        }
        let current = self.descriptor.sort();
        let next = if current.field == field {
            SortSpec {
                field,
                direction: current.direction.flipped(),
            }
        } else {
            SortSpec::ascending(field)
        };
        self.descriptor.set_sort(next);
        Ok(next)
    }

    /// Activates an explicit sort, e.g. one carried by a request URL. The
    /// page is kept.
    pub fn set_sort(&mut self, sort: SortSpec) -> Result<(), ListingError> {
        if !self.config.can_sort(sort.field) {
            return Err(ListingError::NotSortable {
                kind: self.kind(),
                field: sort.field,
            });
        }
        self.descriptor.set_sort(sort);
        Ok(())
    }

    /// Moves to page `page`, silently clamped into `1..=max(1, totalPages)`.
    /// Without an observed total only the lower bound applies.
    pub fn set_page(&mut self, page: usize) -> usize {
        let upper = self.total_pages().map(|pages| pages.max(1));
        let page = match upper {
            Some(upper) => page.clamp(1, upper),
            None => page.max(1),
        };
        self.descriptor.set_page(page);
        page
    }

    /// Records the total reported by the latest applied fetch. Returns `true`
    /// when the current page fell out of range and was clamped, in which case
    /// the caller should fetch again.
    pub fn observe_total(&mut self, total_count: usize) -> bool {
        self.total_count = Some(total_count);
        let current = self.descriptor.page();
        self.set_page(current) != current
    }

    /// Switches to another screen declaration.
    ///
    /// Filters still declared by `config` survive, the rest are cleared; the
    /// sort survives when still sortable and falls back to the new default
    /// otherwise; the page goes back to 1.
    pub fn retarget(&mut self, config: ListingConfig) {
        let mut descriptor = self.descriptor.clone();
        descriptor.retain_filters(|field| config.can_filter(field));
        if !config.can_sort(descriptor.sort().field) {
            descriptor.set_sort(config.default_sort());
        }
        descriptor.set_page_size(config.page_size());
        descriptor.set_page(1);
        self.descriptor = descriptor;
        self.config = config;
        self.total_count = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::descriptor::SortDirection;

    fn posts() -> ListQueryController {
        ListQueryController::new(ListingConfig::for_kind(RowKind::BlogPost))
    }

    #[test]
    fn starts_on_first_page_with_default_sort() {
        let controller = posts();
        assert_eq!(controller.descriptor().page(), 1);
        assert_eq!(
            controller.descriptor().sort(),
            SortSpec::descending(Field::CreatedAt)
        );
        assert!(!controller.descriptor().has_filters());
    }

    #[test]
    fn every_filter_edit_resets_the_page() {
        let mut controller = posts();
        controller.observe_total(95);
        let edits = [
            (Field::Title, "h"),
            (Field::Title, "he"),
            (Field::Author, "ann"),
            (Field::Title, ""),
            (Field::Author, "ann"),
        ];
        for (field, value) in edits {
            controller.set_page(7);
            assert_eq!(controller.descriptor().page(), 7);
            controller.set_filter(field, value).unwrap();
            assert_eq!(controller.descriptor().page(), 1);
        }
        assert_eq!(controller.descriptor().filter(Field::Title), None);
        assert_eq!(controller.descriptor().filter(Field::Author), Some("ann"));
    }

    #[test]
    fn clearing_filters_returns_to_first_page() {
        let mut controller = posts();
        assert!(!controller.clear_filters());
        controller.set_filter(Field::Title, "health").unwrap();
        controller.observe_total(30);
        controller.set_page(2);
        assert!(controller.clear_filters());
        assert!(!controller.descriptor().has_filters());
        assert_eq!(controller.descriptor().page(), 1);
    }

    #[test]
    fn undeclared_filter_is_rejected_without_changes() {
        let mut controller = posts();
        controller.set_page(3);
        let err = controller.set_filter(Field::Company, "acme").unwrap_err();
        assert_eq!(
            err,
            ListingError::NotFilterable {
                kind: RowKind::BlogPost,
                field: Field::Company
            }
        );
        assert_eq!(controller.descriptor().page(), 3);
    }

    #[test]
    fn toggling_same_field_twice_restores_direction() {
        let mut controller = posts();
        let original = controller.descriptor().sort();
        controller.toggle_sort(Field::CreatedAt).unwrap();
        assert_eq!(
            controller.descriptor().sort().direction,
            SortDirection::Ascending
        );
        controller.toggle_sort(Field::CreatedAt).unwrap();
        assert_eq!(controller.descriptor().sort(), original);
    }

    #[test]
    fn new_sort_field_always_starts_ascending() {
        let mut controller = posts();
        controller.toggle_sort(Field::Title).unwrap();
        controller.toggle_sort(Field::Title).unwrap();
        assert_eq!(
            controller.descriptor().sort(),
            SortSpec::descending(Field::Title)
        );
        controller.toggle_sort(Field::Author).unwrap();
        assert_eq!(
            controller.descriptor().sort(),
            SortSpec::ascending(Field::Author)
        );
    }

    #[test]
    fn explicit_sort_must_be_declared() {
        let mut controller = posts();
        controller
            .set_sort(SortSpec::ascending(Field::Category))
            .unwrap();
        assert_eq!(
            controller.descriptor().sort(),
            SortSpec::ascending(Field::Category)
        );
        assert!(controller.set_sort(SortSpec::ascending(Field::Email)).is_err());
        assert_eq!(controller.descriptor().sort().field, Field::Category);
    }

    #[test]
    fn sort_change_keeps_the_page() {
        let mut controller = posts();
        controller.observe_total(40);
        controller.set_page(3);
        controller.toggle_sort(Field::Title).unwrap();
        assert_eq!(controller.descriptor().page(), 3);
    }

    #[test]
    fn page_is_clamped_to_known_total() {
        let mut controller = posts();
        controller.observe_total(23);
        assert_eq!(controller.total_pages(), Some(3));
        assert_eq!(controller.set_page(5), 3);
        assert_eq!(controller.descriptor().offset(), 20);
        assert_eq!(controller.set_page(0), 1);
    }

    #[test]
    fn empty_total_clamps_to_first_page() {
        let mut controller = posts();
        controller.observe_total(0);
        assert_eq!(controller.total_pages(), Some(0));
        assert_eq!(controller.set_page(4), 1);
    }

    #[test]
    fn shrinking_total_asks_for_refetch() {
        let mut controller = posts();
        controller.observe_total(30);
        controller.set_page(3);
        assert!(!controller.observe_total(21));
        assert!(controller.observe_total(20));
        assert_eq!(controller.descriptor().page(), 2);
    }

    #[test]
    fn retarget_keeps_shared_filters_only() {
        let mut controller = ListQueryController::new(ListingConfig::for_kind(RowKind::Lead));
        controller.set_filter(Field::Name, "jane").unwrap();
        controller.set_filter(Field::Subject, "pricing").unwrap();
        controller.toggle_sort(Field::Subject).unwrap();
        controller.observe_total(50);
        controller.set_page(4);

        controller.retarget(ListingConfig::for_kind(RowKind::PdfDownload));

        let descriptor = controller.descriptor();
        assert_eq!(controller.kind(), RowKind::PdfDownload);
        assert_eq!(descriptor.filter(Field::Name), Some("jane"));
        assert_eq!(descriptor.filter(Field::Subject), None);
        assert_eq!(descriptor.sort(), SortSpec::descending(Field::CreatedAt));
        assert_eq!(descriptor.page(), 1);
        assert_eq!(controller.total_pages(), None);
    }
}
