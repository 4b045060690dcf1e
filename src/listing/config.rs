//! Per-screen listing declarations.

use std::time::Duration;

use crate::domain::row::{Field, RowKind};
use crate::listing::descriptor::SortSpec;
use crate::listing::errors::ListingError;

/// Rows per page used by every built-in screen.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Quiet period after the last keystroke before a text filter is fetched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Declares what one listing screen can filter and sort on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingConfig {
    kind: RowKind,
    filterable: Vec<Field>,
    sortable: Vec<Field>,
    default_sort: SortSpec,
    page_size: usize,
}

impl ListingConfig {
    pub fn builder(kind: RowKind) -> ListingConfigBuilder {
        ListingConfigBuilder {
            kind,
            filterable: Vec::new(),
            sortable: vec![Field::CreatedAt],
            default_sort: SortSpec::descending(Field::CreatedAt),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Declaration used for `kind` by the admin console.
    pub fn for_kind(kind: RowKind) -> Self {
        let builder = Self::builder(kind);
        let builder = match kind {
            RowKind::BlogPost | RowKind::Article => builder
                .filterable([Field::Title, Field::Author, Field::Category])
                .sortable([Field::Title, Field::Author, Field::Category]),
            RowKind::Event => builder
                .filterable([Field::Title, Field::Location])
                .sortable([Field::Title, Field::Location, Field::StartsAt]),
            RowKind::Lead => builder
                .filterable([Field::Name, Field::Email, Field::Phone, Field::Subject])
                .sortable([Field::Name, Field::Email, Field::Phone, Field::Subject]),
            RowKind::PdfDownload => builder
                .filterable([Field::Name, Field::Email, Field::Phone, Field::Company])
                .sortable([
                    Field::Name,
                    Field::Email,
                    Field::Phone,
                    Field::Company,
                    Field::DownloadedAsset,
                ]),
        };
        builder.build_unchecked()
    }

    /// Same declaration with another page size.
    pub fn with_page_size(mut self, page_size: usize) -> Result<Self, ListingError> {
        if page_size == 0 {
            return Err(ListingError::InvalidPageSize);
        }
        self.page_size = page_size;
        Ok(self)
    }

    pub fn kind(&self) -> RowKind {
        self.kind
    }

    pub fn filterable(&self) -> &[Field] {
        &self.filterable
    }

    pub fn sortable(&self) -> &[Field] {
        &self.sortable
    }

    pub fn default_sort(&self) -> SortSpec {
        self.default_sort
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn can_filter(&self, field: Field) -> bool {
        self.filterable.contains(&field)
    }

    pub fn can_sort(&self, field: Field) -> bool {
        self.sortable.contains(&field)
    }
}

#[derive(Clone, Debug)]
pub struct ListingConfigBuilder {
    kind: RowKind,
    filterable: Vec<Field>,
    sortable: Vec<Field>,
    default_sort: SortSpec,
    page_size: usize,
}

impl ListingConfigBuilder {
    #[must_use]
    pub fn filterable(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        for field in fields {
            if !self.filterable.contains(&field) {
                self.filterable.push(field);
            }
        }
        self
    }

    #[must_use]
    pub fn sortable(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        for field in fields {
            if !self.sortable.contains(&field) {
                self.sortable.push(field);
            }
        }
        self
    }

    /// The default sort field is always sortable.
    #[must_use]
    pub fn default_sort(mut self, sort: SortSpec) -> Self {
        self.default_sort = sort;
        self.sortable([sort.field])
    }

    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn build(self) -> Result<ListingConfig, ListingError> {
        if self.page_size == 0 {
            return Err(ListingError::InvalidPageSize);
        }
        Ok(self.build_unchecked())
    }

    fn build_unchecked(self) -> ListingConfig {
        ListingConfig {
            kind: self.kind,
            filterable: self.filterable,
            sortable: self.sortable,
            default_sort: self.default_sort,
            page_size: self.page_size,
        }
    }
}
