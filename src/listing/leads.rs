//! Leads dashboard: one listing over inquiries or PDF downloads.
//!
//! Both kinds share `name`, `email`, `phone` and `created_at`; each adds its
//! own filter and columns. Switching mode keeps the shared filter values,
//! clears the kind-specific one, returns to page 1 and fetches again.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::lead::Lead;
use crate::domain::pdf_download::PdfDownload;
use crate::domain::row::{Field, Row, RowKind};
use crate::domain::types::RowId;
use crate::listing::config::{DEFAULT_PAGE_SIZE, ListingConfig};
use crate::listing::descriptor::SortSpec;
use crate::listing::errors::ListingError;
use crate::listing::session::{ListingHandle, ListingSession, ListingSnapshot};
use crate::listing::store::ListSource;

/// Columns both modes filter and sort by.
pub const COMMON_LEAD_FIELDS: [Field; 3] = [Field::Name, Field::Email, Field::Phone];

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LeadMode {
    #[default]
    Inquiries,
    Downloads,
}

impl LeadMode {
    pub fn kind(self) -> RowKind {
        match self {
            LeadMode::Inquiries => RowKind::Lead,
            LeadMode::Downloads => RowKind::PdfDownload,
        }
    }

    pub fn from_kind(kind: RowKind) -> Option<Self> {
        match kind {
            RowKind::Lead => Some(LeadMode::Inquiries),
            RowKind::PdfDownload => Some(LeadMode::Downloads),
            _ => None,
        }
    }

    /// The filter field only this mode offers.
    pub fn specific_filter(self) -> Field {
        match self {
            LeadMode::Inquiries => Field::Subject,
            LeadMode::Downloads => Field::Company,
        }
    }

    /// Columns shown after the shared ones.
    pub fn extra_columns(self) -> &'static [Field] {
        match self {
            LeadMode::Inquiries => &[Field::Subject],
            LeadMode::Downloads => &[Field::Company, Field::DownloadedAsset],
        }
    }

    pub fn config(self, page_size: usize) -> ListingConfig {
        ListingConfig::builder(self.kind())
            .filterable(COMMON_LEAD_FIELDS)
            .filterable([self.specific_filter()])
            .sortable(COMMON_LEAD_FIELDS)
            .sortable(self.extra_columns().iter().copied())
            .default_sort(SortSpec::descending(Field::CreatedAt))
            .page_size(page_size.max(1))
            .build()
            .unwrap_or_else(|_| ListingConfig::for_kind(self.kind()))
    }
}

/// Borrowed view of a row on the leads dashboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LeadRecord<'a> {
    Inquiry(&'a Lead),
    Download(&'a PdfDownload),
}

impl<'a> LeadRecord<'a> {
    pub fn from_row(row: &'a Row) -> Option<Self> {
        match row {
            Row::Lead(lead) => Some(LeadRecord::Inquiry(lead)),
            Row::PdfDownload(download) => Some(LeadRecord::Download(download)),
            _ => None,
        }
    }

    pub fn id(&self) -> RowId {
        match self {
            LeadRecord::Inquiry(lead) => lead.id,
            LeadRecord::Download(download) => download.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            LeadRecord::Inquiry(lead) => &lead.name,
            LeadRecord::Download(download) => &download.name,
        }
    }

    pub fn email(&self) -> &'a str {
        match self {
            LeadRecord::Inquiry(lead) => &lead.email,
            LeadRecord::Download(download) => &download.email,
        }
    }

    pub fn phone(&self) -> Option<&'a str> {
        match self {
            LeadRecord::Inquiry(lead) => lead.phone.as_deref(),
            LeadRecord::Download(download) => download.phone.as_deref(),
        }
    }

    pub fn created_at(&self) -> NaiveDateTime {
        match self {
            LeadRecord::Inquiry(lead) => lead.created_at,
            LeadRecord::Download(download) => download.created_at,
        }
    }

    /// Kind-specific cells, in the order of [`LeadMode::extra_columns`] plus
    /// the inquiry message.
    pub fn extra_cells(&self) -> Vec<(&'static str, Option<&'a str>)> {
        match self {
            LeadRecord::Inquiry(lead) => vec![
                ("subject", Some(lead.subject.as_str())),
                ("message", Some(lead.message.as_str())),
            ],
            LeadRecord::Download(download) => vec![
                ("company", download.company.as_deref()),
                ("downloaded_asset", Some(download.downloaded_asset.as_str())),
            ],
        }
    }
}

/// Rows of a snapshot as lead records; rows of other kinds are skipped.
pub fn lead_records(snapshot: &ListingSnapshot) -> Vec<LeadRecord<'_>> {
    snapshot
        .result
        .iter()
        .flat_map(|result| result.items.iter())
        .filter_map(LeadRecord::from_row)
        .collect()
}

/// Interactive leads listing with a mode toggle.
pub struct LeadListing {
    mode: LeadMode,
    page_size: usize,
    handle: ListingHandle,
}

impl LeadListing {
    pub fn spawn<S>(source: Arc<S>, mode: LeadMode, debounce: Duration) -> Self
    where
        S: ListSource + ?Sized + 'static,
    {
        let page_size = DEFAULT_PAGE_SIZE;
        let handle = ListingSession::spawn(mode.config(page_size), source, debounce);
        Self {
            mode,
            page_size,
            handle,
        }
    }

    pub fn mode(&self) -> LeadMode {
        self.mode
    }

    pub fn handle(&self) -> &ListingHandle {
        &self.handle
    }

    pub fn handle_mut(&mut self) -> &mut ListingHandle {
        &mut self.handle
    }

    /// Switches the listed kind. Returns `false` when already in `mode`.
    pub fn switch_mode(&mut self, mode: LeadMode) -> Result<bool, ListingError> {
        if mode == self.mode {
            return Ok(false);
        }
        self.handle.retarget(mode.config(self.page_size))?;
        self.mode = mode;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::config::DEFAULT_DEBOUNCE;
    use crate::listing::controller::ListQueryController;
    use crate::listing::fetcher::ListingStatus;
    use crate::listing::memory::MemorySource;
    use crate::listing::testing::{download, lead};

    #[test]
    fn modes_share_common_fields_only() {
        let inquiries = LeadMode::Inquiries.config(10);
        let downloads = LeadMode::Downloads.config(10);

        for field in COMMON_LEAD_FIELDS {
            assert!(inquiries.can_filter(field));
            assert!(downloads.can_filter(field));
            assert!(inquiries.can_sort(field), "{field}");
            assert!(downloads.can_sort(field), "{field}");
        }
        assert!(inquiries.can_filter(Field::Subject));
        assert!(!downloads.can_filter(Field::Subject));
        assert!(downloads.can_filter(Field::Company));
        assert!(!inquiries.can_filter(Field::Company));
        assert!(!inquiries.can_sort(Field::Company));
        assert!(!downloads.can_sort(Field::Subject));
        assert_eq!(inquiries.default_sort(), SortSpec::descending(Field::CreatedAt));
        assert_eq!(downloads.default_sort(), SortSpec::descending(Field::CreatedAt));
    }

    #[test]
    fn switching_mode_keeps_common_filters() {
        let mut controller = ListQueryController::new(LeadMode::Inquiries.config(10));
        controller.set_filter(Field::Email, "example").unwrap();
        controller.set_filter(Field::Subject, "pricing").unwrap();
        controller.observe_total(40);
        controller.set_page(3);

        controller.retarget(LeadMode::Downloads.config(10));

        let descriptor = controller.descriptor();
        assert_eq!(descriptor.filter(Field::Email), Some("example"));
        assert_eq!(descriptor.filter(Field::Subject), None);
        assert_eq!(descriptor.page(), 1);
        assert_eq!(controller.kind(), RowKind::PdfDownload);
    }

    #[test]
    fn records_expose_shared_and_specific_columns() {
        let inquiry = lead(1, "Jane", "Pricing");
        let file = download(2, "Omar", "Acme");

        let inquiry = LeadRecord::from_row(&inquiry).unwrap();
        let file = LeadRecord::from_row(&file).unwrap();

        assert_eq!(inquiry.name(), "Jane");
        assert_eq!(inquiry.extra_cells()[0], ("subject", Some("Pricing")));
        assert_eq!(file.email(), "omar@example.com");
        assert_eq!(file.phone(), None);
        assert_eq!(file.extra_cells()[0], ("company", Some("Acme")));
    }

    #[tokio::test(start_paused = true)]
    async fn mode_switch_refetches_the_other_kind() {
        let source = Arc::new(MemorySource::new(vec![
            lead(1, "Jane", "Pricing"),
            lead(2, "John", "Support"),
            download(3, "Jane", "Acme"),
        ]));
        let mut listing = LeadListing::spawn(Arc::clone(&source), LeadMode::Inquiries, DEFAULT_DEBOUNCE);
        listing
            .handle_mut()
            .wait_for(|s| s.status == ListingStatus::Ready)
            .await
            .unwrap();

        listing.handle().set_filter(Field::Name, "jane").unwrap();
        listing.handle().set_filter(Field::Subject, "pri").unwrap();
        let snapshot = listing
            .handle_mut()
            .wait_for(|s| {
                s.status == ListingStatus::Ready && s.descriptor.filter(Field::Subject).is_some()
            })
            .await
            .unwrap();
        assert_eq!(lead_records(&snapshot).len(), 1);

        assert!(listing.switch_mode(LeadMode::Downloads).unwrap());
        assert!(!listing.switch_mode(LeadMode::Downloads).unwrap());
        let snapshot = listing
            .handle_mut()
            .wait_for(|s| s.status == ListingStatus::Ready && s.kind == RowKind::PdfDownload)
            .await
            .unwrap();

        assert_eq!(snapshot.descriptor.filter(Field::Name), Some("jane"));
        assert_eq!(snapshot.descriptor.filter(Field::Subject), None);
        assert_eq!(snapshot.descriptor.page(), 1);
        let records = lead_records(&snapshot);
        assert_eq!(records.len(), 1);
        assert!(matches!(records[0], LeadRecord::Download(_)));

        let last = source.requests().pop().unwrap();
        assert_eq!(last.kind, RowKind::PdfDownload);
        assert_eq!(last.filters.len(), 1);
    }
}
