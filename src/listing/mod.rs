//! Generic listing engine shared by every console screen.
//!
//! A screen declares what it can filter and sort on ([`ListingConfig`]); the
//! [`ListQueryController`] owns the query descriptor; the
//! [`RemoteListFetcher`] runs requests against a [`ListSource`] and keeps only
//! the newest response; [`ListingSession`] ties them together with a debounce
//! for text filters.

pub mod config;
pub mod controller;
pub mod descriptor;
pub mod errors;
pub mod featured;
pub mod fetcher;
pub mod leads;
pub mod memory;
pub mod result;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE, ListingConfig, ListingConfigBuilder};
pub use controller::ListQueryController;
pub use descriptor::{QueryDescriptor, SortDirection, SortSpec};
pub use errors::{FetchError, ListingError};
pub use featured::{FeaturedListing, load_featured_listing, merge_featured};
pub use fetcher::{FetchEpoch, FetchState, ListingStatus, RemoteListFetcher};
pub use leads::{LeadListing, LeadMode, LeadRecord};
pub use memory::MemorySource;
pub use result::{EmptyState, ListResult};
pub use session::{ListingCommand, ListingHandle, ListingSession, ListingSnapshot};
pub use store::{FieldFilter, ListSource, StoreQuery};
