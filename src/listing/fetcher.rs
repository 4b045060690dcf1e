//! Remote list fetching with "latest request wins" semantics.
//!
//! Every issued request carries a [`FetchEpoch`]. A response is applied to
//! [`FetchState`] only while its epoch is still the newest one handed out;
//! anything older is dropped on arrival. There is no cancellation of requests
//! in flight.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::row::{Row, RowKind};
use crate::listing::descriptor::QueryDescriptor;
use crate::listing::errors::FetchError;
use crate::listing::result::ListResult;
use crate::listing::store::{ListSource, StoreQuery};

/// Monotonic token identifying request issuance order.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchEpoch(u64);

impl FetchEpoch {
    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for FetchEpoch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a screen should show about the state of its data.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum ListingStatus {
    /// Nothing requested yet.
    Idle,
    /// Waiting for the first result; nothing to show meanwhile.
    FirstLoad,
    /// Waiting for a newer result; the previous one stays visible.
    Loading,
    Ready,
    /// The latest request failed; the previous result stays visible.
    Failed(FetchError),
}

/// Outcome of handing a response to [`FetchState::complete`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Discarded,
}

/// A response tagged with the epoch of the request that produced it.
#[derive(Debug)]
pub struct FetchCompletion {
    pub epoch: FetchEpoch,
    pub outcome: Result<ListResult<Row>, FetchError>,
}

/// Visible list state plus the epoch bookkeeping guarding it.
#[derive(Clone, Debug, Default)]
pub struct FetchState {
    latest: FetchEpoch,
    applied: Option<FetchEpoch>,
    result: Option<ListResult<Row>>,
    error: Option<(FetchEpoch, FetchError)>,
}

impl FetchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the epoch for a request about to be issued. Every response
    /// for an earlier epoch becomes stale.
    pub fn begin(&mut self) -> FetchEpoch {
        self.latest = self.latest.next();
        self.latest
    }

    /// Marks responses in flight as stale without issuing a request, e.g.
    /// while a text filter edit waits out its debounce period.
    pub fn supersede(&mut self) -> FetchEpoch {
        self.begin()
    }

    pub fn latest_epoch(&self) -> FetchEpoch {
        self.latest
    }

    /// Last successfully applied result, kept across loads and failures.
    pub fn result(&self) -> Option<&ListResult<Row>> {
        self.result.as_ref()
    }

    pub fn status(&self) -> ListingStatus {
        if self.latest == FetchEpoch::default() {
            return ListingStatus::Idle;
        }
        if self.applied == Some(self.latest) {
            return ListingStatus::Ready;
        }
        match &self.error {
            Some((epoch, error)) if *epoch == self.latest => ListingStatus::Failed(error.clone()),
            _ if self.result.is_none() => ListingStatus::FirstLoad,
            _ => ListingStatus::Loading,
        }
    }

    /// Applies `outcome` if `epoch` is still the latest; otherwise drops it.
    pub fn complete(
        &mut self,
        epoch: FetchEpoch,
        outcome: Result<ListResult<Row>, FetchError>,
    ) -> Completion {
        if epoch != self.latest {
            log::debug!("Discarding stale response {epoch}, latest is {}", self.latest);
            return Completion::Discarded;
        }
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.applied = Some(epoch);
                self.error = None;
                Completion::Applied
            }
            Err(error) => {
                log::error!("List fetch {epoch} failed: {error}");
                self.error = Some((epoch, error));
                Completion::Failed
            }
        }
    }
}

/// Issues descriptor-driven requests against a [`ListSource`].
pub struct RemoteListFetcher<S: ?Sized> {
    source: Arc<S>,
}

impl<S: ?Sized> Clone for RemoteListFetcher<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S> RemoteListFetcher<S>
where
    S: ListSource + ?Sized + 'static,
{
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub async fn fetch(
        &self,
        kind: RowKind,
        descriptor: &QueryDescriptor,
    ) -> Result<ListResult<Row>, FetchError> {
        let query = StoreQuery::from_descriptor(kind, descriptor);
        log::debug!(
            "Fetching {kind}: {} filter(s), sort {} {}, offset {}, limit {}",
            query.filters.len(),
            query.sort.field,
            query.sort.direction,
            query.offset,
            query.limit
        );
        self.source.fetch_page(query).await
    }

    pub async fn fetch_featured(&self, kind: RowKind) -> Result<Option<Row>, FetchError> {
        self.source.fetch_featured(kind).await
    }

    /// Runs the request on its own task and posts the tagged outcome to
    /// `reply`. A closed `reply` just means nobody is listening any more.
    ///
    /// Every request posts exactly one completion: a request task that
    /// panics or is cancelled reports [`FetchError::Task`].
    pub fn spawn(
        &self,
        epoch: FetchEpoch,
        kind: RowKind,
        descriptor: QueryDescriptor,
        reply: mpsc::UnboundedSender<FetchCompletion>,
    ) -> JoinHandle<()> {
        let fetcher = self.clone();
        let request = tokio::spawn(async move { fetcher.fetch(kind, &descriptor).await });
        tokio::spawn(async move {
            let outcome = match request.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    log::error!("Fetch {epoch} for {kind} did not finish: {err}");
                    Err(FetchError::Task(err.to_string()))
                }
            };
            let _ = reply.send(FetchCompletion { epoch, outcome });
        })
    }
}
