//! Interactive listing: one event loop per screen.
//!
//! User intents and fetch completions are handled one at a time by a single
//! task. Text filter edits wait out a quiet period before a request is
//! issued; sort, page, retarget and refresh go out immediately. The visible
//! state is published as a [`ListingSnapshot`] on a `watch` channel.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};

use crate::domain::row::{Field, Row, RowKind};
use crate::listing::config::ListingConfig;
use crate::listing::controller::ListQueryController;
use crate::listing::descriptor::QueryDescriptor;
use crate::listing::errors::ListingError;
use crate::listing::fetcher::{
    Completion, FetchCompletion, FetchEpoch, FetchState, ListingStatus, RemoteListFetcher,
};
use crate::listing::result::{EmptyState, ListResult};
use crate::listing::store::ListSource;

#[derive(Clone, Debug)]
pub enum ListingCommand {
    SetFilter { field: Field, value: String },
    ToggleSort(Field),
    SetPage(usize),
    /// Re-fetch the current descriptor, e.g. after a create/update/delete.
    Refresh,
    /// Switch to another screen declaration (see
    /// [`ListQueryController::retarget`]).
    Retarget(ListingConfig),
}

/// Everything a screen needs to render one listing.
#[derive(Clone, Debug, Serialize)]
pub struct ListingSnapshot {
    pub kind: RowKind,
    pub descriptor: QueryDescriptor,
    pub status: ListingStatus,
    /// Last applied result; stays populated while loading or after a failure.
    pub result: Option<ListResult<Row>>,
    pub total_pages: Option<usize>,
    /// Set only when the latest result is applied and has no rows.
    pub empty: Option<EmptyState>,
    pub epoch: FetchEpoch,
}

/// Client side of a running [`ListingSession`].
#[derive(Clone)]
pub struct ListingHandle {
    commands: mpsc::UnboundedSender<ListingCommand>,
    snapshots: watch::Receiver<ListingSnapshot>,
}

impl ListingHandle {
    pub fn send(&self, command: ListingCommand) -> Result<(), ListingError> {
        self.commands
            .send(command)
            .map_err(|_| ListingError::SessionClosed)
    }

    pub fn set_filter(&self, field: Field, value: impl Into<String>) -> Result<(), ListingError> {
        self.send(ListingCommand::SetFilter {
            field,
            value: value.into(),
        })
    }

    pub fn toggle_sort(&self, field: Field) -> Result<(), ListingError> {
        self.send(ListingCommand::ToggleSort(field))
    }

    pub fn set_page(&self, page: usize) -> Result<(), ListingError> {
        self.send(ListingCommand::SetPage(page))
    }

    pub fn refresh(&self) -> Result<(), ListingError> {
        self.send(ListingCommand::Refresh)
    }

    pub fn retarget(&self, config: ListingConfig) -> Result<(), ListingError> {
        self.send(ListingCommand::Retarget(config))
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Resolves with the first published snapshot satisfying `predicate`.
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&ListingSnapshot) -> bool,
    ) -> Result<ListingSnapshot, ListingError> {
        self.snapshots
            .wait_for(predicate)
            .await
            .map(|snapshot| snapshot.clone())
            .map_err(|_| ListingError::SessionClosed)
    }
}

enum Dispatch {
    Debounce,
    Now,
    Ignore,
}

pub struct ListingSession<S: ?Sized> {
    controller: ListQueryController,
    state: FetchState,
    fetcher: RemoteListFetcher<S>,
    debounce: Duration,
    replies: mpsc::UnboundedSender<FetchCompletion>,
    snapshots: watch::Sender<ListingSnapshot>,
}

impl<S> ListingSession<S>
where
    S: ListSource + ?Sized + 'static,
{
    /// Starts the event loop on the current tokio runtime and issues the
    /// first load. The loop ends once every handle is dropped.
    pub fn spawn(config: ListingConfig, source: Arc<S>, debounce: Duration) -> ListingHandle {
        let controller = ListQueryController::new(config);
        let state = FetchState::new();
        let (snapshot_tx, snapshot_rx) = watch::channel(snapshot(&controller, &state));
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();

        let session = Self {
            controller,
            state,
            fetcher: RemoteListFetcher::new(source),
            debounce,
            replies: reply_tx,
            snapshots: snapshot_tx,
        };
        tokio::spawn(session.run(command_rx, reply_rx));

        ListingHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<ListingCommand>,
        mut replies: mpsc::UnboundedReceiver<FetchCompletion>,
    ) {
        self.issue();
        self.publish();

        let mut deadline: Option<Instant> = None;
        loop {
            tokio::select! {
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    match self.dispatch(command) {
                        Dispatch::Debounce => deadline = Some(Instant::now() + self.debounce),
                        Dispatch::Now => {
                            deadline = None;
                            self.issue();
                        }
                        Dispatch::Ignore => {}
                    }
                    self.publish();
                }
                Some(completion) = replies.recv() => {
                    self.complete(completion);
                    self.publish();
                }
                () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    deadline = None;
                    self.issue();
                    self.publish();
                }
            }
        }

        log::debug!("Listing session for {} closed", self.controller.kind());
    }

    fn dispatch(&mut self, command: ListingCommand) -> Dispatch {
        match command {
            ListingCommand::SetFilter { field, value } => {
                match self.controller.set_filter(field, value) {
                    Ok(true) => {
                        self.state.supersede();
                        Dispatch::Debounce
                    }
                    Ok(false) => Dispatch::Ignore,
                    Err(err) => {
                        log::warn!("Ignoring filter edit: {err}");
                        Dispatch::Ignore
                    }
                }
            }
            ListingCommand::ToggleSort(field) => match self.controller.toggle_sort(field) {
                Ok(_) => Dispatch::Now,
                Err(err) => {
                    log::warn!("Ignoring sort toggle: {err}");
                    Dispatch::Ignore
                }
            },
            ListingCommand::SetPage(page) => {
                let before = self.controller.descriptor().page();
                let after = self.controller.set_page(page);
                let failed = matches!(self.state.status(), ListingStatus::Failed(_));
                if after != before || failed {
                    Dispatch::Now
                } else {
                    Dispatch::Ignore
                }
            }
            ListingCommand::Refresh => Dispatch::Now,
            ListingCommand::Retarget(config) => {
                self.controller.retarget(config);
                Dispatch::Now
            }
        }
    }

    fn issue(&mut self) {
        let epoch = self.state.begin();
        let kind = self.controller.kind();
        let descriptor = self.controller.descriptor().clone();
        log::debug!("Issuing {kind} fetch {epoch} for page {}", descriptor.page());
        self.fetcher
            .spawn(epoch, kind, descriptor, self.replies.clone());
    }

    fn complete(&mut self, completion: FetchCompletion) {
        let total = completion
            .outcome
            .as_ref()
            .ok()
            .map(|result| result.total_count);
        let applied = self.state.complete(completion.epoch, completion.outcome);
        let Some(total) = total else { return };
        if applied == Completion::Applied && self.controller.observe_total(total) {
            // The page fell past the end, e.g. after a delete.
            self.issue();
        }
    }

    fn publish(&self) {
        self.snapshots
            .send_replace(snapshot(&self.controller, &self.state));
    }
}

fn snapshot(controller: &ListQueryController, state: &FetchState) -> ListingSnapshot {
    let status = state.status();
    let result = state.result().cloned();
    let empty = match (&status, &result) {
        (ListingStatus::Ready, Some(result)) => {
            EmptyState::classify(result, controller.descriptor())
        }
        _ => None,
    };
    ListingSnapshot {
        kind: controller.kind(),
        descriptor: controller.descriptor().clone(),
        status,
        result,
        total_pages: controller.total_pages(),
        empty,
        epoch: state.latest_epoch(),
    }
}
