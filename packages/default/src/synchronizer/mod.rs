//! Keeps a rendered mirror of the server's environment list.
//!
//! Every refresh fully replaces the mirror with the freshly fetched list.
//! Mutations always refresh afterwards, whether or not the mutation call
//! succeeded. A failed refresh leaves the previous mirror in place.

mod poller;

pub use poller::{PollHandle, follow_changes, spawn_polling};

use crate::api::{ApiError, EnvironmentApi};
use crate::render::RenderedList;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Results of a create/remove call and the refresh that followed it.
#[derive(Debug)]
pub struct MutationOutcome {
    pub mutation: Result<(), ApiError>,
    pub refresh: Result<usize, ApiError>,
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        self.mutation.is_ok() && self.refresh.is_ok()
    }

    /// Collapses to the first failure, mutation before refresh.
    pub fn into_result(self) -> Result<usize, ApiError> {
        self.mutation?;
        self.refresh
    }
}

pub struct EnvironmentSynchronizer<A> {
    api: A,
    view: watch::Sender<RenderedList>,
}

impl<A: EnvironmentApi> EnvironmentSynchronizer<A> {
    /// Starts with an empty mirror. Nothing is fetched until the first refresh.
    pub fn new(api: A) -> Self {
        let (view, _) = watch::channel(RenderedList::default());
        Self { api, view }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Copy of the current mirror.
    pub fn snapshot(&self) -> RenderedList {
        self.view.borrow().clone()
    }

    /// Receiver that is marked changed whenever a refresh alters the mirror.
    pub fn subscribe(&self) -> watch::Receiver<RenderedList> {
        self.view.subscribe()
    }

    /// Fetches the list and replaces the mirror with it.
    ///
    /// Returns the number of rendered entries. On failure the mirror is left
    /// untouched. Overlapping refreshes are not ordered: the last response to
    /// arrive wins.
    pub async fn refresh(&self) -> Result<usize, ApiError> {
        let records = match self.api.list().await {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    kind = e.kind(),
                    "⚠️ Environment refresh failed, keeping previous list: {e}"
                );
                return Err(e);
            }
        };

        let rendered = RenderedList::render(&records);
        let count = rendered.len();
        let changed = self.view.send_if_modified(|current| {
            if *current == rendered {
                false
            } else {
                *current = rendered;
                true
            }
        });

        debug!(
            "Refreshed environment list: {} entries (changed: {})",
            count, changed
        );
        Ok(count)
    }

    /// Requests a new environment, then refreshes unconditionally.
    pub async fn create(&self) -> MutationOutcome {
        info!("➕ Requesting new environment");
        let mutation = self.api.create().await;
        if let Err(e) = &mutation {
            warn!(kind = e.kind(), "⚠️ Create request failed: {e}");
        }

        MutationOutcome {
            mutation,
            refresh: self.refresh().await,
        }
    }

    /// Requests deletion of `id`, then refreshes unconditionally.
    ///
    /// `id` is not checked against the mirror; an unknown id is left to the
    /// service to reject.
    pub async fn remove(&self, id: &str) -> MutationOutcome {
        info!("🗑️ Requesting take-down of environment {}", id);
        let mutation = self.api.remove(id).await;
        if let Err(e) = &mutation {
            warn!(kind = e.kind(), "⚠️ Take-down of {} failed: {e}", id);
        }

        MutationOutcome {
            mutation,
            refresh: self.refresh().await,
        }
    }
}
