use crate::commit::{self, CommitRejection};
use crate::errors::AppError;
use crate::models::{CommitRequest, CountdownResponse, DEFAULT_LABEL, DEFAULT_TIMESTAMP_MS, Event};
use crate::storage::KvStore;
use tracing::info;

pub const LABEL_KEY: &str = "eventName";
pub const TIMESTAMP_KEY: &str = "eventDate";

#[derive(Debug)]
pub enum CommitError {
    Rejected(CommitRejection),
    Storage(AppError),
}

impl From<CommitRejection> for CommitError {
    fn from(err: CommitRejection) -> Self {
        Self::Rejected(err)
    }
}

impl From<AppError> for CommitError {
    fn from(err: AppError) -> Self {
        Self::Storage(err)
    }
}

impl axum::response::IntoResponse for CommitError {
    fn into_response(self) -> axum::response::Response {
        match self {
            CommitError::Rejected(rejection) => rejection.into_response(),
            CommitError::Storage(err) => err.into_response(),
        }
    }
}

/// Owns the current event and the store it is persisted in.
#[derive(Debug)]
pub struct Presenter {
    store: KvStore,
    event: Event,
}

impl Presenter {
    pub fn load(store: KvStore) -> Self {
        let event = Event {
            label: store.load(LABEL_KEY, DEFAULT_LABEL.to_string()),
            timestamp_ms: store.load(TIMESTAMP_KEY, DEFAULT_TIMESTAMP_MS),
        };
        info!(label = %event.label, target_ms = event.timestamp_ms, "loaded event");
        Self { store, event }
    }

    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn view(&self, now_ms: i64) -> CountdownResponse {
        CountdownResponse::new(&self.event, now_ms)
    }

    /// Validates and persists a new label/date pair.
    ///
    /// Both entries are written with one flush; on any failure the current
    /// event is left as it was.
    pub async fn commit(&mut self, now_ms: i64, request: &CommitRequest) -> Result<&Event, CommitError> {
        let event = match commit::validate(now_ms, request) {
            Ok(event) => event,
            Err(rejection) => {
                info!(%rejection, "commit rejected");
                return Err(rejection.into());
            }
        };

        self.store.set(LABEL_KEY, &event.label)?;
        self.store.set(TIMESTAMP_KEY, &event.timestamp_ms)?;
        if let Err(err) = self.store.flush().await {
            self.store.set(LABEL_KEY, &self.event.label)?;
            self.store.set(TIMESTAMP_KEY, &self.event.timestamp_ms)?;
            return Err(err.into());
        }

        info!(label = %event.label, target_ms = event.timestamp_ms, "committed event");
        self.event = event;
        Ok(&self.event)
    }
}
