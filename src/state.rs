use crate::clock::Clock;
use crate::presenter::Presenter;
use crate::storage::KvStore;
use crate::ticker::{TICK_PERIOD, Ticker};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub presenter: Arc<Mutex<Presenter>>,
    pub ticker: Arc<Ticker>,
}

impl AppState {
    /// Seeds the presenter from `store` and starts the one-second ticker.
    pub fn new(store: KvStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            presenter: Arc::new(Mutex::new(Presenter::load(store))),
            ticker: Arc::new(Ticker::start(clock, TICK_PERIOD)),
        }
    }

    pub fn now_ms(&self) -> i64 {
        self.ticker.now_ms()
    }

    pub fn shutdown(&self) {
        self.ticker.stop();
    }
}
