use crate::clock::Clock;
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::debug;

pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

/// Republishes the clock's time every period until stopped or dropped.
pub struct Ticker {
    now: watch::Receiver<i64>,
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn start(clock: Arc<dyn Clock>, period: Duration) -> Self {
        let (tx, now) = watch::channel(clock.now_ms());
        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(clock.now_ms()).is_err() {
                    break;
                }
            }
        });
        Self { now, handle }
    }

    /// Time of the most recent tick.
    pub fn now_ms(&self) -> i64 {
        *self.now.borrow()
    }

    pub fn stop(&self) {
        if !self.handle.is_finished() {
            debug!("stopping ticker");
        }
        self.handle.abort();
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
