//! Periodic snapshot reload.
//!
//! A [`Refresher`] runs on its own thread and calls
//! [`MaintenanceEngine::refresh`] every interval. It stops when the
//! [`RefreshHandle`] is stopped or dropped, waking immediately rather than at
//! the end of the current interval.
//!
//! A failed refresh is logged and leaves the snapshot as it was; the loop
//! keeps going.

use crate::clock::Clock;
use crate::engine::MaintenanceEngine;
use crate::error::{Result, TrackerError};
use crate::store::RecordStore;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, warn};

pub struct Refresher;

/// Owning handle of a running refresher.
pub struct RefreshHandle {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl Refresher {
    /// Starts reloading `engine` every `interval`.
    ///
    /// `on_tick` runs after each attempt, with the engine still locked, and
    /// receives the error if the attempt failed.
    pub fn spawn<S, C, F>(
        engine: Arc<Mutex<MaintenanceEngine<S, C>>>,
        interval: Duration,
        mut on_tick: F,
    ) -> Result<RefreshHandle>
    where
        S: RecordStore + Send + 'static,
        C: Clock + Send + 'static,
        F: FnMut(&MaintenanceEngine<S, C>, Option<&TrackerError>) + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let thread = thread::Builder::new()
            .name("oiltrack-refresh".to_string())
            .spawn(move || {
                debug!(?interval, "refresher started");
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }

                    let Ok(mut guard) = engine.lock() else {
                        error!("engine lock poisoned, stopping refresher");
                        break;
                    };
                    let outcome = guard.refresh();
                    if let Err(e) = &outcome {
                        warn!(error = %e, "refresh failed, keeping previous snapshot");
                    }
                    on_tick(&*guard, outcome.as_ref().err());
                }
                debug!("refresher stopped");
            })?;

        Ok(RefreshHandle {
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        })
    }
}

impl RefreshHandle {
    /// Stops the loop and waits for the thread to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // the receiver is gone if the loop already exited
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("refresher thread panicked");
            }
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{fields, StoreFixture};
    use crate::store::memory::InMemoryStore;

    const TICK: Duration = Duration::from_millis(10);
    const WAIT: Duration = Duration::from_secs(5);

    fn shared(store: InMemoryStore) -> Arc<Mutex<MaintenanceEngine<InMemoryStore>>> {
        let mut engine = MaintenanceEngine::new(store);
        engine.init().unwrap();
        Arc::new(Mutex::new(engine))
    }

    #[test]
    fn picks_up_records_added_behind_the_engine() {
        let engine = shared(StoreFixture::new().with_vehicles(1).store);
        let (tx, rx) = mpsc::channel();
        let handle = Refresher::spawn(Arc::clone(&engine), TICK, move |e, _| {
            let _ = tx.send(e.records().len());
        })
        .unwrap();

        engine
            .lock()
            .unwrap()
            .store_mut()
            .create(&fields("Remote add", 0, 5000))
            .unwrap();

        let mut seen = 0;
        while seen != 2 {
            seen = rx.recv_timeout(WAIT).expect("refresher should tick");
        }
        handle.stop();
        assert_eq!(engine.lock().unwrap().records().len(), 2);
    }

    #[test]
    fn failed_refresh_is_reported_and_loop_continues() {
        let engine = shared(StoreFixture::new().with_vehicles(2).store);
        engine.lock().unwrap().store_mut().set_unreachable(true);

        let (tx, rx) = mpsc::channel();
        let handle = Refresher::spawn(Arc::clone(&engine), TICK, move |e, err| {
            let _ = tx.send((e.records().len(), err.map(|e| e.is_store_failure())));
        })
        .unwrap();

        assert_eq!(rx.recv_timeout(WAIT).unwrap(), (2, Some(true)));
        engine.lock().unwrap().store_mut().set_unreachable(false);

        let mut last = rx.recv_timeout(WAIT).unwrap();
        while last.1.is_some() {
            last = rx.recv_timeout(WAIT).unwrap();
        }
        assert_eq!(last, (2, None));
        drop(handle);
    }

    #[test]
    fn stop_returns_promptly_with_long_interval() {
        let engine = shared(InMemoryStore::new());
        let handle = Refresher::spawn(engine, Duration::from_secs(3600), |_, _| {}).unwrap();
        assert!(handle.is_running());

        let started = std::time::Instant::now();
        handle.stop();
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
