//! Background detail loads with last-request-wins delivery.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::catalog::model::{IdKey, QuestionDetail};
use crate::source::{self, DataSource, LoadError};

/// Issues monotonically increasing request tokens and remembers the newest.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RequestTracker {
    issued: u64,
    outstanding: Option<u64>,
}

impl RequestTracker {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.outstanding = Some(self.issued);
        self.issued
    }

    /// True only for the most recent outstanding request; accepting it settles it.
    pub fn accept(&mut self, token: u64) -> bool {
        if self.outstanding == Some(token) {
            self.outstanding = None;
            true
        } else {
            false
        }
    }

    pub fn in_flight(&self) -> bool {
        self.outstanding.is_some()
    }
}

#[derive(Debug)]
pub struct Completion {
    pub token: u64,
    pub id: IdKey,
    pub result: Result<QuestionDetail, LoadError>,
}

/// Runs each fetch on its own thread and hands back only current results.
#[derive(Debug)]
pub struct DetailLoader {
    source: Arc<dyn DataSource>,
    tracker: RequestTracker,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl DetailLoader {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            tracker: RequestTracker::default(),
            tx,
            rx,
        }
    }

    pub fn request(&mut self, id: IdKey) -> u64 {
        let token = self.tracker.issue();
        debug!(token, id = %id, "detail fetch issued");
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = source::fetch_detail(source.as_ref(), &id);
            // The receiver is gone once the view closed; nothing to deliver to.
            let _ = tx.send(Completion { token, id, result });
        });
        token
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.in_flight()
    }

    /// Drain finished fetches, keeping the one matching the newest request.
    pub fn poll(&mut self) -> Option<Completion> {
        let mut current = None;
        while let Ok(done) = self.rx.try_recv() {
            if let Some(c) = self.settle(done) {
                current = Some(c);
            }
        }
        current
    }

    /// Block up to `timeout` for the newest request to finish.
    pub fn wait(&mut self, timeout: Duration) -> Option<Completion> {
        let deadline = Instant::now() + timeout;
        while self.tracker.in_flight() {
            let left = deadline.checked_duration_since(Instant::now())?;
            match self.rx.recv_timeout(left) {
                Ok(done) => {
                    if let Some(c) = self.settle(done) {
                        return Some(c);
                    }
                }
                Err(_) => return None,
            }
        }
        None
    }

    fn settle(&mut self, done: Completion) -> Option<Completion> {
        if self.tracker.accept(done.token) {
            if let Err(err) = &done.result {
                warn!(id = %done.id, error = %err, "detail fetch failed");
            } else {
                debug!(id = %done.id, token = done.token, "detail fetch completed");
            }
            Some(done)
        } else {
            debug!(id = %done.id, token = done.token, "discarding stale detail response");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::MemorySource;

    #[test]
    fn tracker_accepts_only_newest_token() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue();
        let second = tracker.issue();
        assert!(tracker.in_flight());
        assert!(!tracker.accept(first));
        assert!(tracker.accept(second));
        assert!(!tracker.in_flight());
        assert!(!tracker.accept(second));
    }

    #[test]
    fn loader_delivers_latest_request() {
        let source = MemorySource::default()
            .with("1", r#"{"id":1,"title":"Two Sum","difficulty":"Easy","tags":[]}"#)
            .with(
                "2",
                r#"{"id":2,"title":"Add Two Numbers","difficulty":"Medium","tags":[]}"#,
            );
        let mut loader = DetailLoader::new(Arc::new(source));
        loader.request(IdKey::from(1u64));
        loader.request(IdKey::from(2u64));
        assert!(loader.is_loading());
        let done = loader.wait(Duration::from_secs(5)).expect("fetch completes");
        assert_eq!(done.id, IdKey::from(2u64));
        assert_eq!(done.result.unwrap().summary.title, "Add Two Numbers");
        assert!(!loader.is_loading());
        std::thread::sleep(Duration::from_millis(20));
        assert!(loader.poll().is_none());
    }

    #[test]
    fn loader_reports_fetch_errors_as_values() {
        let mut loader = DetailLoader::new(Arc::new(MemorySource::default()));
        loader.request(IdKey::from(9u64));
        let done = loader.wait(Duration::from_secs(5)).expect("fetch completes");
        assert_eq!(done.result.unwrap_err(), LoadError::Status { status: 404 });
    }
}
