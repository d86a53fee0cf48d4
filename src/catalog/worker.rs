use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use super::fetch::CatalogError;
use super::model::Track;

/// Result of one catalog fetch, tagged with its request's sequence number.
///
/// Sequence numbers increase monotonically per request. The event loop
/// applies an outcome only when its number is newer than the last applied
/// one, so overlapping refreshes resolve last-requested-wins.
pub struct FetchOutcome {
    pub seq: u64,
    pub result: Result<Vec<Track>, CatalogError>,
}

struct FetchRequest {
    seq: u64,
}

/// Handle to the background fetch worker thread.
///
/// The worker processes requests serially and exits when the handle is
/// dropped.
pub struct CatalogFetcher {
    tx: Sender<FetchRequest>,
    outcomes: Receiver<FetchOutcome>,
    next_seq: u64,
}

impl CatalogFetcher {
    /// Spawn a worker running `fetch` for every queued request.
    pub fn spawn<F>(mut fetch: F) -> Self
    where
        F: FnMut() -> Result<Vec<Track>, CatalogError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<FetchRequest>();
        let (outcome_tx, outcomes) = mpsc::channel::<FetchOutcome>();

        thread::spawn(move || {
            while let Ok(req) = rx.recv() {
                let result = fetch();
                let outcome = FetchOutcome {
                    seq: req.seq,
                    result,
                };
                if outcome_tx.send(outcome).is_err() {
                    break;
                }
            }
        });

        Self {
            tx,
            outcomes,
            next_seq: 0,
        }
    }

    /// Queue a fetch and return its sequence number.
    pub fn request(&mut self) -> u64 {
        self.next_seq += 1;
        let _ = self.tx.send(FetchRequest { seq: self.next_seq });
        self.next_seq
    }

    /// Poll for a completed fetch without blocking.
    pub fn try_recv(&self) -> Option<FetchOutcome> {
        self.outcomes.try_recv().ok()
    }

    /// Wait up to `timeout` for a completed fetch.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchOutcome> {
        self.outcomes.recv_timeout(timeout).ok()
    }
}
