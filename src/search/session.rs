use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::project::ProjectSearchResults;

/// Token identifying one search request within a [`SearchSession`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Results applied to the session, with the ticket that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedSearch {
    pub ticket: SearchTicket,
    pub term: String,
    pub results: ProjectSearchResults,
}

/// Per-caller search context.
///
/// Every new search takes a ticket from [`SearchSession::begin`], which supersedes all
/// earlier tickets. Results are only applied when their ticket is still the newest, so a
/// slow search finishing late can never overwrite the results of a later one. In-flight
/// work is not cancelled; stale results are discarded on arrival.
#[derive(Debug, Default)]
pub struct SearchSession {
    generation: AtomicU64,
    latest: Mutex<Option<PublishedSearch>>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, superseding any in flight
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Apply results if `ticket` is still current.
    ///
    /// Returns `false` when the results are stale and were dropped.
    pub fn publish(&self, ticket: SearchTicket, term: &str, results: ProjectSearchResults) -> bool {
        let mut latest = self.latest.lock();
        // Checked under the lock so a concurrent publish cannot interleave
        if !self.is_current(ticket) {
            return false;
        }
        *latest = Some(PublishedSearch { ticket, term: term.to_string(), results });
        true
    }

    /// Most recently applied results
    pub fn latest(&self) -> Option<PublishedSearch> {
        self.latest.lock().clone()
    }

    /// Forget applied results and invalidate in-flight searches
    pub fn clear(&self) {
        let mut latest = self.latest.lock();
        self.generation.fetch_add(1, Ordering::SeqCst);
        *latest = None;
    }
}
