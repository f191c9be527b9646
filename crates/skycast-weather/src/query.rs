//! Query generations.
//!
//! Every lookup takes a ticket. Starting a new lookup cancels the previous
//! ticket's token and bumps the generation, so a slow earlier query can
//! never overwrite the result of a later one.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;

/// Handle held by one in-flight query.
#[derive(Debug, Clone)]
pub struct QueryTicket {
    generation: u64,
    token: CancellationToken,
}

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Issues tickets and remembers which one is current.
#[derive(Debug, Default)]
pub struct QueryTracker {
    generation: AtomicU64,
    current: Mutex<Option<CancellationToken>>,
}

impl QueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new query, invalidating whichever one was in flight.
    pub fn begin(&self) -> QueryTicket {
        let token = CancellationToken::new();
        let mut current = self.current.lock();
        if let Some(previous) = current.replace(token.clone()) {
            previous.cancel();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        QueryTicket { generation, token }
    }

    /// True while no newer query has begun.
    pub fn is_current(&self, ticket: &QueryTicket) -> bool {
        !ticket.is_cancelled() && self.generation.load(Ordering::SeqCst) == ticket.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_ticket_is_current() {
        let tracker = QueryTracker::new();
        let ticket = tracker.begin();
        assert_eq!(ticket.generation(), 1);
        assert!(tracker.is_current(&ticket));
    }

    #[test]
    fn newer_ticket_supersedes_older() {
        let tracker = QueryTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        assert!(first.is_cancelled());
        assert!(!tracker.is_current(&first));
        assert!(tracker.is_current(&second));
        assert_eq!(second.generation(), 2);
    }

    #[test]
    fn generations_increase_monotonically() {
        let tracker = QueryTracker::new();
        let gens: Vec<u64> = (0..5).map(|_| tracker.begin().generation()).collect();
        assert_eq!(gens, vec![1, 2, 3, 4, 5]);
    }
}
