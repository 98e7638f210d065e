//! Latest-request-wins slots for fetched data.
//!
//! Each fetch takes a ticket from its slot. Starting another fetch on the
//! same slot bumps the generation, and a result carrying an older ticket is
//! discarded instead of overwriting newer state. Nothing is cancelled on the
//! network; only results are dropped.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

/// Proof that a fetch was started at a particular generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug)]
struct SlotState<T> {
    generation: u64,
    value: Option<T>,
}

/// Shared state written only by the most recently started fetch.
#[derive(Debug)]
pub struct FetchSlot<T> {
    state: Mutex<SlotState<T>>,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FetchSlot<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                generation: 0,
                value: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a fetch, making every earlier ticket stale.
    pub fn begin(&self) -> FetchTicket {
        let mut state = self.lock();
        state.generation += 1;
        FetchTicket {
            generation: state.generation,
        }
    }

    /// Invalidate in-flight fetches without starting a new one, e.g. when
    /// the input they were fetching for goes away.
    pub fn invalidate(&self) {
        self.begin();
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.lock().generation == ticket.generation
    }

    /// Store `value` if `ticket` is still current. Returns whether it was kept.
    pub fn commit(&self, ticket: FetchTicket, value: T) -> bool {
        let mut state = self.lock();
        if state.generation != ticket.generation {
            debug!(
                ticket = ticket.generation,
                current = state.generation,
                "discarding stale fetch result"
            );
            return false;
        }
        state.value = Some(value);
        true
    }

    /// Run `fetch` under a fresh ticket and commit its output.
    pub async fn fetch<F>(&self, fetch: F) -> bool
    where
        F: Future<Output = T>,
    {
        let ticket = self.begin();
        let value = fetch.await;
        self.commit(ticket, value)
    }

    pub fn clear(&self) {
        self.lock().value = None;
    }
}

impl<T: Clone> FetchSlot<T> {
    pub fn get(&self) -> Option<T> {
        self.lock().value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::oneshot;

    #[test]
    fn current_ticket_commits() {
        let slot = FetchSlot::new();
        let ticket = slot.begin();
        assert!(slot.is_current(ticket));
        assert!(slot.commit(ticket, "columns"));
        assert_eq!(slot.get(), Some("columns"));
    }

    #[test]
    fn older_ticket_is_discarded() {
        let slot = FetchSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(slot.commit(second, 2));
        assert!(!slot.commit(first, 1));
        assert_eq!(slot.get(), Some(2));
    }

    #[test]
    fn invalidate_drops_in_flight_result() {
        let slot = FetchSlot::new();
        let ticket = slot.begin();
        slot.invalidate();
        assert!(!slot.commit(ticket, "late"));
        assert_eq!(slot.get(), None);
    }

    #[tokio::test]
    async fn slow_fetch_does_not_overwrite_newer_one() {
        let slot = Arc::new(FetchSlot::new());
        let (release_slow, slow_rx) = oneshot::channel::<&'static str>();

        let slow = {
            let slot = Arc::clone(&slot);
            tokio::spawn(async move { slot.fetch(async { slow_rx.await.unwrap() }).await })
        };
        // Let the slow fetch take its ticket first.
        tokio::task::yield_now().await;
        while slot.lock().generation == 0 {
            tokio::task::yield_now().await;
        }

        assert!(slot.fetch(async { "board B" }).await);
        release_slow.send("board A").unwrap();

        assert!(!slow.await.unwrap());
        assert_eq!(slot.get(), Some("board B"));
    }
}
