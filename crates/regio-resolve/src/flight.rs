//! Single-flight gate for cache misses.
//!
//! The first miss for a `(level, parent id)` becomes the leader and fills the
//! level. Misses that arrive while it runs become followers: they wait for the
//! leader's outcome and share it instead of fetching again. A leader that is
//! dropped without publishing (cancelled or panicked) releases its followers
//! empty-handed so one of them can take over.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use regio_core::{Level, ResolveRequest};
use tokio::sync::watch;

/// Identity of one cacheable level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlightKey {
    pub level: Level,
    pub parent_id: Option<i64>,
}

impl From<&ResolveRequest> for FlightKey {
    fn from(request: &ResolveRequest) -> Self {
        Self {
            level: request.level(),
            parent_id: request.parent_id(),
        }
    }
}

type Outcome<T> = watch::Sender<Option<T>>;

#[derive(Debug)]
pub struct FlightGate<T> {
    slots: Mutex<HashMap<FlightKey, Outcome<T>>>,
}

impl<T> Default for FlightGate<T> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

/// Role handed out by [`FlightGate::enter`].
pub enum Flight<'a, T> {
    Leader(Leader<'a, T>),
    Follower(Follower<T>),
}

impl<T> FlightGate<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lead the flight for `key`, or follow the one already running.
    pub fn enter(&self, key: FlightKey) -> Flight<'_, T> {
        let mut slots = self.slots();
        if let Some(outcome) = slots.get(&key) {
            return Flight::Follower(Follower {
                rx: outcome.subscribe(),
            });
        }
        let (tx, _) = watch::channel(None);
        slots.insert(key, tx);
        Flight::Leader(Leader {
            gate: self,
            key,
            published: false,
        })
    }

    /// Number of flights currently led.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.slots().len()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<FlightKey, Outcome<T>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self, key: FlightKey, outcome: Option<T>) {
        let Some(tx) = self.slots().remove(&key) else {
            return;
        };
        if let Some(outcome) = outcome {
            tx.send_replace(Some(outcome));
        }
    }
}

pub struct Leader<'a, T> {
    gate: &'a FlightGate<T>,
    key: FlightKey,
    published: bool,
}

impl<T> Leader<'_, T> {
    /// Hand `outcome` to every follower and close the flight.
    pub fn publish(mut self, outcome: T) {
        self.published = true;
        self.gate.release(self.key, Some(outcome));
    }
}

impl<T> Drop for Leader<'_, T> {
    fn drop(&mut self) {
        if !self.published {
            self.gate.release(self.key, None);
        }
    }
}

pub struct Follower<T> {
    rx: watch::Receiver<Option<T>>,
}

impl<T: Clone> Follower<T> {
    /// The leader's outcome, or `None` if it went away without one.
    pub async fn outcome(mut self) -> Option<T> {
        match self.rx.wait_for(Option::is_some).await {
            Ok(outcome) => outcome.clone(),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    const KEY: FlightKey = FlightKey {
        level: Level::City,
        parent_id: Some(1),
    };

    fn lead(gate: &FlightGate<u32>, key: FlightKey) -> Leader<'_, u32> {
        match gate.enter(key) {
            Flight::Leader(leader) => leader,
            Flight::Follower(_) => panic!("expected to lead {key:?}"),
        }
    }

    fn follow(gate: &FlightGate<u32>, key: FlightKey) -> Follower<u32> {
        match gate.enter(key) {
            Flight::Follower(follower) => follower,
            Flight::Leader(_) => panic!("expected to follow {key:?}"),
        }
    }

    #[test]
    fn slot_is_released_after_publish() {
        let gate = FlightGate::new();
        let leader = lead(&gate, KEY);
        assert_eq!(gate.in_flight(), 1);
        leader.publish(7);
        assert_eq!(gate.in_flight(), 0);

        // The next miss leads a fresh flight.
        let _again = lead(&gate, KEY);
    }

    #[test]
    fn distinct_keys_lead_independently() {
        let gate = FlightGate::new();
        let _a = lead(&gate, KEY);
        let _b = lead(
            &gate,
            FlightKey {
                parent_id: Some(2),
                ..KEY
            },
        );
        assert_eq!(gate.in_flight(), 2);
    }

    #[tokio::test]
    async fn followers_share_the_published_outcome() {
        let gate = Arc::new(FlightGate::new());
        let leader = lead(&gate, KEY);

        let waiters: Vec<_> = (0..4)
            .map(|_| tokio::spawn(follow(&gate, KEY).outcome()))
            .collect();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(waiters.iter().all(|w| !w.is_finished()));

        leader.publish(42);
        for waiter in waiters {
            assert_eq!(waiter.await.unwrap(), Some(42));
        }
    }

    #[tokio::test]
    async fn dropped_leader_releases_followers_empty() {
        let gate = FlightGate::new();
        let leader = lead(&gate, KEY);
        let follower = follow(&gate, KEY);

        drop(leader);
        assert_eq!(follower.outcome().await, None);
        assert_eq!(gate.in_flight(), 0);
    }

    #[test]
    fn key_ignores_remote_codes() {
        let a = ResolveRequest::Cities {
            province_id: 3,
            province_code: 19,
        };
        let b = ResolveRequest::Cities {
            province_id: 3,
            province_code: 99,
        };
        assert_eq!(FlightKey::from(&a), FlightKey::from(&b));
    }
}
