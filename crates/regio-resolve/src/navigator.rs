//! Owner-side driver for [`NavigationStateMachine`].
//!
//! The navigator owns the state machine. Each user action gets a ticket and
//! its resolve runs on a spawned task; the task sends the outcome back over a
//! channel and only the owner applies it, in [`Navigator::next_event`].
//!
//! The cancellation rules that follow from that:
//!
//! - A completion whose ticket is no longer the pending one (the user acted
//!   again) is dropped.
//! - If the navigator itself is gone, the send fails and the worker discards
//!   its result. The fetch is allowed to finish.
//! - A worker that panics still completes its ticket, as a failed load.

use std::sync::Arc;

use regio_core::entities::County;
use regio_core::{
    LevelView, Listing, NavError, NavState, NavigationStateMachine, RegionSource, RegionStore,
    Selection, Transition,
};
use tokio::sync::mpsc;

use crate::error::ResolveError;
use crate::resolver::CacheFirstResolver;

/// Identifies one dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Immediate result of a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A resolve is running; its outcome arrives through `next_event`.
    Loading(Ticket),
    /// The user picked a county. Nothing to load.
    Picked(County),
}

/// Outcome of a completed action, as seen by the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// The move was committed; here is the new view.
    Updated(LevelView),
    /// The move failed; the state is unchanged.
    LoadFailed(ResolveError),
}

#[derive(Debug)]
struct Completion {
    ticket: Ticket,
    result: Result<Listing, ResolveError>,
}

pub struct Navigator<S, R> {
    resolver: Arc<CacheFirstResolver<S, R>>,
    machine: NavigationStateMachine,
    root_title: String,
    next_ticket: u64,
    pending: Option<(Ticket, Transition)>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl<S, R> Navigator<S, R>
where
    S: RegionStore + 'static,
    R: RegionSource + 'static,
{
    pub fn new(resolver: Arc<CacheFirstResolver<S, R>>, root_title: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            resolver,
            machine: NavigationStateMachine::new(),
            root_title: root_title.into(),
            next_ticket: 0,
            pending: None,
            tx,
            rx,
        }
    }

    pub fn view(&self) -> LevelView {
        self.machine.view(&self.root_title)
    }

    pub const fn state(&self) -> &NavState {
        self.machine.state()
    }

    pub const fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Load (or reload) the current level. Also the manual retry after a
    /// failed load.
    pub fn refresh(&mut self) -> Ticket {
        self.dispatch(self.machine.reload())
    }

    /// Select item `index` of the current listing.
    ///
    /// # Errors
    ///
    /// Returns [`NavError`] if nothing is listed yet or `index` is out of range.
    pub fn select(&mut self, index: usize) -> Result<Step, NavError> {
        Ok(match self.machine.plan_select(index)? {
            Selection::Resolve(transition) => Step::Loading(self.dispatch(transition)),
            Selection::County(county) => {
                tracing::info!(name = %county.name, weather_id = %county.weather_id, "county selected");
                Step::Picked(county)
            }
        })
    }

    /// Go up one level. `None` at the province level.
    pub fn back(&mut self) -> Option<Ticket> {
        let transition = self.machine.plan_back()?;
        Some(self.dispatch(transition))
    }

    /// Wait for the pending action to complete and apply it.
    ///
    /// Returns `None` when nothing is pending.
    pub async fn next_event(&mut self) -> Option<NavEvent> {
        loop {
            let pending_ticket = self.pending.as_ref().map(|(ticket, _)| *ticket)?;
            let completion = self.rx.recv().await?;

            if completion.ticket != pending_ticket {
                tracing::debug!(ticket = ?completion.ticket, "discarding superseded result");
                continue;
            }
            let (_, transition) = self.pending.take()?;
            return Some(self.apply(transition, completion.result));
        }
    }

    fn apply(
        &mut self,
        transition: Transition,
        result: Result<Listing, ResolveError>,
    ) -> NavEvent {
        let outcome = result.and_then(|listing| {
            self.machine
                .commit(transition, listing)
                .map_err(ResolveError::from)
        });
        match outcome {
            Ok(()) => NavEvent::Updated(self.view()),
            Err(e) => {
                tracing::warn!(level = %self.machine.level(), error = %e, "load failed");
                NavEvent::LoadFailed(e)
            }
        }
    }

    fn dispatch(&mut self, transition: Transition) -> Ticket {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        let request = transition.request;
        if let Some((superseded, _)) = self.pending.replace((ticket, transition)) {
            tracing::debug!(?superseded, ?ticket, "action superseded");
        }

        let resolver = Arc::clone(&self.resolver);
        let worker = tokio::spawn(async move { resolver.resolve(&request).await });

        // Watch the worker so a panic still reaches the owner as a failure.
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = worker.await.unwrap_or_else(|e| {
                tracing::warn!(?ticket, error = %e, "resolve task stopped");
                Err(ResolveError::Interrupted(e.to_string()))
            });
            if tx.send(Completion { ticket, result }).is_err() {
                tracing::debug!(?ticket, "owner gone; dropping result");
            }
        });
        ticket
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use regio_core::{Level, MemoryRegionStore};

    use super::*;
    use crate::test_support::{ScriptedSource, china};

    type TestNavigator = Navigator<MemoryRegionStore, ScriptedSource>;

    fn navigator(source: ScriptedSource) -> TestNavigator {
        let resolver = CacheFirstResolver::new(Arc::new(MemoryRegionStore::new()), Arc::new(source));
        Navigator::new(Arc::new(resolver), "China")
    }

    async fn updated(nav: &mut TestNavigator) -> LevelView {
        match nav.next_event().await {
            Some(NavEvent::Updated(view)) => view,
            other => panic!("expected update, got {other:?}"),
        }
    }

    fn loading(step: Step) -> Ticket {
        match step {
            Step::Loading(ticket) => ticket,
            Step::Picked(county) => panic!("unexpected county {county:?}"),
        }
    }

    #[tokio::test]
    async fn initial_load_shows_provinces() {
        let mut nav = navigator(china());
        nav.refresh();
        assert!(nav.is_loading());

        let view = updated(&mut nav).await;
        assert_eq!(view.title, "China");
        assert_eq!(view.items, vec!["Beijing", "Shanghai"]);
        assert!(!view.show_back);
        assert!(!nav.is_loading());
        assert!(nav.next_event().await.is_none());
    }

    #[tokio::test]
    async fn drill_down_and_pick_county() {
        let mut nav = navigator(china());
        nav.refresh();
        updated(&mut nav).await;

        loading(nav.select(1).unwrap());
        let view = updated(&mut nav).await;
        assert_eq!(view.title, "Shanghai");
        assert!(view.show_back);

        loading(nav.select(0).unwrap());
        let view = updated(&mut nav).await;
        assert_eq!(view.level, Level::County);
        assert_eq!(view.items, vec!["Minhang", "Baoshan"]);

        match nav.select(1).unwrap() {
            Step::Picked(county) => assert_eq!(county.weather_id, "CN101020300"),
            Step::Loading(t) => panic!("unexpected load {t:?}"),
        }
        assert_eq!(nav.state().level(), Level::County);
    }

    #[tokio::test]
    async fn failed_select_keeps_level() {
        // No city list scripted for Beijing (11).
        let mut nav = navigator(china());
        nav.refresh();
        let before = updated(&mut nav).await;

        loading(nav.select(0).unwrap());
        match nav.next_event().await {
            Some(NavEvent::LoadFailed(e)) => assert_eq!(e.user_message(), "load failed"),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(nav.state(), &NavState::AtProvince);
        assert_eq!(nav.view(), before);
    }

    #[tokio::test]
    async fn back_round_trip_uses_cache() {
        let mut nav = navigator(china());
        nav.refresh();
        let provinces = updated(&mut nav).await;

        loading(nav.select(1).unwrap());
        updated(&mut nav).await;

        assert!(nav.back().is_some());
        let back = updated(&mut nav).await;
        assert_eq!(back, provinces);
        assert!(nav.back().is_none());

        // provinces + Shanghai cities; the way back was a cache hit.
        assert_eq!(nav.resolver.source().calls(), 2);
    }

    #[tokio::test]
    async fn superseded_action_is_discarded() {
        let mut nav = navigator(china().with_delay(Duration::from_millis(20)));
        nav.refresh();
        updated(&mut nav).await;

        let first = loading(nav.select(1).unwrap());
        // The user reloads before the city list arrives.
        let second = nav.refresh();
        assert!(second > first);

        let view = updated(&mut nav).await;
        assert_eq!(view.level, Level::Province);
        assert_eq!(nav.state(), &NavState::AtProvince);
    }

    #[tokio::test]
    async fn dropped_owner_discards_completion() {
        let source = china().with_delay(Duration::from_millis(20));
        let store = Arc::new(MemoryRegionStore::new());
        let resolver = Arc::new(CacheFirstResolver::new(Arc::clone(&store), Arc::new(source)));

        let mut nav = Navigator::new(Arc::clone(&resolver), "China");
        nav.refresh();
        drop(nav);

        // The fetch still completes and persists; nobody is told.
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(resolver.source().calls(), 1);
        assert_eq!(store.query_provinces().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn panicking_worker_reports_load_failed() {
        let mut nav = navigator(china().explode_on("china"));
        nav.refresh();

        let event = tokio::time::timeout(Duration::from_secs(2), nav.next_event())
            .await
            .expect("a stopped worker must still complete the action");
        match event {
            Some(NavEvent::LoadFailed(e)) => {
                assert!(matches!(e, ResolveError::Interrupted(_)), "got {e:?}");
                assert_eq!(e.user_message(), "load failed");
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(!nav.is_loading());
        assert_eq!(nav.state(), &NavState::AtProvince);
    }
}
