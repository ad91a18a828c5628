//! Debounced, cancel-on-supersede place search.
//!
//! A [`SearchCoordinator`] owns one logical request stream. Every call to
//! [`SearchCoordinator::input`] tears down whatever the stream was doing (a
//! pending debounce timer or an in-flight request) before starting over, so at
//! most one request is ever authoritative. Results are published through a
//! `watch` channel; a response is only published while its generation is still
//! the current one, checked under the same lock `input` takes.

use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{config::SearchConfig, error::WeatherError, model::Place, provider::PlaceSearch};

/// What the suggestion list should currently show.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Suggestions {
    #[default]
    Hidden,
    Shown(Vec<Place>),
}

impl Suggestions {
    fn from_places(places: Vec<Place>) -> Self {
        if places.is_empty() {
            Suggestions::Hidden
        } else {
            Suggestions::Shown(places)
        }
    }

    pub fn places(&self) -> &[Place] {
        match self {
            Suggestions::Hidden => &[],
            Suggestions::Shown(places) => places,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    /// Waiting out the debounce quiet period.
    Pending,
    InFlight,
}

#[derive(Debug)]
struct Stream {
    generation: u64,
    phase: SearchPhase,
    cancel: Option<CancellationToken>,
}

impl Stream {
    fn teardown(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.generation += 1;
        self.phase = SearchPhase::Idle;
    }
}

#[derive(Debug)]
struct Shared {
    client: Arc<dyn PlaceSearch>,
    debounce: Duration,
    count: usize,
    stream: Mutex<Stream>,
    updates: watch::Sender<Suggestions>,
}

#[derive(Debug)]
pub struct SearchCoordinator {
    shared: Arc<Shared>,
}

impl SearchCoordinator {
    pub fn new(client: Arc<dyn PlaceSearch>, settings: &SearchConfig) -> Self {
        let (updates, _) = watch::channel(Suggestions::Hidden);
        Self {
            shared: Arc::new(Shared {
                client,
                debounce: settings.debounce(),
                count: settings.suggestion_count,
                stream: Mutex::new(Stream {
                    generation: 0,
                    phase: SearchPhase::Idle,
                    cancel: None,
                }),
                updates,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
        self.shared.updates.subscribe()
    }

    pub fn suggestions(&self) -> Suggestions {
        self.shared.updates.borrow().clone()
    }

    pub fn phase(&self) -> SearchPhase {
        self.shared.stream.lock().phase
    }

    /// Feed one input event. Must be called from within a tokio runtime.
    ///
    /// A blank query sends nothing and hides the suggestions right away.
    pub fn input(&self, query: &str) {
        let query = query.trim();
        let mut stream = self.shared.stream.lock();
        stream.teardown();

        if query.is_empty() {
            self.shared.updates.send_replace(Suggestions::Hidden);
            return;
        }

        let token = CancellationToken::new();
        stream.cancel = Some(token.clone());
        stream.phase = SearchPhase::Pending;
        let generation = stream.generation;
        drop(stream);

        tokio::spawn(run_search(
            Arc::clone(&self.shared),
            query.to_string(),
            generation,
            token,
        ));
    }

    /// Drop any pending or in-flight search and hide the list, e.g. after the
    /// user picked a suggestion.
    pub fn dismiss(&self) {
        let mut stream = self.shared.stream.lock();
        stream.teardown();
        self.shared.updates.send_replace(Suggestions::Hidden);
    }
}

impl Drop for SearchCoordinator {
    fn drop(&mut self) {
        self.shared.stream.lock().teardown();
    }
}

async fn run_search(shared: Arc<Shared>, query: String, generation: u64, token: CancellationToken) {
    tokio::select! {
        _ = token.cancelled() => {
            debug!(%query, "debounced query dropped");
            return;
        }
        _ = tokio::time::sleep(shared.debounce) => {}
    }

    {
        let mut stream = shared.stream.lock();
        if stream.generation != generation {
            return;
        }
        stream.phase = SearchPhase::InFlight;
    }

    let outcome = tokio::select! {
        _ = token.cancelled() => Err(WeatherError::Cancelled),
        result = shared.client.search(&query, shared.count) => result,
    };

    let places = match outcome {
        Ok(places) => places,
        Err(err) if err.is_cancelled() => {
            debug!(%query, "search superseded by newer input");
            return;
        }
        Err(err) => {
            warn!(%query, error = %err, "place search failed");
            Vec::new()
        }
    };

    let mut stream = shared.stream.lock();
    if stream.generation != generation {
        debug!(%query, "discarding stale search response");
        return;
    }
    stream.phase = SearchPhase::Idle;
    stream.cancel = None;
    shared.updates.send_replace(Suggestions::from_places(places));
}

/// One-shot, non-debounced search. Failures are logged and reported as no
/// results.
pub async fn lookup_places(client: &dyn PlaceSearch, query: &str, count: usize) -> Vec<Place> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    match client.search(query, count).await {
        Ok(places) => places,
        Err(err) => {
            warn!(%query, error = %err, "place search failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeSearch;

    fn coordinator(client: &Arc<FakeSearch>) -> SearchCoordinator {
        SearchCoordinator::new(client.clone(), &SearchConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_typing_sends_only_the_last_query() {
        let client = Arc::new(FakeSearch::default());
        let coord = coordinator(&client);
        let mut rx = coord.subscribe();

        coord.input("Lon");
        tokio::time::sleep(Duration::from_millis(100)).await;
        coord.input("Lond");
        tokio::time::sleep(Duration::from_millis(250)).await;
        coord.input("London");
        assert_eq!(coord.phase(), SearchPhase::Pending);

        rx.changed().await.expect("coordinator alive");
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(client.calls(), vec!["London".to_string()]);
        assert_eq!(rx.borrow().places()[0].name, "London");
        assert_eq!(coord.phase(), SearchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_superseded_response_never_wins() {
        let client = Arc::new(
            FakeSearch::default()
                .with_delay("Paris", Duration::from_millis(500))
                .with_delay("Berlin", Duration::from_millis(10)),
        );
        let coord = coordinator(&client);
        let mut rx = coord.subscribe();

        coord.input("Paris");
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(coord.phase(), SearchPhase::InFlight);

        coord.input("Berlin");
        rx.changed().await.expect("coordinator alive");
        assert_eq!(rx.borrow().places()[0].name, "Berlin");

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(coord.suggestions().places().len(), 1);
        assert_eq!(coord.suggestions().places()[0].name, "Berlin");
        assert_eq!(client.calls(), vec!["Paris".to_string(), "Berlin".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_query_hides_without_network() {
        let client = Arc::new(FakeSearch::default());
        let coord = coordinator(&client);

        coord.input("Rome");
        tokio::time::sleep(Duration::from_millis(100)).await;
        coord.input("   ");
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(client.calls().is_empty());
        assert_eq!(coord.suggestions(), Suggestions::Hidden);
        assert_eq!(coord.phase(), SearchPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn failures_surface_as_no_results() {
        let client = Arc::new(FakeSearch::default().failing());
        let coord = coordinator(&client);
        let mut rx = coord.subscribe();

        coord.input("Oslo");
        rx.changed().await.expect("coordinator alive");

        assert_eq!(*rx.borrow(), Suggestions::Hidden);
        assert_eq!(client.calls(), vec!["Oslo".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_drops_in_flight_search() {
        let client = Arc::new(FakeSearch::default().with_delay("Lima", Duration::from_millis(500)));
        let coord = coordinator(&client);

        coord.input("Lima");
        tokio::time::sleep(Duration::from_millis(400)).await;
        coord.dismiss();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(client.calls(), vec!["Lima".to_string()]);
        assert_eq!(coord.suggestions(), Suggestions::Hidden);
    }

    #[tokio::test]
    async fn lookup_respects_count_and_swallows_errors() {
        let ok = FakeSearch::default();
        let places = lookup_places(&ok, "Tirana", 1).await;
        assert_eq!(places.len(), 1);

        let failing = FakeSearch::default().failing();
        assert!(lookup_places(&failing, "Tirana", 1).await.is_empty());

        assert!(lookup_places(&ok, "  ", 1).await.is_empty());
        assert_eq!(ok.calls(), vec!["Tirana".to_string()]);
    }
}
