use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::sync::{oneshot, watch};

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::engine::spin::{PickStart, Settlement, SpinId};
use crate::engine::state::{EngineSnapshot, EngineState};
use crate::engine::ticks::TickSource;
use crate::error::Result;
use crate::models::{CrowdType, Justification, Preferences};
use crate::recommend::{JustificationRequest, RecommendationClient};

/// What a pick request led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Settled(Settlement),
    /// No spin was run by this request.
    Ignored,
}

/// Drives [`EngineState`] through real (or injected) time and delivers
/// justifications from background fetches.
///
/// Only the fetch for the latest settle is kept. Starting another spin drops
/// the receiver of the previous one, so its result never reaches the state.
///
/// Every transition publishes a fresh [`EngineSnapshot`] on a watch channel.
pub struct SelectionEngine<T: TickSource> {
    catalog: Arc<Catalog>,
    state: EngineState,
    tick_interval: Duration,
    rng: StdRng,
    ticks: T,
    recommender: Arc<RecommendationClient>,
    in_flight: Option<(SpinId, oneshot::Receiver<Justification>)>,
    snapshots: watch::Sender<EngineSnapshot>,
}

impl<T: TickSource> SelectionEngine<T> {
    pub fn new(
        catalog: Arc<Catalog>,
        config: &EngineConfig,
        ticks: T,
        recommender: Arc<RecommendationClient>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = EngineState::new(config.tick_count);
        let (snapshots, _) = watch::channel(state.snapshot(&catalog));

        Self {
            catalog,
            state,
            tick_interval: config.tick_interval(),
            rng,
            ticks,
            recommender,
            in_flight: None,
            snapshots,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn ticks(&self) -> &T {
        &self.ticks
    }

    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.state.set_preferences(preferences);
        self.publish();
    }

    pub fn set_only_vegetarian(&mut self, only_vegetarian: bool) {
        self.state.set_only_vegetarian(only_vegetarian);
        self.publish();
    }

    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        let excluded = self.state.toggle_tag(tag);
        self.publish();
        excluded
    }

    pub fn set_crowd_type(&mut self, crowd: Option<CrowdType>) -> bool {
        let changed = self.state.set_crowd_type(crowd);
        if changed {
            self.publish();
        }
        changed
    }

    /// Run one full spin: filter, tick, settle, then fire off the
    /// justification request without waiting for it.
    pub async fn pick(&mut self) -> Result<PickOutcome> {
        self.apply_ready_justification();

        let PickStart::Started { .. } = self.state.request_pick(&self.catalog)? else {
            return Ok(PickOutcome::Ignored);
        };
        self.publish();

        for _ in 0..self.state.tick_count() {
            self.ticks.wait(self.tick_interval).await;
            self.state.tick(&mut self.rng);
            self.publish();
        }

        let Some(settlement) = self.state.settle(&mut self.rng) else {
            tracing::error!("spin finished its ticks but could not settle");
            return Ok(PickOutcome::Ignored);
        };
        self.publish();

        self.request_justification(&settlement);
        Ok(PickOutcome::Settled(settlement))
    }

    fn request_justification(&mut self, settlement: &Settlement) {
        let request = JustificationRequest::new(settlement.item.name.clone(), settlement.crowd);
        let recommender = Arc::clone(&self.recommender);
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let justification = recommender.justify(&request).await;
            // The receiver is gone once a newer spin has started.
            let _ = tx.send(justification);
        });
        self.in_flight = Some((settlement.id, rx));
    }

    /// Apply the justification if it has already arrived, without waiting.
    /// Returns `true` when one was accepted.
    pub fn apply_ready_justification(&mut self) -> bool {
        let Some((id, rx)) = self.in_flight.as_mut() else {
            return false;
        };
        let id = *id;

        match rx.try_recv() {
            Ok(justification) => {
                self.in_flight = None;
                self.accept(id, justification)
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Closed) => {
                self.in_flight = None;
                self.abandon();
                false
            }
        }
    }

    /// Wait until the current settle has its justification.
    ///
    /// Returns `None` when nothing is pending, e.g. after a crowd change, or
    /// when the fetch task died before answering.
    pub async fn wait_for_justification(&mut self) -> Option<Justification> {
        if self.state.justification_pending() {
            // Borrow rather than take, so a cancelled wait keeps the receiver.
            let received = match self.in_flight.as_mut() {
                Some((id, rx)) => {
                    let id = *id;
                    rx.await.ok().map(|justification| (id, justification))
                }
                None => None,
            };
            self.in_flight = None;
            match received {
                Some((id, justification)) => {
                    self.accept(id, justification);
                }
                None => self.abandon(),
            }
        }
        self.state.justification().cloned()
    }

    fn accept(&mut self, id: SpinId, justification: Justification) -> bool {
        let applied = self.state.apply_justification(id, justification);
        if applied {
            self.publish();
        }
        applied
    }

    fn abandon(&mut self) {
        if self.state.abandon_justification() {
            self.publish();
        }
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.snapshot(&self.catalog));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::spin::SpinState;
    use crate::engine::ticks::ImmediateTicks;
    use crate::error::{PickError, RecommendError};
    use crate::models::Item;
    use crate::recommend::TextGenerator;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::{Mutex, oneshot};

    /// Holds the first request until the gate opens; later ones answer at once.
    struct Gated {
        gate: Mutex<Option<oneshot::Receiver<()>>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for Gated {
        fn name(&self) -> &str {
            "gated"
        }

        async fn generate(
            &self,
            request: &JustificationRequest,
        ) -> std::result::Result<Justification, RecommendError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == 0 {
                let gate = self.gate.lock().await.take();
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
            }
            Ok(Justification::new(
                format!("call {} for {}", call, request.item_name),
                "test",
            ))
        }
    }

    /// Never answers.
    struct Stalled;

    #[async_trait]
    impl TextGenerator for Stalled {
        fn name(&self) -> &str {
            "stalled"
        }

        async fn generate(
            &self,
            _request: &JustificationRequest,
        ) -> std::result::Result<Justification, RecommendError> {
            std::future::pending().await
        }
    }

    struct Crashing;

    #[async_trait]
    impl TextGenerator for Crashing {
        fn name(&self) -> &str {
            "crashing"
        }

        async fn generate(
            &self,
            _request: &JustificationRequest,
        ) -> std::result::Result<Justification, RecommendError> {
            panic!("generator crashed")
        }
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new(
            vec![
                Item::new("A", "🥗", "Healthy", true, &[]),
                Item::new("B", "🌶️", "Spicy", false, &["spicy"]),
                Item::new("C", "🍚", "Plain", false, &[]),
            ],
            vec![],
        ))
    }

    fn config() -> EngineConfig {
        EngineConfig {
            tick_count: 5,
            seed: Some(17),
            ..EngineConfig::default()
        }
    }

    fn engine(recommender: RecommendationClient) -> SelectionEngine<ImmediateTicks> {
        SelectionEngine::new(
            catalog(),
            &config(),
            ImmediateTicks::default(),
            Arc::new(recommender),
        )
    }

    #[tokio::test]
    async fn test_pick_runs_configured_ticks_and_settles() {
        let mut engine = engine(RecommendationClient::offline());
        let outcome = engine.pick().await.unwrap();

        let PickOutcome::Settled(settlement) = outcome else {
            panic!("expected a settled pick");
        };
        assert_eq!(engine.ticks().waits, 5);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.state, SpinState::Settled);
        assert_eq!(snapshot.settled.as_ref(), Some(&settlement.item));
        assert!(snapshot.justification_pending);
        assert_eq!(snapshot.history, vec![settlement.item.clone()]);
    }

    #[tokio::test]
    async fn test_justification_arrives_after_settle() {
        let mut engine = engine(RecommendationClient::offline());
        engine.pick().await.unwrap();

        let justification = engine.wait_for_justification().await;
        assert!(justification.is_some());

        let snapshot = engine.snapshot();
        assert!(!snapshot.justification_pending);
        assert_eq!(snapshot.justification, justification);
    }

    #[tokio::test]
    async fn test_late_justification_for_previous_spin_is_dropped() {
        let (open, gate) = oneshot::channel();
        let generator = Gated {
            gate: Mutex::new(Some(gate)),
            calls: AtomicUsize::new(0),
        };
        let mut engine = engine(RecommendationClient::new(Box::new(generator)));

        engine.pick().await.unwrap();
        // Let the first fetch start and block on the gate.
        tokio::task::yield_now().await;
        let PickOutcome::Settled(second) = engine.pick().await.unwrap() else {
            panic!("expected a settled pick");
        };
        open.send(()).unwrap();

        let justification = engine.wait_for_justification().await.unwrap();
        assert_eq!(
            justification.reason,
            format!("call 1 for {}", second.item.name)
        );
    }

    #[tokio::test]
    async fn test_empty_set_reports_error_without_publishing() {
        let meat_only = Catalog::new(catalog().items()[1..].to_vec(), vec![]);
        let mut engine = SelectionEngine::new(
            Arc::new(meat_only),
            &config(),
            ImmediateTicks::default(),
            Arc::new(RecommendationClient::offline()),
        );
        engine.set_only_vegetarian(true);
        let rx = engine.subscribe();

        let err = engine.pick().await.unwrap_err();
        assert!(matches!(err, PickError::EmptyEligibleSet));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(engine.ticks().waits, 0);
        assert_eq!(engine.snapshot().state, SpinState::Idle);
    }

    #[tokio::test]
    async fn test_crowd_change_drops_pending_justification() {
        let mut engine = engine(RecommendationClient::offline());
        engine.pick().await.unwrap();
        assert!(engine.set_crowd_type(Some(CrowdType::MuscleGain)));

        assert!(engine.wait_for_justification().await.is_none());
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.state, SpinState::Idle);
        assert!(snapshot.current_display.is_none());
    }

    #[tokio::test]
    async fn test_second_pick_settles_while_first_fetch_is_held() {
        let (open, gate) = oneshot::channel();
        let generator = Gated {
            gate: Mutex::new(Some(gate)),
            calls: AtomicUsize::new(0),
        };
        let mut engine = engine(RecommendationClient::new(Box::new(generator)));

        let PickOutcome::Settled(first) = engine.pick().await.unwrap() else {
            panic!("expected a settled pick");
        };
        tokio::task::yield_now().await;
        assert!(!engine.apply_ready_justification());
        assert!(engine.snapshot().justification_pending);

        let PickOutcome::Settled(second) = engine.pick().await.unwrap() else {
            panic!("expected a settled pick");
        };
        assert_ne!(first.id, second.id);
        assert_eq!(engine.snapshot().state, SpinState::Settled);
        assert_eq!(engine.snapshot().settled, Some(second.item.clone()));

        // The second fetch answers while the first one is still held.
        tokio::task::yield_now().await;
        assert!(engine.apply_ready_justification());
        let snapshot = engine.snapshot();
        assert!(!snapshot.justification_pending);
        assert_eq!(
            snapshot.justification.map(|j| j.reason),
            Some(format!("call 1 for {}", second.item.name))
        );

        let _ = open.send(());
        tokio::task::yield_now().await;
        assert!(!engine.apply_ready_justification());
    }

    #[tokio::test]
    async fn test_stalled_fetch_leaves_engine_usable() {
        let mut engine = engine(RecommendationClient::new(Box::new(Stalled)));
        engine.pick().await.unwrap();

        let waited =
            tokio::time::timeout(Duration::from_millis(50), engine.wait_for_justification()).await;
        assert!(waited.is_err());
        // Giving up on the wait does not drop the fetch.
        assert!(!engine.apply_ready_justification());
        assert!(engine.snapshot().justification_pending);

        let outcome = engine.pick().await.unwrap();
        assert!(matches!(outcome, PickOutcome::Settled(_)));
        assert!(engine.snapshot().justification_pending);
    }

    #[tokio::test]
    async fn test_crashed_fetch_ends_the_wait() {
        let mut engine = engine(RecommendationClient::new(Box::new(Crashing)));
        engine.pick().await.unwrap();

        assert!(engine.wait_for_justification().await.is_none());
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.state, SpinState::Settled);
        assert!(!snapshot.justification_pending);
    }
}
