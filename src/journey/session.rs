//! Journey session — the in-memory transcript, progress tracker, and
//! captured form inputs for one chat, with broadcast fan-out to observers.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};

use super::message::Message;
use super::progress::{ProgressStep, ProgressTracker, StepStatus};
use super::JourneyId;

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// Events emitted as the session changes (WebSocket clients, tests).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    MessageAppended { message: Message },
    ThinkingUpdated { steps: Vec<String> },
    StepUpdated { index: usize, status: StepStatus },
    JourneyStarted { journey: JourneyId, steps: Vec<ProgressStep> },
    JourneyCompleted { journey: JourneyId },
    SessionReset,
    /// Full state sync (sent to each client on connect).
    Sync { snapshot: SessionSnapshot },
}

/// Serializable view of the session returned by dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_journey: Option<JourneyId>,
    pub steps: Vec<ProgressStep>,
    pub messages: Vec<Message>,
}

#[derive(Default)]
struct SessionState {
    active: Option<JourneyId>,
    tracker: ProgressTracker,
    messages: Vec<Message>,
    /// Form inputs captured across steps (e.g. the company name entered in
    /// an earlier stage, interpolated into the final success card).
    captured: HashMap<String, String>,
}

/// In-memory session backed by a broadcast channel for fan-out.
pub struct JourneySession {
    state: RwLock<SessionState>,
    tx: broadcast::Sender<SessionEvent>,
}

impl JourneySession {
    pub fn new() -> Arc<Self> {
        Self::with_capacity(DEFAULT_BROADCAST_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Arc<Self> {
        let (tx, _rx) = broadcast::channel(capacity);
        Arc::new(Self {
            state: RwLock::new(SessionState::default()),
            tx,
        })
    }

    /// Subscribe to session events. Each observer calls this.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Append a message to the transcript.
    ///
    /// Any transient thinking indicator is dropped first, so the indicator
    /// never survives past the next real message.
    pub async fn append(&self, message: Message) {
        debug_assert!(!message.is_thinking(), "use update_thinking for indicators");
        {
            let mut state = self.state.write().await;
            state.messages.retain(|m| !m.is_thinking());
            state.messages.push(message.clone());
        }
        debug!(kind = message.kind(), "Message appended");
        let _ = self.tx.send(SessionEvent::MessageAppended { message });
    }

    /// Replace (or create) the thinking indicator with the given steps.
    pub async fn update_thinking(&self, steps: Vec<String>) {
        {
            let mut state = self.state.write().await;
            state.messages.retain(|m| !m.is_thinking());
            state.messages.push(Message::thinking(steps.clone()));
        }
        let _ = self.tx.send(SessionEvent::ThinkingUpdated { steps });
    }

    /// Remove the thinking indicator without appending anything.
    pub async fn clear_thinking(&self) {
        let mut state = self.state.write().await;
        state.messages.retain(|m| !m.is_thinking());
    }

    /// Begin a journey: set it active and install a fresh tracker.
    ///
    /// The previous journey's completed tracker stays visible until the next
    /// journey starts, matching the transcript behavior.
    pub async fn begin_journey(&self, journey: JourneyId, labels: &[&str]) {
        let steps = {
            let mut state = self.state.write().await;
            state.active = Some(journey);
            state.tracker = ProgressTracker::new(labels);
            state.tracker.steps().to_vec()
        };
        info!(%journey, stages = steps.len(), "Journey started");
        let _ = self.tx.send(SessionEvent::JourneyStarted { journey, steps });
    }

    /// Close the active journey, leaving the tracker in place.
    pub async fn complete_journey(&self) {
        let journey = {
            let mut state = self.state.write().await;
            state.active.take()
        };
        if let Some(journey) = journey {
            info!(%journey, "Journey completed");
            let _ = self.tx.send(SessionEvent::JourneyCompleted { journey });
        }
    }

    /// Mark stage `index` in-progress.
    pub async fn start_step(&self, index: usize) {
        self.transition(index, true).await;
    }

    /// Mark stage `index` completed.
    pub async fn complete_step(&self, index: usize) {
        self.transition(index, false).await;
    }

    async fn transition(&self, index: usize, start: bool) {
        let result = {
            let mut state = self.state.write().await;
            let result = if start {
                state.tracker.start(index)
            } else {
                state.tracker.complete(index)
            };
            result.map(|()| state.tracker.status(index))
        };
        match result {
            Ok(Some(status)) => {
                let _ = self.tx.send(SessionEvent::StepUpdated { index, status });
            }
            Ok(None) => {}
            Err(e) => warn!("Ignoring invalid stage transition: {e}"),
        }
    }

    /// Remember a form input for later stages of the script.
    pub async fn capture(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut state = self.state.write().await;
        state.captured.insert(key.into(), value.into());
    }

    /// Recall a previously captured form input.
    pub async fn captured(&self, key: &str) -> Option<String> {
        self.state.read().await.captured.get(key).cloned()
    }

    pub async fn active_journey(&self) -> Option<JourneyId> {
        self.state.read().await.active
    }

    pub async fn message_count(&self) -> usize {
        self.state.read().await.messages.len()
    }

    pub async fn last_message(&self) -> Option<Message> {
        self.state.read().await.messages.last().cloned()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.read().await;
        SessionSnapshot {
            active_journey: state.active,
            steps: state.tracker.steps().to_vec(),
            messages: state.messages.clone(),
        }
    }

    /// Wipe the session back to empty.
    pub async fn reset(&self) {
        {
            let mut state = self.state.write().await;
            *state = SessionState::default();
        }
        info!("Session reset");
        let _ = self.tx.send(SessionEvent::SessionReset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_and_snapshot() {
        let session = JourneySession::new();
        session.append(Message::user("hello")).await;
        session.append(Message::agent("hi there")).await;

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[0].kind(), "user");
        assert_eq!(snapshot.messages[1].kind(), "agent");
        assert!(snapshot.active_journey.is_none());
    }

    #[tokio::test]
    async fn thinking_is_replaced_then_removed() {
        let session = JourneySession::new();
        session.update_thinking(vec!["Checking...".into()]).await;
        session
            .update_thinking(vec!["Checking...".into(), "Verifying...".into()])
            .await;
        // Still a single thinking entry
        assert_eq!(session.message_count().await, 1);

        session.append(Message::agent("done")).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.messages.len(), 1);
        assert_eq!(snapshot.messages[0].kind(), "agent");
    }

    #[tokio::test]
    async fn clear_thinking_removes_indicator() {
        let session = JourneySession::new();
        session.append(Message::user("hi")).await;
        session.update_thinking(vec!["...".into()]).await;
        session.clear_thinking().await;
        assert_eq!(session.message_count().await, 1);
    }

    #[tokio::test]
    async fn journey_lifecycle() {
        let session = JourneySession::new();
        session
            .begin_journey(JourneyId::BankAccount, &["A", "B"])
            .await;
        assert_eq!(session.active_journey().await, Some(JourneyId::BankAccount));

        session.start_step(0).await;
        session.complete_step(0).await;

        session.complete_journey().await;
        assert!(session.active_journey().await.is_none());

        // Tracker stays visible after completion
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.steps.len(), 2);
        assert_eq!(snapshot.steps[0].status, StepStatus::Completed);
    }

    #[tokio::test]
    async fn invalid_transition_is_ignored() {
        let session = JourneySession::new();
        session
            .begin_journey(JourneyId::BankAccount, &["A", "B"])
            .await;
        // Completing a pending stage is invalid; state must be unchanged
        session.complete_step(1).await;
        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.steps[1].status, StepStatus::Pending);
    }

    #[tokio::test]
    async fn broadcast_events_in_order() {
        let session = JourneySession::new();
        let mut rx = session.subscribe();

        session
            .begin_journey(JourneyId::PersonalLoan, &["Offer"])
            .await;
        session.append(Message::agent("You're pre-approved!")).await;
        session.complete_journey().await;

        match rx.recv().await.unwrap() {
            SessionEvent::JourneyStarted { journey, steps } => {
                assert_eq!(journey, JourneyId::PersonalLoan);
                assert_eq!(steps.len(), 1);
            }
            other => panic!("expected JourneyStarted, got {other:?}"),
        }
        match rx.recv().await.unwrap() {
            SessionEvent::MessageAppended { message } => {
                assert_eq!(message.kind(), "agent");
            }
            other => panic!("expected MessageAppended, got {other:?}"),
        }
        match rx.recv().await.unwrap() {
            SessionEvent::JourneyCompleted { journey } => {
                assert_eq!(journey, JourneyId::PersonalLoan);
            }
            other => panic!("expected JourneyCompleted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn captured_inputs_roundtrip() {
        let session = JourneySession::new();
        session.capture("company-name", "Zenith Textiles").await;
        assert_eq!(
            session.captured("company-name").await.as_deref(),
            Some("Zenith Textiles")
        );
        assert!(session.captured("gst").await.is_none());
    }

    #[tokio::test]
    async fn reset_clears_everything() {
        let session = JourneySession::new();
        session
            .begin_journey(JourneyId::Insurance, &["Cover"])
            .await;
        session.append(Message::user("insure me")).await;
        session.capture("k", "v").await;

        session.reset().await;

        let snapshot = session.snapshot().await;
        assert!(snapshot.messages.is_empty());
        assert!(snapshot.steps.is_empty());
        assert!(snapshot.active_journey.is_none());
        assert!(session.captured("k").await.is_none());
    }

    #[tokio::test]
    async fn event_serializes_with_type_tag() {
        let event = SessionEvent::StepUpdated {
            index: 0,
            status: StepStatus::Completed,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"step_updated\""));
        assert!(json.contains("\"status\":\"completed\""));
    }
}
