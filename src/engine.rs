//! Dispatch engine — resolves each trigger to a journey script and runs it
//! against the session.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};

use crate::config::AssistConfig;
use crate::error::{JourneyError, Result};
use crate::flows::{FlowRegistry, StepContext};
use crate::journey::{
    JourneyId, JourneyRouter, JourneySession, JourneyTemplate, Pacer, SessionEvent,
    SessionSnapshot, WallClockPacer,
};
use crate::mock::{demo_profile, EmployeeProfile};

/// A discrete external trigger: free text, a button action (with any form
/// values), or a direct journey start from the empty-state quick actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    Text {
        text: String,
    },
    Action {
        id: String,
        #[serde(default)]
        values: HashMap<String, String>,
    },
    Journey {
        journey: JourneyId,
    },
}

impl Trigger {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn action(id: impl Into<String>) -> Self {
        Self::Action {
            id: id.into(),
            values: HashMap::new(),
        }
    }

    pub fn action_with(id: impl Into<String>, values: &[(&str, &str)]) -> Self {
        Self::Action {
            id: id.into(),
            values: values
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }
}

/// The scripted journey engine. One session per engine instance.
pub struct AgentEngine {
    config: AssistConfig,
    profile: EmployeeProfile,
    router: JourneyRouter,
    flows: FlowRegistry,
    session: Arc<JourneySession>,
    pacer: Arc<dyn Pacer>,
    /// Serializes script turns: a trigger arriving while a delayed sequence
    /// plays waits its turn, so appends never interleave.
    turn: Mutex<()>,
}

impl AgentEngine {
    /// Engine with the standard flows, demo profile, and wall-clock pacing.
    pub fn new(config: AssistConfig) -> Self {
        let session = JourneySession::with_capacity(config.broadcast_capacity);
        Self {
            config,
            profile: demo_profile(),
            router: JourneyRouter::with_defaults(),
            flows: FlowRegistry::standard(),
            session,
            pacer: Arc::new(WallClockPacer),
            turn: Mutex::new(()),
        }
    }

    /// Swap the pacer (tests use [`crate::journey::InstantPacer`]).
    pub fn with_pacer(mut self, pacer: Arc<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn with_profile(mut self, profile: EmployeeProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Run one trigger to completion and return the resulting snapshot.
    pub async fn dispatch(&self, trigger: Trigger) -> Result<SessionSnapshot> {
        let _turn = self.turn.lock().await;
        debug!(?trigger, "Dispatching trigger");
        match trigger {
            Trigger::Text { text } => self.handle_text(&text).await?,
            Trigger::Action { id, values } => self.handle_action(&id, &values).await?,
            Trigger::Journey { journey } => self.handle_journey(journey).await?,
        }
        Ok(self.session.snapshot().await)
    }

    async fn handle_text(&self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let values = HashMap::new();
        let cx = self.context(&values);
        cx.say_user(text).await;

        match self.router.route(text) {
            Some(journey) => {
                info!(%journey, "User text routed to journey");
                self.pacer.pause(self.config.reply_delay).await;
                let flow = self
                    .flows
                    .flow(journey)
                    .ok_or_else(|| JourneyError::UnknownJourney {
                        id: journey.to_string(),
                    })?;
                flow.start(&cx).await?;
            }
            None => {
                cx.think(&[
                    "Understanding your question...",
                    "Analyzing your financial profile...",
                    "Searching knowledge base...",
                    "Preparing personalized answer...",
                ])
                .await;
                cx.say_agent(
                    "I'm your AI financial agent, ready to help with various banking \
                     and financial services. I can assist you with:\n\n\
                     • Opening bank accounts (Savings & Salary)\n\
                     • Loan applications\n\
                     • Credit card applications\n\
                     • Tax planning & optimization\n\
                     • Investment portfolio creation\n\
                     • Insurance recommendations\n\n\
                     What would you like to explore today?",
                )
                .await;
            }
        }
        Ok(())
    }

    async fn handle_action(&self, id: &str, values: &HashMap<String, String>) -> Result<()> {
        let flow = self
            .flows
            .flow_for_action(id)
            .ok_or_else(|| JourneyError::UnknownAction { id: id.to_string() })?;
        let cx = self.context(values);
        flow.on_action(id, &cx).await?;
        Ok(())
    }

    async fn handle_journey(&self, journey: JourneyId) -> Result<()> {
        let flow = self
            .flows
            .flow(journey)
            .ok_or_else(|| JourneyError::UnknownJourney {
                id: journey.to_string(),
            })?;

        let values = HashMap::new();
        let cx = self.context(&values);
        let title = self
            .router
            .templates()
            .iter()
            .find(|t| t.id == journey)
            .map(|t| t.title.to_string())
            .unwrap_or_else(|| journey.to_string());
        cx.say_user(title).await;
        self.pacer.pause(self.config.reply_delay).await;
        flow.start(&cx).await?;
        Ok(())
    }

    fn context<'a>(&'a self, values: &'a HashMap<String, String>) -> StepContext<'a> {
        StepContext::new(
            &self.session,
            self.pacer.as_ref(),
            &self.config,
            &self.profile,
            values,
        )
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot().await
    }

    pub async fn reset(&self) {
        self.session.reset().await;
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.session.subscribe()
    }

    pub fn templates(&self) -> Vec<&JourneyTemplate> {
        self.router.templates()
    }

    pub fn session(&self) -> &Arc<JourneySession> {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journey::InstantPacer;

    fn test_engine() -> AgentEngine {
        AgentEngine::new(AssistConfig::default()).with_pacer(Arc::new(InstantPacer::new()))
    }

    #[tokio::test]
    async fn text_routes_to_bank_account_journey() {
        let engine = test_engine();
        let snapshot = engine
            .dispatch(Trigger::text("open a savings account"))
            .await
            .unwrap();

        assert_eq!(snapshot.active_journey, Some(JourneyId::BankAccount));
        assert_eq!(snapshot.steps.len(), 5);
        // user echo, agent text, OTP card — thinking already cleared
        let kinds: Vec<&str> = snapshot.messages.iter().map(|m| m.kind()).collect();
        assert_eq!(kinds, vec!["user", "agent", "info_card"]);
    }

    #[tokio::test]
    async fn unmatched_text_gets_fallback() {
        let engine = test_engine();
        let snapshot = engine
            .dispatch(Trigger::text("tell me a joke"))
            .await
            .unwrap();

        assert!(snapshot.active_journey.is_none());
        let last = snapshot.messages.last().unwrap();
        assert_eq!(last.kind(), "agent");
        match &last.body {
            crate::journey::MessageBody::Agent { text } => {
                assert!(text.contains("What would you like to explore today?"));
            }
            other => panic!("expected agent message, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_text_is_ignored() {
        let engine = test_engine();
        let snapshot = engine.dispatch(Trigger::text("   ")).await.unwrap();
        assert!(snapshot.messages.is_empty());
    }

    #[tokio::test]
    async fn unknown_action_is_an_error() {
        let engine = test_engine();
        let err = engine
            .dispatch(Trigger::action("warp-core-breach"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Journey(JourneyError::UnknownAction { .. })
        ));
    }

    #[tokio::test]
    async fn quick_action_starts_journey_with_title_echo() {
        let engine = test_engine();
        let snapshot = engine
            .dispatch(Trigger::Journey {
                journey: JourneyId::PersonalLoan,
            })
            .await
            .unwrap();

        assert_eq!(snapshot.active_journey, Some(JourneyId::PersonalLoan));
        match &snapshot.messages[0].body {
            crate::journey::MessageBody::User { text } => {
                assert_eq!(text, "Apply for Loan");
            }
            other => panic!("expected user echo, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn trigger_serde_shapes() {
        let trigger: Trigger = serde_json::from_str(
            r#"{"type": "action", "id": "verify-mobile-otp", "values": {"mobile-otp": "482913"}}"#,
        )
        .unwrap();
        match trigger {
            Trigger::Action { id, values } => {
                assert_eq!(id, "verify-mobile-otp");
                assert_eq!(values.get("mobile-otp").unwrap(), "482913");
            }
            other => panic!("expected action trigger, got {other:?}"),
        }

        // values defaults to empty when omitted
        let trigger: Trigger =
            serde_json::from_str(r#"{"type": "action", "id": "confirm-health"}"#).unwrap();
        match trigger {
            Trigger::Action { values, .. } => assert!(values.is_empty()),
            other => panic!("expected action trigger, got {other:?}"),
        }
    }
}
