//! Journey scripts — one module per scripted flow, a shared step context,
//! and the registry dispatch resolves triggers against.

pub mod bank_account;
pub mod corporate;
pub mod credit_card;
pub mod insurance;
pub mod investment;
pub mod personal_loan;
pub mod tax_planning;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::AssistConfig;
use crate::error::JourneyError;
use crate::journey::{JourneyId, JourneySession, Message, Pacer, SuccessCard};
use crate::mock::EmployeeProfile;

/// Everything a script step can touch: the session, the pacer, config
/// delays, the mock profile, and the form values carried by the trigger.
pub struct StepContext<'a> {
    session: &'a Arc<JourneySession>,
    pacer: &'a dyn Pacer,
    config: &'a AssistConfig,
    profile: &'a EmployeeProfile,
    values: &'a HashMap<String, String>,
}

impl<'a> StepContext<'a> {
    pub fn new(
        session: &'a Arc<JourneySession>,
        pacer: &'a dyn Pacer,
        config: &'a AssistConfig,
        profile: &'a EmployeeProfile,
        values: &'a HashMap<String, String>,
    ) -> Self {
        Self {
            session,
            pacer,
            config,
            profile,
            values,
        }
    }

    pub fn profile(&self) -> &EmployeeProfile {
        self.profile
    }

    /// Raw form value from the trigger, if present.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Form value with a scripted fallback for blank input (OTP boxes use
    /// a fixed demo code rather than blocking).
    pub fn value_or(&self, key: &str, fallback: &str) -> String {
        match self.value(key).map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Whether a required form value is present and non-blank.
    pub fn has_value(&self, key: &str) -> bool {
        self.value(key).is_some_and(|v| !v.trim().is_empty())
    }

    pub async fn push(&self, message: Message) {
        self.session.append(message).await;
    }

    /// Echo the user's side of the exchange.
    pub async fn say_user(&self, text: impl Into<String>) {
        self.session.append(Message::user(text)).await;
    }

    pub async fn say_agent(&self, text: impl Into<String>) {
        self.session.append(Message::agent(text)).await;
    }

    /// Play a thinking sequence: the indicator accrues one step at a time,
    /// settles, then clears before the next real message.
    pub async fn think(&self, steps: &[&str]) {
        for shown in 1..=steps.len() {
            self.pacer.pause(self.config.thinking_step_delay).await;
            self.session
                .update_thinking(steps[..shown].iter().map(|s| s.to_string()).collect())
                .await;
        }
        self.pacer.pause(self.config.settle_delay).await;
        self.session.clear_thinking().await;
    }

    /// Short scripted pause between appends.
    pub async fn beat(&self) {
        self.pacer.pause(self.config.beat_delay).await;
    }

    pub async fn pause_ms(&self, ms: u64) {
        self.pacer.pause(Duration::from_millis(ms)).await;
    }

    pub async fn begin_journey(&self, journey: JourneyId, labels: &[&str]) {
        self.session.begin_journey(journey, labels).await;
    }

    pub async fn start_step(&self, index: usize) {
        self.session.start_step(index).await;
    }

    pub async fn complete_step(&self, index: usize) {
        self.session.complete_step(index).await;
    }

    /// Complete one stage and put the next in progress.
    pub async fn advance_step(&self, done: usize, next: usize) {
        self.session.complete_step(done).await;
        self.session.start_step(next).await;
    }

    /// Append the terminal success card and close the active journey.
    pub async fn succeed(&self, card: SuccessCard) {
        self.session
            .append(Message::new(crate::journey::MessageBody::Success(card)))
            .await;
        self.session.complete_journey().await;
    }

    /// Close the active journey without appending (for scripts that attach
    /// follow-up actions to a success card they push themselves).
    pub async fn finish_journey(&self) {
        self.session.complete_journey().await;
    }

    /// Remember a form input for later stages.
    pub async fn capture(&self, key: &str, value: impl Into<String>) {
        self.session.capture(key, value).await;
    }

    pub async fn captured(&self, key: &str) -> Option<String> {
        self.session.captured(key).await
    }
}

/// A scripted journey: a start handler plus one handler per action id.
#[async_trait]
pub trait JourneyScript: Send + Sync {
    fn id(&self) -> JourneyId;

    /// Action ids this script handles. Globally unique across the registry.
    fn actions(&self) -> &'static [&'static str];

    /// Entry point, fired when free text routes here or a quick action
    /// starts the journey.
    async fn start(&self, cx: &StepContext<'_>) -> Result<(), JourneyError>;

    /// Handle one button action.
    async fn on_action(&self, action: &str, cx: &StepContext<'_>) -> Result<(), JourneyError>;
}

/// Registry of journey scripts, indexed by journey id and by action id.
pub struct FlowRegistry {
    by_journey: HashMap<JourneyId, Arc<dyn JourneyScript>>,
    by_action: HashMap<&'static str, JourneyId>,
}

impl FlowRegistry {
    pub fn new() -> Self {
        Self {
            by_journey: HashMap::new(),
            by_action: HashMap::new(),
        }
    }

    /// All seven built-in journeys.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        let flows: Vec<Arc<dyn JourneyScript>> = vec![
            Arc::new(bank_account::BankAccountFlow),
            Arc::new(personal_loan::PersonalLoanFlow),
            Arc::new(credit_card::CreditCardFlow),
            Arc::new(tax_planning::TaxPlanningFlow),
            Arc::new(investment::InvestmentFlow),
            Arc::new(insurance::InsuranceFlow),
            Arc::new(corporate::CorporateOnboardingFlow),
        ];
        for flow in flows {
            registry
                .register(flow)
                .expect("built-in action ids are unique");
        }
        registry
    }

    pub fn register(&mut self, flow: Arc<dyn JourneyScript>) -> Result<(), JourneyError> {
        let id = flow.id();
        for action in flow.actions() {
            if let Some(owner) = self.by_action.get(action) {
                return Err(JourneyError::DuplicateAction {
                    id: (*action).to_string(),
                    journey: owner.to_string(),
                });
            }
            self.by_action.insert(action, id);
        }
        self.by_journey.insert(id, flow);
        Ok(())
    }

    pub fn flow(&self, id: JourneyId) -> Option<Arc<dyn JourneyScript>> {
        self.by_journey.get(&id).cloned()
    }

    /// Resolve an action id to the script that declared it.
    pub fn flow_for_action(&self, action: &str) -> Option<Arc<dyn JourneyScript>> {
        self.by_action
            .get(action)
            .and_then(|id| self.by_journey.get(id))
            .cloned()
    }
}

impl Default for FlowRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
