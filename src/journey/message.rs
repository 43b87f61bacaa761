//! Chat message model — the closed set of message kinds a journey script
//! can append, plus the structured payloads each kind carries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visual weight of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStyle {
    Primary,
    Secondary,
    Ghost,
}

impl Default for ActionStyle {
    fn default() -> Self {
        Self::Primary
    }
}

/// A button the user can press to fire the next trigger.
///
/// `action` is the fixed id the dispatch layer resolves to a script handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionChoice {
    pub label: String,
    pub action: String,
    #[serde(default)]
    pub style: ActionStyle,
}

impl ActionChoice {
    pub fn primary(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
            style: ActionStyle::Primary,
        }
    }

    pub fn secondary(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
            style: ActionStyle::Secondary,
        }
    }

    pub fn ghost(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
            style: ActionStyle::Ghost,
        }
    }
}

/// A label/value row inside an info card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelValue {
    pub label: String,
    pub value: String,
}

impl LabelValue {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// An inline input an info card asks the user to fill (e.g. an OTP box).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSpec {
    /// Field id the submitted value is keyed under in the next trigger.
    pub id: String,
    pub placeholder: String,
    pub max_len: usize,
}

impl InputSpec {
    /// A 6-digit OTP input with the given field id.
    pub fn otp(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            placeholder: "Enter 6-digit OTP".into(),
            max_len: 6,
        }
    }
}

/// A rich informational card, optionally asking for one inline input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<LabelValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputSpec>,
}

impl InfoCard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            icon: None,
            title: title.into(),
            subtitle: None,
            items: Vec::new(),
            input: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_items(mut self, items: Vec<LabelValue>) -> Self {
        self.items = items;
        self
    }

    pub fn with_input(mut self, input: InputSpec) -> Self {
        self.input = Some(input);
        self
    }
}

/// A detail row in an interactive or confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailField {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub editable: bool,
}

impl DetailField {
    /// A field already verified against records.
    pub fn verified(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            verified: true,
            editable: false,
        }
    }

    /// A field the user may edit before continuing.
    pub fn editable(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            verified: false,
            editable: true,
        }
    }

    pub fn plain(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            verified: false,
            editable: false,
        }
    }
}

/// One selectable loan configuration in a loan offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanOption {
    pub amount: Decimal,
    pub tenure_months: u32,
    pub monthly_emi: Decimal,
}

/// One pre-approved credit card in a card offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardOffer {
    pub name: String,
    pub credit_limit: Decimal,
    pub annual_fee: String,
    pub benefits: Vec<String>,
}

/// A line item inside a plan section (tax or insurance).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanItem {
    pub name: String,
    pub amount: String,
    pub note: String,
}

impl PlanItem {
    pub fn new(
        name: impl Into<String>,
        amount: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            note: note.into(),
        }
    }
}

/// A named section of a plan offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSection {
    pub name: String,
    pub items: Vec<PlanItem>,
}

/// Totals shown under a plan offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_investment: String,
    pub tax_saved: String,
    pub note: String,
}

/// Risk band of a portfolio slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

/// One slice of a recommended portfolio allocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub category: String,
    pub percent: u8,
    pub monthly: Decimal,
    pub risk: RiskBand,
    pub expected_returns: String,
}

/// A projected portfolio value at a future year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub year: u32,
    pub value: String,
    pub gains: String,
}

/// Structured payload of an offer message, one shape per offer family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum OfferDetail {
    /// Loan amount/tenure choices with EMIs.
    LoanOptions { options: Vec<LoanOption> },
    /// Pre-approved credit cards.
    CardOffers { cards: Vec<CardOffer> },
    /// Sectioned plan (tax savings, insurance covers) with totals.
    Plan {
        sections: Vec<PlanSection>,
        summary: PlanSummary,
    },
    /// Portfolio allocation with growth projections.
    Portfolio {
        allocation: Vec<AllocationSlice>,
        projections: Vec<Projection>,
    },
}

/// An offer message body — title, highlight line, and a structured payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferCard {
    pub title: String,
    pub highlight: String,
    pub detail: OfferDetail,
}

/// Terminal success card for a journey or follow-up action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessCard {
    pub title: String,
    /// Application / request reference number, when the script issues one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub details: Vec<String>,
    pub next_steps: Vec<String>,
}

impl SuccessCard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            reference: None,
            details: Vec::new(),
            next_steps: Vec::new(),
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn with_next_steps(mut self, next_steps: Vec<String>) -> Self {
        self.next_steps = next_steps;
        self
    }
}

/// Every kind of message a script can append.
///
/// Closed union: the renderer side matches exhaustively, so a new kind is a
/// compile-visible change rather than a stray payload shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageBody {
    /// Echo of user input or of a button press.
    User { text: String },
    /// Plain agent prose.
    Agent { text: String },
    /// Transient processing indicator; replaced as steps accrue, removed
    /// when the next real message lands.
    Thinking { steps: Vec<String> },
    /// Informational card, optionally with an inline input.
    InfoCard(InfoCard),
    /// Pre-filled detail rows the user reviews before continuing.
    Interactive {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prompt: Option<String>,
        fields: Vec<DetailField>,
    },
    /// Explicit confirm-these-details gate.
    Confirmation {
        title: String,
        fields: Vec<DetailField>,
    },
    /// Structured product offer.
    Offer(OfferCard),
    /// Terminal success card.
    Success(SuccessCard),
}

/// A message in the transcript. Immutable once appended; append order is
/// display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    #[serde(flatten)]
    pub body: MessageBody,
    pub created_at: DateTime<Utc>,
    /// Buttons offered for the next trigger.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionChoice>,
}

impl Message {
    pub fn new(body: MessageBody) -> Self {
        Self {
            id: Uuid::new_v4(),
            body,
            created_at: Utc::now(),
            actions: Vec::new(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageBody::User { text: text.into() })
    }

    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(MessageBody::Agent { text: text.into() })
    }

    pub fn thinking(steps: Vec<String>) -> Self {
        Self::new(MessageBody::Thinking { steps })
    }

    pub fn with_actions(mut self, actions: Vec<ActionChoice>) -> Self {
        self.actions = actions;
        self
    }

    /// Whether this is the transient thinking indicator.
    pub fn is_thinking(&self) -> bool {
        matches!(self.body, MessageBody::Thinking { .. })
    }

    /// Stable kind name, matching the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match &self.body {
            MessageBody::User { .. } => "user",
            MessageBody::Agent { .. } => "agent",
            MessageBody::Thinking { .. } => "thinking",
            MessageBody::InfoCard(_) => "info_card",
            MessageBody::Interactive { .. } => "interactive",
            MessageBody::Confirmation { .. } => "confirmation",
            MessageBody::Offer(_) => "offer",
            MessageBody::Success(_) => "success",
        }
    }
}
