//! Journey primitives — messages, progress tracking, routing, pacing, and
//! the session transcript.

pub mod message;
pub mod pacing;
pub mod progress;
pub mod router;
pub mod session;

pub use message::{
    ActionChoice, ActionStyle, DetailField, InfoCard, InputSpec, LabelValue, Message, MessageBody,
    OfferCard, OfferDetail, SuccessCard,
};
pub use pacing::{InstantPacer, Pacer, WallClockPacer};
pub use progress::{ProgressStep, ProgressTracker, StepStatus};
pub use router::{JourneyRouter, JourneyTemplate};
pub use session::{JourneySession, SessionEvent, SessionSnapshot};

use serde::{Deserialize, Serialize};

/// The fixed catalogue of scripted journeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JourneyId {
    BankAccount,
    PersonalLoan,
    CreditCard,
    TaxPlanning,
    Investment,
    Insurance,
    CorporateOnboarding,
}

impl std::fmt::Display for JourneyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BankAccount => "bank-account",
            Self::PersonalLoan => "personal-loan",
            Self::CreditCard => "credit-card",
            Self::TaxPlanning => "tax-planning",
            Self::Investment => "investment",
            Self::Insurance => "insurance",
            Self::CorporateOnboarding => "corporate-onboarding",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for JourneyId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank-account" => Ok(Self::BankAccount),
            "personal-loan" => Ok(Self::PersonalLoan),
            "credit-card" => Ok(Self::CreditCard),
            "tax-planning" => Ok(Self::TaxPlanning),
            "investment" => Ok(Self::Investment),
            "insurance" => Ok(Self::Insurance),
            "corporate-onboarding" => Ok(Self::CorporateOnboarding),
            _ => Err(format!("Unknown journey: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_serde() {
        let ids = [
            JourneyId::BankAccount,
            JourneyId::PersonalLoan,
            JourneyId::CreditCard,
            JourneyId::TaxPlanning,
            JourneyId::Investment,
            JourneyId::Insurance,
            JourneyId::CorporateOnboarding,
        ];
        for id in ids {
            let display = format!("{id}");
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(format!("\"{display}\""), json);
            assert_eq!(display.parse::<JourneyId>().unwrap(), id);
        }
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert!("mortgage".parse::<JourneyId>().is_err());
    }
}
