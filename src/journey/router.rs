//! Free-text routing — maps user utterances to journeys.
//!
//! A declarative table of phrases per journey, evaluated by one dispatch
//! function. Matching is case-insensitive substring: each phrase compiles to
//! an escaped, `(?i)`-prefixed regex. First matching template wins; a text
//! that matches nothing falls through to the caller's generic response.

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::JourneyId;

/// Static description of one routable journey.
#[derive(Debug, Clone, Serialize)]
pub struct JourneyTemplate {
    pub id: JourneyId,
    pub title: &'static str,
    pub description: &'static str,
    /// Phrases that route free text to this journey.
    pub phrases: &'static [&'static str],
}

struct RouteRule {
    template: JourneyTemplate,
    patterns: Vec<Regex>,
}

/// Keyword routing table.
pub struct JourneyRouter {
    rules: Vec<RouteRule>,
}

/// The built-in routing table.
///
/// Order matters: credit-card precedes personal-loan so that "credit card"
/// is not swallowed by the loan template's bare "credit" phrase.
const TEMPLATES: &[JourneyTemplate] = &[
    JourneyTemplate {
        id: JourneyId::BankAccount,
        title: "Open Bank Account",
        description: "Complete digital account opening",
        phrases: &[
            "bank account",
            "savings account",
            "open account",
            "new account",
            "account opening",
            "salary account",
        ],
    },
    JourneyTemplate {
        id: JourneyId::CreditCard,
        title: "Apply Credit Card",
        description: "Pre-approved cards available",
        phrases: &["credit card", "card", "rewards", "cashback"],
    },
    JourneyTemplate {
        id: JourneyId::PersonalLoan,
        title: "Apply for Loan",
        description: "Get instant pre-approval",
        phrases: &["loan", "personal loan", "borrow", "credit", "emi"],
    },
    JourneyTemplate {
        id: JourneyId::TaxPlanning,
        title: "Plan Your Taxes",
        description: "Personalized tax-saving plan",
        phrases: &["tax", "80c", "tax saving", "tax planning"],
    },
    JourneyTemplate {
        id: JourneyId::Investment,
        title: "Start Investing",
        description: "Build a diversified SIP portfolio",
        phrases: &["invest", "sip", "mutual fund", "portfolio"],
    },
    JourneyTemplate {
        id: JourneyId::Insurance,
        title: "Get Insured",
        description: "Complete protection for your family",
        phrases: &["insurance", "term plan", "health cover", "insure"],
    },
    JourneyTemplate {
        id: JourneyId::CorporateOnboarding,
        title: "Onboard Corporate",
        description: "KYB checks and HRMS connection",
        phrases: &[
            "onboard corporate",
            "corporate onboarding",
            "new corporate",
            "kyb",
        ],
    },
];

impl JourneyRouter {
    /// Router over the built-in template table.
    pub fn with_defaults() -> Self {
        let mut router = Self { rules: Vec::new() };
        for template in TEMPLATES {
            router
                .add_template(template.clone())
                .expect("built-in phrases compile");
        }
        router
    }

    /// Router with no rules (for testing).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a template; each phrase becomes a case-insensitive substring
    /// pattern.
    pub fn add_template(&mut self, template: JourneyTemplate) -> Result<(), regex::Error> {
        let patterns = template
            .phrases
            .iter()
            .map(|phrase| Regex::new(&format!("(?i){}", regex::escape(phrase))))
            .collect::<Result<Vec<_>, _>>()?;
        self.rules.push(RouteRule { template, patterns });
        Ok(())
    }

    /// Resolve free text to a journey. First matching template wins.
    pub fn route(&self, text: &str) -> Option<JourneyId> {
        for rule in &self.rules {
            if rule.patterns.iter().any(|p| p.is_match(text)) {
                debug!(
                    journey = %rule.template.id,
                    "Routed user text to journey"
                );
                return Some(rule.template.id);
            }
        }
        None
    }

    /// The templates in evaluation order (for the service catalogue).
    pub fn templates(&self) -> Vec<&JourneyTemplate> {
        self.rules.iter().map(|r| &r.template).collect()
    }
}

impl Default for JourneyRouter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
