//! Personal-loan journey — pre-approved offer, option pick, submission.

use async_trait::async_trait;
use rust_decimal_macros::dec;

use crate::error::JourneyError;
use crate::journey::message::{LoanOption, OfferCard, OfferDetail};
use crate::journey::{ActionChoice, JourneyId, Message, MessageBody, SuccessCard};
use crate::mock::{format_inr, format_lakh, reference};

use super::{JourneyScript, StepContext};

const SELECT_LOAN: &str = "select-loan";

pub struct PersonalLoanFlow;

fn loan_options() -> Vec<LoanOption> {
    vec![
        LoanOption {
            amount: dec!(500000),
            tenure_months: 36,
            monthly_emi: dec!(16134),
        },
        LoanOption {
            amount: dec!(1000000),
            tenure_months: 48,
            monthly_emi: dec!(25363),
        },
        LoanOption {
            amount: dec!(1500000),
            tenure_months: 60,
            monthly_emi: dec!(32268),
        },
    ]
}

fn option_label(option: &LoanOption) -> String {
    format!(
        "{} for {} months ({}/month)",
        format_lakh(option.amount),
        option.tenure_months,
        format_inr(option.monthly_emi)
    )
}

#[async_trait]
impl JourneyScript for PersonalLoanFlow {
    fn id(&self) -> JourneyId {
        JourneyId::PersonalLoan
    }

    fn actions(&self) -> &'static [&'static str] {
        &[SELECT_LOAN]
    }

    async fn start(&self, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        cx.begin_journey(self.id(), &[]).await;

        cx.think(&[
            "Analyzing financial profile...",
            "Credit check complete",
            "Calculating loan offer...",
        ])
        .await;
        cx.beat().await;

        cx.say_agent("You're pre-approved! Choose your loan:").await;
        cx.beat().await;

        let options = loan_options();
        let actions = options
            .iter()
            .map(|o| ActionChoice::primary(option_label(o), SELECT_LOAN))
            .collect();
        cx.push(
            Message::new(MessageBody::Offer(OfferCard {
                title: "Pre-Approved Personal Loan".into(),
                highlight: format_inr(dec!(1500000)),
                detail: OfferDetail::LoanOptions { options },
            }))
            .with_actions(actions),
        )
        .await;
        Ok(())
    }

    async fn on_action(&self, action: &str, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        match action {
            SELECT_LOAN => {
                let chosen = cx.value_or("option", &option_label(&loan_options()[0]));
                cx.say_user(format!("Selected: {chosen}")).await;
                cx.beat().await;

                cx.think(&[
                    "Processing application...",
                    "Verification complete",
                    "Submitting...",
                ])
                .await;
                cx.beat().await;

                cx.succeed(
                    SuccessCard::new("Loan Application Submitted!")
                        .with_reference(reference("LA"))
                        .with_details(vec![
                            "Status: Under Review".into(),
                            "Approval: Within 2 hours".into(),
                            "Disbursal: 24 hours post-approval".into(),
                            "Digital agreement sent to email".into(),
                        ])
                        .with_next_steps(vec![
                            "Await approval SMS notification".into(),
                            "Sign agreement via email link".into(),
                            "Funds credited to your account".into(),
                        ]),
                )
                .await;
                Ok(())
            }
            other => Err(JourneyError::UnknownAction { id: other.into() }),
        }
    }
}
