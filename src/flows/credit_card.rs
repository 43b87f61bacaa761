//! Credit-card journey — pre-approved cards, pick, detail confirmation,
//! submission.

use async_trait::async_trait;
use rust_decimal_macros::dec;

use crate::error::JourneyError;
use crate::journey::message::{CardOffer, DetailField, OfferCard, OfferDetail};
use crate::journey::{ActionChoice, JourneyId, Message, MessageBody, SuccessCard};
use crate::mock::{format_lakh, reference};

use super::{JourneyScript, StepContext};

const SELECT_CARD: &str = "select-card";
const CONFIRM_DETAILS: &str = "confirm-card-details";

/// Captured-input key for the chosen card name.
const CHOSEN_CARD: &str = "credit-card.chosen";

pub struct CreditCardFlow;

fn card_offers() -> Vec<CardOffer> {
    vec![
        CardOffer {
            name: "Travel Premium Card".into(),
            credit_limit: dec!(700000),
            annual_fee: "₹1,500/year (waived)".into(),
            benefits: vec![
                "5X points on travel bookings".into(),
                "Unlimited lounge access worldwide".into(),
                "Complimentary travel insurance".into(),
                "Zero forex markup".into(),
                "Welcome: 10,000 bonus miles".into(),
            ],
        },
        CardOffer {
            name: "Cashback Infinite".into(),
            credit_limit: dec!(1000000),
            annual_fee: "₹2,000/year (1st year free)".into(),
            benefits: vec![
                "5% cashback on all categories".into(),
                "Unlimited airport lounge access".into(),
                "Concierge service 24/7".into(),
                "10% savings on dining".into(),
                "Welcome: ₹5,000 cashback voucher".into(),
            ],
        },
    ]
}

/// Application-detail rows pulled from the employee profile.
pub(crate) fn application_fields(profile: &crate::mock::EmployeeProfile) -> Vec<DetailField> {
    vec![
        DetailField::verified("Full Name", &profile.name),
        DetailField::verified("PAN Number", &profile.pan),
        DetailField::verified("Annual Income", format_lakh(profile.salary)),
        DetailField::verified("Employment", &profile.company),
        DetailField::verified("Email", &profile.email),
        DetailField::verified("Mobile", &profile.phone),
    ]
}

#[async_trait]
impl JourneyScript for CreditCardFlow {
    fn id(&self) -> JourneyId {
        JourneyId::CreditCard
    }

    fn actions(&self) -> &'static [&'static str] {
        &[SELECT_CARD, CONFIRM_DETAILS]
    }

    async fn start(&self, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        cx.begin_journey(self.id(), &[]).await;

        cx.think(&[
            "Checking eligibility...",
            "Profile verified",
            "Finding cards...",
        ])
        .await;
        cx.beat().await;

        cx.say_agent("You're pre-approved! Choose your card:").await;
        cx.beat().await;

        let cards = card_offers();
        let actions = cards
            .iter()
            .map(|c| {
                ActionChoice::primary(
                    format!("{} ({} limit)", c.name, format_lakh(c.credit_limit)),
                    SELECT_CARD,
                )
            })
            .collect();
        cx.push(
            Message::new(MessageBody::Offer(OfferCard {
                title: "Pre-Approved Credit Cards".into(),
                highlight: "Choose Your Card".into(),
                detail: OfferDetail::CardOffers { cards },
            }))
            .with_actions(actions),
        )
        .await;
        Ok(())
    }

    async fn on_action(&self, action: &str, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        match action {
            SELECT_CARD => {
                let chosen = cx.value_or("card", "Cashback Infinite");
                cx.say_user(format!("Selected: {chosen}")).await;
                cx.capture(CHOSEN_CARD, &chosen).await;
                cx.beat().await;

                cx.say_agent("Verify application details:").await;
                cx.beat().await;

                cx.push(
                    Message::new(MessageBody::Confirmation {
                        title: "Confirm Application Details".into(),
                        fields: application_fields(cx.profile()),
                    })
                    .with_actions(vec![ActionChoice::primary(
                        "Confirm Details",
                        CONFIRM_DETAILS,
                    )]),
                )
                .await;
                Ok(())
            }
            CONFIRM_DETAILS => {
                cx.say_user("Application details confirmed ✓").await;

                cx.think(&[
                    "Processing application...",
                    "Credit check done",
                    "Submitting...",
                ])
                .await;
                cx.beat().await;

                let card = cx
                    .captured(CHOSEN_CARD)
                    .await
                    .unwrap_or_else(|| "Cashback Infinite".into());
                cx.succeed(
                    SuccessCard::new("Application Submitted Successfully!")
                        .with_reference(reference("CC"))
                        .with_details(vec![
                            "Status: Under Review".into(),
                            format!("Card: {card}"),
                            "Limit: subject to approval".into(),
                            "Approval: 3-5 business days".into(),
                        ])
                        .with_next_steps(vec![
                            "Credit check in progress".into(),
                            "Updates via SMS & email".into(),
                            "Virtual card on approval, physical in 7-10 days".into(),
                        ]),
                )
                .await;
                Ok(())
            }
            other => Err(JourneyError::UnknownAction { id: other.into() }),
        }
    }
}
