//! Insurance journey — protection plan, health declaration, policy issue.

use async_trait::async_trait;

use crate::error::JourneyError;
use crate::journey::message::{DetailField, OfferCard, OfferDetail, PlanItem, PlanSection, PlanSummary};
use crate::journey::{ActionChoice, JourneyId, Message, MessageBody, SuccessCard};
use crate::mock::reference;

use super::{JourneyScript, StepContext};

const PURCHASE: &str = "purchase-insurance";
const CONFIRM_HEALTH: &str = "confirm-health";

pub struct InsuranceFlow;

fn cover_sections() -> Vec<PlanSection> {
    vec![
        PlanSection {
            name: "Term Life Insurance - ₹1 Cr Coverage".into(),
            items: vec![
                PlanItem::new("Annual Premium", "₹12,000", "Save ₹3,000"),
                PlanItem::new("Coverage Period", "30 years", "Till age 60"),
                PlanItem::new("Special Features", "Accidental death benefit", "2x payout"),
            ],
        },
        PlanSection {
            name: "Health Insurance - Family Floater ₹10L".into(),
            items: vec![
                PlanItem::new("Annual Premium", "₹18,000", "Corporate discount"),
                PlanItem::new("Coverage", "Self + Spouse + 2 Kids", "₹10L floater"),
                PlanItem::new("Benefits", "Cashless in 6000+ hospitals", "No waiting period"),
            ],
        },
        PlanSection {
            name: "Critical Illness Cover - ₹50L".into(),
            items: vec![
                PlanItem::new("Annual Premium", "₹8,000", "Lump sum payout"),
                PlanItem::new("Coverage", "36 critical illnesses", "Instant payout"),
                PlanItem::new("Add-on", "Cancer care benefit", "₹25L extra"),
            ],
        },
    ]
}

fn health_fields() -> Vec<DetailField> {
    vec![
        DetailField::plain("Height", "175 cm"),
        DetailField::plain("Weight", "75 kg"),
        DetailField::plain("Blood Pressure", "Normal"),
        DetailField::verified("Diabetes", "No"),
        DetailField::verified("Smoking", "No"),
        DetailField::verified("Pre-existing Conditions", "None declared"),
    ]
}

#[async_trait]
impl JourneyScript for InsuranceFlow {
    fn id(&self) -> JourneyId {
        JourneyId::Insurance
    }

    fn actions(&self) -> &'static [&'static str] {
        &[PURCHASE, CONFIRM_HEALTH]
    }

    async fn start(&self, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        cx.begin_journey(self.id(), &[]).await;

        cx.think(&[
            "Assessing insurance needs...",
            "Calculating coverage...",
            "Plan ready!",
        ])
        .await;
        cx.beat().await;

        cx.say_agent("Your insurance protection plan:").await;
        cx.beat().await;

        cx.push(
            Message::new(MessageBody::Offer(OfferCard {
                title: "Complete Insurance Protection".into(),
                highlight: "Coverage worth ₹1.5 Cr".into(),
                detail: OfferDetail::Plan {
                    sections: cover_sections(),
                    summary: PlanSummary {
                        total_investment: "₹38,000/year".into(),
                        tax_saved: "₹11,400 under 80D".into(),
                        note: "Complete family protection".into(),
                    },
                },
            }))
            .with_actions(vec![ActionChoice::primary(
                "Purchase Insurance Package",
                PURCHASE,
            )]),
        )
        .await;
        Ok(())
    }

    async fn on_action(&self, action: &str, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        match action {
            PURCHASE => {
                cx.say_user("Purchase Insurance Package ✓").await;
                cx.beat().await;

                cx.say_agent("Provide your health details:").await;
                cx.beat().await;

                cx.push(
                    Message::new(MessageBody::Confirmation {
                        title: "Health & Medical History".into(),
                        fields: health_fields(),
                    })
                    .with_actions(vec![ActionChoice::primary(
                        "Confirm Health Details",
                        CONFIRM_HEALTH,
                    )]),
                )
                .await;
                Ok(())
            }
            CONFIRM_HEALTH => {
                cx.say_user("Health details confirmed ✓").await;

                cx.think(&[
                    "Processing application...",
                    "Health verified",
                    "Issuing policies...",
                ])
                .await;
                cx.beat().await;

                cx.succeed(
                    SuccessCard::new("Insurance Policies Issued!")
                        .with_reference(reference("INS"))
                        .with_details(vec![
                            "Term Life: ₹1 Cr coverage".into(),
                            "Health: ₹10L family floater".into(),
                            "Critical Illness: ₹50L".into(),
                            "Premium: ₹38k/year (auto-debit)".into(),
                        ])
                        .with_next_steps(vec![
                            "Cards arrive in 7 days".into(),
                            "Policy docs sent to email".into(),
                            "Update nominees in app".into(),
                        ]),
                )
                .await;
                Ok(())
            }
            other => Err(JourneyError::UnknownAction { id: other.into() }),
        }
    }
}
