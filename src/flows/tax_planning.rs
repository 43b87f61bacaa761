//! Tax-planning journey — sectioned savings plan, activation.

use async_trait::async_trait;

use crate::error::JourneyError;
use crate::journey::message::{OfferCard, OfferDetail, PlanItem, PlanSection, PlanSummary};
use crate::journey::{ActionChoice, JourneyId, Message, MessageBody, SuccessCard};
use crate::mock::reference;

use super::{JourneyScript, StepContext};

const START_INVESTMENTS: &str = "start-investments";

pub struct TaxPlanningFlow;

fn plan_sections() -> Vec<PlanSection> {
    vec![
        PlanSection {
            name: "Section 80C - ₹1,50,000".into(),
            items: vec![
                PlanItem::new("ELSS Mutual Funds", "₹1,00,000", "12-15% potential"),
                PlanItem::new("PPF", "₹30,000", "7.1% assured"),
                PlanItem::new("Life Insurance", "₹20,000", "Protection"),
            ],
        },
        PlanSection {
            name: "Section 80D - ₹25,000".into(),
            items: vec![
                PlanItem::new("Health Insurance (Self)", "₹15,000", "Coverage ₹5L"),
                PlanItem::new("Health Insurance (Parents)", "₹10,000", "Coverage ₹3L"),
            ],
        },
        PlanSection {
            name: "Section 80CCD(1B) - ₹50,000".into(),
            items: vec![PlanItem::new("NPS Investment", "₹50,000", "10-12% potential")],
        },
    ]
}

#[async_trait]
impl JourneyScript for TaxPlanningFlow {
    fn id(&self) -> JourneyId {
        JourneyId::TaxPlanning
    }

    fn actions(&self) -> &'static [&'static str] {
        &[START_INVESTMENTS]
    }

    async fn start(&self, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        cx.begin_journey(self.id(), &[]).await;

        cx.think(&[
            "Analyzing tax profile...",
            "Calculating savings...",
            "Plan ready!",
        ])
        .await;
        cx.beat().await;

        cx.say_agent("Your personalized tax-saving plan:").await;
        cx.beat().await;

        cx.push(
            Message::new(MessageBody::Offer(OfferCard {
                title: "Tax Optimization Plan".into(),
                highlight: "Save ₹1,56,000 in taxes".into(),
                detail: OfferDetail::Plan {
                    sections: plan_sections(),
                    summary: PlanSummary {
                        total_investment: "₹2,25,000".into(),
                        tax_saved: "₹67,500".into(),
                        note: "₹88,500 additional returns (estimated)".into(),
                    },
                },
            }))
            .with_actions(vec![ActionChoice::primary(
                "Start Tax-Saving Investments",
                START_INVESTMENTS,
            )]),
        )
        .await;
        Ok(())
    }

    async fn on_action(&self, action: &str, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        match action {
            START_INVESTMENTS => {
                cx.say_user("Start Tax-Saving Investments ✓").await;

                cx.think(&[
                    "Setting up investments...",
                    "Accounts configured",
                    "Processing...",
                ])
                .await;
                cx.beat().await;

                cx.succeed(
                    SuccessCard::new("Tax-Saving Plan Activated!")
                        .with_reference(reference("TAX"))
                        .with_details(vec![
                            "ELSS SIP: ₹10k/month".into(),
                            "PPF: ₹30k invested".into(),
                            "Health Insurance: ₹18k/year".into(),
                            "Tax Saved: ₹67,500 annually".into(),
                        ])
                        .with_next_steps(vec![
                            "Track via the benefits app".into(),
                            "Auto 80C certificate at year-end".into(),
                            "Annual rebalancing scheduled".into(),
                        ]),
                )
                .await;
                Ok(())
            }
            other => Err(JourneyError::UnknownAction { id: other.into() }),
        }
    }
}
