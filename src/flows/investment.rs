//! Investment journey — SIP portfolio allocation with projections.

use async_trait::async_trait;
use rust_decimal_macros::dec;

use crate::error::JourneyError;
use crate::journey::message::{AllocationSlice, OfferCard, OfferDetail, Projection, RiskBand};
use crate::journey::{ActionChoice, JourneyId, Message, MessageBody, SuccessCard};
use crate::mock::reference;

use super::{JourneyScript, StepContext};

const START_SIP: &str = "start-sip";

pub struct InvestmentFlow;

fn allocation() -> Vec<AllocationSlice> {
    vec![
        AllocationSlice {
            category: "Large Cap Equity".into(),
            percent: 40,
            monthly: dec!(10000),
            risk: RiskBand::Medium,
            expected_returns: "12-14%".into(),
        },
        AllocationSlice {
            category: "Mid/Small Cap Equity".into(),
            percent: 30,
            monthly: dec!(7500),
            risk: RiskBand::High,
            expected_returns: "15-18%".into(),
        },
        AllocationSlice {
            category: "Debt Funds".into(),
            percent: 20,
            monthly: dec!(5000),
            risk: RiskBand::Low,
            expected_returns: "7-9%".into(),
        },
        AllocationSlice {
            category: "Gold ETF".into(),
            percent: 10,
            monthly: dec!(2500),
            risk: RiskBand::Medium,
            expected_returns: "8-10%".into(),
        },
    ]
}

fn projections() -> Vec<Projection> {
    vec![
        Projection {
            year: 1,
            value: "₹3.2L".into(),
            gains: "₹14K".into(),
        },
        Projection {
            year: 3,
            value: "₹10.8L".into(),
            gains: "₹72K".into(),
        },
        Projection {
            year: 5,
            value: "₹20.2L".into(),
            gains: "₹2.2L".into(),
        },
        Projection {
            year: 10,
            value: "₹58.4L".into(),
            gains: "₹28.4L".into(),
        },
    ]
}

#[async_trait]
impl JourneyScript for InvestmentFlow {
    fn id(&self) -> JourneyId {
        JourneyId::Investment
    }

    fn actions(&self) -> &'static [&'static str] {
        &[START_SIP]
    }

    async fn start(&self, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        cx.begin_journey(self.id(), &[]).await;

        cx.think(&["Analyzing goals...", "Building portfolio...", "Ready!"])
            .await;
        cx.beat().await;

        cx.say_agent("Here's your personalized investment portfolio:")
            .await;
        cx.beat().await;

        cx.push(
            Message::new(MessageBody::Offer(OfferCard {
                title: "Smart Investment Portfolio".into(),
                highlight: "₹25,000/month SIP".into(),
                detail: OfferDetail::Portfolio {
                    allocation: allocation(),
                    projections: projections(),
                },
            }))
            .with_actions(vec![ActionChoice::primary("Start SIP Investment", START_SIP)]),
        )
        .await;
        Ok(())
    }

    async fn on_action(&self, action: &str, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        match action {
            START_SIP => {
                cx.say_user("Start SIP Investment ✓").await;

                cx.think(&["Setting up SIP...", "Auto-debit configured", "Complete!"])
                    .await;
                cx.beat().await;

                cx.succeed(
                    SuccessCard::new("SIP Investment Started!")
                        .with_reference(reference("SIP"))
                        .with_details(vec![
                            "Monthly: ₹25,000 (Diversified)".into(),
                            "First debit: 1st of next month".into(),
                            "Auto-rebalancing enabled".into(),
                            "Tax optimization active".into(),
                        ])
                        .with_next_steps(vec![
                            "Track via the benefits app".into(),
                            "Monthly SMS confirmations".into(),
                            "Auto annual portfolio review".into(),
                        ]),
                )
                .await;
                Ok(())
            }
            other => Err(JourneyError::UnknownAction { id: other.into() }),
        }
    }
}
