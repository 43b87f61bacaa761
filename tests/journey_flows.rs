//! Integration tests for the journey engine.
//!
//! Each test drives a whole scripted flow through `dispatch` with the
//! instant pacer, so canonical paths run start-to-finish without wall-clock
//! waits.

use std::sync::Arc;

use fin_assist::config::AssistConfig;
use fin_assist::engine::{AgentEngine, Trigger};
use fin_assist::journey::{
    InstantPacer, JourneyId, MessageBody, Pacer, SessionSnapshot, StepStatus,
};

fn engine() -> AgentEngine {
    AgentEngine::new(AssistConfig::default()).with_pacer(Arc::new(InstantPacer::new()))
}

fn kinds(snapshot: &SessionSnapshot) -> Vec<&'static str> {
    snapshot.messages.iter().map(|m| m.kind()).collect()
}

fn assert_all_completed(snapshot: &SessionSnapshot) {
    assert!(
        snapshot
            .steps
            .iter()
            .all(|s| s.status == StepStatus::Completed),
        "expected every stage completed, got {:?}",
        snapshot.steps
    );
}

/// Walk the bank-account journey along its canonical path.
async fn run_bank_account(engine: &AgentEngine) -> SessionSnapshot {
    engine
        .dispatch(Trigger::text("open a savings account"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action_with(
            "verify-mobile-otp",
            &[("mobile-otp", "482913")],
        ))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action("verify-pan-aadhaar"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action_with(
            "verify-aadhaar-otp",
            &[("aadhaar-otp", "109284")],
        ))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action("schedule-vkyc-slot1"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action("confirm-preferences"))
        .await
        .unwrap()
}

// ── Opening a savings account ───────────────────────────────────────────

#[tokio::test]
async fn savings_account_text_produces_user_agent_and_otp_card() {
    let engine = engine();
    let snapshot = engine
        .dispatch(Trigger::text("open a savings account"))
        .await
        .unwrap();

    // user echo, agent message, OTP info card (thinking is transient)
    assert_eq!(kinds(&snapshot), vec!["user", "agent", "info_card"]);

    let card = snapshot.messages.last().unwrap();
    match &card.body {
        MessageBody::InfoCard(card) => {
            assert_eq!(card.input.as_ref().unwrap().id, "mobile-otp");
        }
        other => panic!("expected OTP info card, got {other:?}"),
    }

    // Tracker installed with the five fixed stages, first in progress
    assert_eq!(snapshot.steps.len(), 5);
    assert_eq!(snapshot.steps[0].label, "Mobile Verification");
    assert_eq!(snapshot.steps[0].status, StepStatus::InProgress);
}

#[tokio::test]
async fn any_six_digit_otp_completes_first_stage() {
    let engine = engine();
    engine
        .dispatch(Trigger::text("open a savings account"))
        .await
        .unwrap();
    let snapshot = engine
        .dispatch(Trigger::action_with(
            "verify-mobile-otp",
            &[("mobile-otp", "000000")],
        ))
        .await
        .unwrap();

    assert_eq!(snapshot.steps[0].status, StepStatus::Completed);
    assert_eq!(snapshot.steps[1].status, StepStatus::InProgress);
}

#[tokio::test]
async fn blank_otp_uses_fixed_fallback_code() {
    let engine = engine();
    engine
        .dispatch(Trigger::text("open a savings account"))
        .await
        .unwrap();
    // No values at all — the script falls back to the demo code
    let snapshot = engine
        .dispatch(Trigger::action("verify-mobile-otp"))
        .await
        .unwrap();

    let echo = snapshot
        .messages
        .iter()
        .filter(|m| m.kind() == "user")
        .last()
        .unwrap();
    match &echo.body {
        MessageBody::User { text } => assert_eq!(text, "123456 ✓"),
        other => panic!("expected user echo, got {other:?}"),
    }
    assert_eq!(snapshot.steps[0].status, StepStatus::Completed);
}

#[tokio::test]
async fn bank_account_canonical_path_ends_in_success() {
    let engine = engine();
    let snapshot = run_bank_account(&engine).await;

    assert_all_completed(&snapshot);
    assert!(snapshot.active_journey.is_none(), "journey should be closed");

    let last = snapshot.messages.last().unwrap();
    assert_eq!(last.kind(), "success");
    // Follow-up actions ride on the success card
    let actions: Vec<&str> = last.actions.iter().map(|a| a.action.as_str()).collect();
    assert!(actions.contains(&"request-salary-account"));
    assert!(actions.contains(&"view-credit-offers"));
}

#[tokio::test]
async fn progress_labels_fixed_for_whole_journey() {
    let engine = engine();
    let initial = engine
        .dispatch(Trigger::text("open a savings account"))
        .await
        .unwrap();
    let labels: Vec<String> = initial.steps.iter().map(|s| s.label.clone()).collect();

    engine
        .dispatch(Trigger::action("verify-mobile-otp"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action("verify-pan-aadhaar"))
        .await
        .unwrap();
    let later = engine
        .dispatch(Trigger::action("verify-aadhaar-otp"))
        .await
        .unwrap();

    assert_eq!(later.steps.len(), labels.len());
    let later_labels: Vec<String> = later.steps.iter().map(|s| s.label.clone()).collect();
    assert_eq!(later_labels, labels);
}

// ── Follow-up actions after account opening ─────────────────────────────

#[tokio::test]
async fn salary_account_request_succeeds_after_account_opening() {
    let engine = engine();
    run_bank_account(&engine).await;

    let snapshot = engine
        .dispatch(Trigger::action("request-salary-account"))
        .await
        .unwrap();

    let last = snapshot.messages.last().unwrap();
    assert_eq!(last.kind(), "success");
    match &last.body {
        MessageBody::Success(card) => {
            assert!(card.reference.as_ref().unwrap().starts_with("SAL"));
            assert!(card.details.iter().any(|d| d.contains("Tech Corp India")));
        }
        other => panic!("expected success card, got {other:?}"),
    }
}

#[tokio::test]
async fn credit_offers_chain_reaches_submission() {
    let engine = engine();
    run_bank_account(&engine).await;

    engine
        .dispatch(Trigger::action("view-credit-offers"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action_with(
            "select-credit-card-offer",
            &[("card", "Regalia Credit Card")],
        ))
        .await
        .unwrap();
    let snapshot = engine
        .dispatch(Trigger::action("confirm-credit-card-application"))
        .await
        .unwrap();

    let last = snapshot.messages.last().unwrap();
    match &last.body {
        MessageBody::Success(card) => {
            assert!(card.reference.as_ref().unwrap().starts_with("CC"));
            assert!(card.details.iter().any(|d| d.contains("Regalia")));
        }
        other => panic!("expected success card, got {other:?}"),
    }
}

#[tokio::test]
async fn virtual_card_activation_chain() {
    let engine = engine();
    run_bank_account(&engine).await;

    engine
        .dispatch(Trigger::action("activate-vcard"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action("verify-card-details"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action_with(
            "verify-card-otp",
            &[("card-activation-otp", "")],
        ))
        .await
        .unwrap();
    let snapshot = engine
        .dispatch(Trigger::action("finalize-card-activation"))
        .await
        .unwrap();

    // Blank OTP fell back to the fixed demo code
    assert!(snapshot.messages.iter().any(|m| matches!(
        &m.body,
        MessageBody::User { text } if text == "123456 ✓"
    )));

    let last = snapshot.messages.last().unwrap();
    match &last.body {
        MessageBody::InfoCard(card) => {
            assert_eq!(card.title, "Virtual Card Active");
            // The card number from account opening is reused, masked
            assert!(card
                .items
                .iter()
                .any(|i| i.label == "Card Number" && i.value.contains("XXXX")));
        }
        other => panic!("expected virtual-card info card, got {other:?}"),
    }
}

// ── Keyword routing ─────────────────────────────────────────────────────

#[tokio::test]
async fn uppercase_credit_card_routes_to_credit_card_journey() {
    let engine = engine();
    let snapshot = engine
        .dispatch(Trigger::text("I need a CREDIT CARD now"))
        .await
        .unwrap();
    assert_eq!(snapshot.active_journey, Some(JourneyId::CreditCard));
}

// ── Simple journeys run to success ──────────────────────────────────────

#[tokio::test]
async fn personal_loan_canonical_path() {
    let engine = engine();
    engine
        .dispatch(Trigger::text("I want a personal loan"))
        .await
        .unwrap();
    let snapshot = engine
        .dispatch(Trigger::action_with(
            "select-loan",
            &[("option", "₹10L for 48 months (₹25,363/month)")],
        ))
        .await
        .unwrap();

    assert!(snapshot.active_journey.is_none());
    let last = snapshot.messages.last().unwrap();
    match &last.body {
        MessageBody::Success(card) => {
            assert!(card.reference.as_ref().unwrap().starts_with("LA"));
        }
        other => panic!("expected success card, got {other:?}"),
    }
}

#[tokio::test]
async fn credit_card_canonical_path() {
    let engine = engine();
    engine
        .dispatch(Trigger::text("apply for a credit card"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action_with(
            "select-card",
            &[("card", "Travel Premium Card")],
        ))
        .await
        .unwrap();
    let snapshot = engine
        .dispatch(Trigger::action("confirm-card-details"))
        .await
        .unwrap();

    let last = snapshot.messages.last().unwrap();
    match &last.body {
        MessageBody::Success(card) => {
            assert!(card.details.iter().any(|d| d.contains("Travel Premium Card")));
        }
        other => panic!("expected success card, got {other:?}"),
    }
}

#[tokio::test]
async fn tax_investment_and_insurance_paths() {
    for (text, action_chain) in [
        ("help with tax planning", vec!["start-investments"]),
        ("I want to invest in a sip", vec!["start-sip"]),
        (
            "show me insurance options",
            vec!["purchase-insurance", "confirm-health"],
        ),
    ] {
        let engine = engine();
        engine.dispatch(Trigger::text(text)).await.unwrap();
        let mut snapshot = engine.snapshot().await;
        for action in action_chain {
            snapshot = engine.dispatch(Trigger::action(action)).await.unwrap();
        }
        assert!(
            snapshot.active_journey.is_none(),
            "journey for {text:?} should be closed"
        );
        assert_eq!(
            snapshot.messages.last().unwrap().kind(),
            "success",
            "journey for {text:?} should end in success"
        );
    }
}

// ── Corporate onboarding ────────────────────────────────────────────────

const CORP_DETAILS: &[(&str, &str)] = &[
    ("company-name", "Zenith Textiles"),
    ("contact-name", "Arjun Mehta"),
    ("contact-email", "arjun.mehta@zenithtextiles.co.in"),
    ("gst", "27AAACZ4318M1ZK"),
    ("cin", "L17110MH1998PLC114801"),
];

#[tokio::test]
async fn corporate_onboarding_canonical_path() {
    let engine = engine();
    engine
        .dispatch(Trigger::action("start-onboarding"))
        .await
        .unwrap();

    let snapshot = engine.snapshot().await;
    assert_eq!(snapshot.steps.len(), 8);
    assert_eq!(snapshot.steps[0].status, StepStatus::InProgress);

    engine
        .dispatch(Trigger::action_with("confirm-corp-details", CORP_DETAILS))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action("continue-from-kyb"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action("connection-self"))
        .await
        .unwrap();
    engine.dispatch(Trigger::action("choose-hrms")).await.unwrap();
    engine
        .dispatch(Trigger::action_with("select-hrms", &[("provider", "Keka")]))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action("show-hrms-creds"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action_with(
            "connect-hrms",
            &[
                ("host", "https://zenith.keka.com"),
                ("username", "integration-bot"),
                ("password", "s3cret!"),
            ],
        ))
        .await
        .unwrap();
    let snapshot = engine
        .dispatch(Trigger::action("confirm-mapping"))
        .await
        .unwrap();

    assert_all_completed(&snapshot);
    assert!(snapshot.active_journey.is_none());

    let last = snapshot.messages.last().unwrap();
    match &last.body {
        MessageBody::Success(card) => {
            assert_eq!(card.title, "Connection Successful");
            assert!(card.details.iter().any(|d| d.contains("Zenith Textiles")));
            assert!(card.details.iter().any(|d| d.contains("Keka")));
        }
        other => panic!("expected success card, got {other:?}"),
    }
}

#[tokio::test]
async fn blank_corporate_details_appends_one_corrective_message() {
    let engine = engine();
    engine
        .dispatch(Trigger::action("start-onboarding"))
        .await
        .unwrap();
    let before = engine.snapshot().await;

    // Email missing — the other required fields are present
    let snapshot = engine
        .dispatch(Trigger::action_with(
            "confirm-corp-details",
            &[
                ("company-name", "Zenith Textiles"),
                ("contact-name", "Arjun Mehta"),
                ("contact-email", "   "),
            ],
        ))
        .await
        .unwrap();

    // Exactly one new message, and it's a corrective agent prompt
    assert_eq!(snapshot.messages.len(), before.messages.len() + 1);
    let last = snapshot.messages.last().unwrap();
    match &last.body {
        MessageBody::Agent { text } => {
            assert!(text.contains("company name, contact name, and email"));
        }
        other => panic!("expected corrective agent message, got {other:?}"),
    }

    // Tracker untouched: stage 0 still in progress, stage 1 still pending
    assert_eq!(snapshot.steps[0].status, StepStatus::InProgress);
    assert_eq!(snapshot.steps[1].status, StepStatus::Pending);

    // Resubmitting with everything present advances normally
    let snapshot = engine
        .dispatch(Trigger::action_with("confirm-corp-details", CORP_DETAILS))
        .await
        .unwrap();
    assert_eq!(snapshot.steps[0].status, StepStatus::Completed);
    assert_eq!(snapshot.steps[1].status, StepStatus::InProgress);
}

#[tokio::test]
async fn blank_hrms_credentials_appends_one_corrective_message() {
    let engine = engine();
    engine
        .dispatch(Trigger::action("start-onboarding"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action_with("confirm-corp-details", CORP_DETAILS))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action("continue-from-kyb"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action("connection-self"))
        .await
        .unwrap();
    engine.dispatch(Trigger::action("choose-hrms")).await.unwrap();
    engine
        .dispatch(Trigger::action("select-hrms"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action("show-hrms-creds"))
        .await
        .unwrap();
    let before = engine.snapshot().await;

    let snapshot = engine
        .dispatch(Trigger::action_with(
            "connect-hrms",
            &[("host", "https://zenith.keka.com"), ("username", "bot")],
        ))
        .await
        .unwrap();

    assert_eq!(snapshot.messages.len(), before.messages.len() + 1);
    assert_eq!(snapshot.messages.last().unwrap().kind(), "agent");
    // HRMS Credentials stage (index 5) has not advanced
    assert_eq!(snapshot.steps[5].status, StepStatus::InProgress);
}

// ── Restartability ──────────────────────────────────────────────────────

#[tokio::test]
async fn journey_can_be_restarted_after_completion() {
    let engine = engine();
    engine
        .dispatch(Trigger::text("I want a personal loan"))
        .await
        .unwrap();
    engine
        .dispatch(Trigger::action("select-loan"))
        .await
        .unwrap();

    // Start the same journey again by re-issuing its trigger
    let snapshot = engine
        .dispatch(Trigger::text("another loan please"))
        .await
        .unwrap();
    assert_eq!(snapshot.active_journey, Some(JourneyId::PersonalLoan));
    assert_eq!(snapshot.messages.last().unwrap().kind(), "offer");
}

#[tokio::test]
async fn instant_pacer_records_script_delays() {
    let pacer = Arc::new(InstantPacer::new());
    let engine = AgentEngine::new(AssistConfig::default())
        .with_pacer(Arc::clone(&pacer) as Arc<dyn Pacer>);

    engine
        .dispatch(Trigger::text("open a savings account"))
        .await
        .unwrap();

    // The script requested real delays; none were actually slept
    assert!(pacer.total() >= std::time::Duration::from_secs(1));
}
