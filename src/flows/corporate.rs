//! Corporate-onboarding journey — capture corporate details, run KYB
//! checks, and connect the corporate's HRMS for employee data sync.
//!
//! The two forms here (corporate details, HRMS credentials) carry the only
//! required-field validation in the system: a blank required field appends
//! one corrective agent message and leaves the tracker untouched.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::JourneyError;
use crate::journey::message::{DetailField, InfoCard, LabelValue};
use crate::journey::{ActionChoice, JourneyId, Message, MessageBody, SuccessCard};
use crate::mock::HRMS_PROVIDERS;

use super::{JourneyScript, StepContext};

/// Stage labels, fixed for the life of the journey.
pub const STAGES: &[&str] = &[
    "Corporate Details",
    "KYB Verification",
    "Connection Setup",
    "Data Source",
    "HRMS Selection",
    "HRMS Credentials",
    "Data Mapping",
    "Connection Active",
];

const START_ONBOARDING: &str = "start-onboarding";
const CONFIRM_CORP_DETAILS: &str = "confirm-corp-details";
const CONTINUE_FROM_KYB: &str = "continue-from-kyb";
const CONNECTION_SELF: &str = "connection-self";
const CHOOSE_HRMS: &str = "choose-hrms";
const SELECT_HRMS: &str = "select-hrms";
const SHOW_HRMS_CREDS: &str = "show-hrms-creds";
const CONNECT_HRMS: &str = "connect-hrms";
const CONFIRM_MAPPING: &str = "confirm-mapping";

/// Captured-input keys.
const COMPANY: &str = "corporate.company-name";
const CONTACT_NAME: &str = "corporate.contact-name";
const CONTACT_EMAIL: &str = "corporate.contact-email";
const GST: &str = "corporate.gst";
const CIN: &str = "corporate.cin";
const PROVIDER: &str = "corporate.hrms-provider";

pub struct CorporateOnboardingFlow;

/// HRMS credentials submitted from the connection form. The password never
/// leaves this struct in the clear.
struct HrmsCredentials {
    host: String,
    username: String,
    password: SecretString,
}

impl HrmsCredentials {
    fn from_context(cx: &StepContext<'_>) -> Self {
        Self {
            host: cx.value_or("host", ""),
            username: cx.value_or("username", ""),
            password: SecretString::from(cx.value_or("password", "")),
        }
    }

    fn is_complete(&self) -> bool {
        !self.host.trim().is_empty()
            && !self.username.trim().is_empty()
            && !self.password.expose_secret().trim().is_empty()
    }
}

impl CorporateOnboardingFlow {
    async fn begin(&self, cx: &StepContext<'_>) {
        cx.begin_journey(JourneyId::CorporateOnboarding, STAGES).await;
        cx.start_step(0).await;

        cx.say_agent(
            "Let's onboard a new corporate. We'll capture basic details, run \
             KYB checks, and connect their HRMS for data sync.",
        )
        .await;
        cx.pause_ms(400).await;

        cx.push(
            Message::new(MessageBody::Interactive {
                prompt: Some("Corporate details".into()),
                fields: vec![
                    DetailField::editable("Company Name", ""),
                    DetailField::editable("Contact Name", ""),
                    DetailField::editable("Contact Email", ""),
                    DetailField::editable("GST", ""),
                    DetailField::editable("CIN", ""),
                ],
            })
            .with_actions(vec![ActionChoice::primary(
                "Save & continue",
                CONFIRM_CORP_DETAILS,
            )]),
        )
        .await;
    }

    async fn confirm_corp_details(&self, cx: &StepContext<'_>) {
        let required = ["company-name", "contact-name", "contact-email"];
        if required.iter().any(|key| !cx.has_value(key)) {
            cx.say_agent("Add company name, contact name, and email to move ahead.")
                .await;
            return;
        }

        cx.capture(COMPANY, cx.value_or("company-name", "")).await;
        cx.capture(CONTACT_NAME, cx.value_or("contact-name", "")).await;
        cx.capture(CONTACT_EMAIL, cx.value_or("contact-email", "")).await;
        cx.capture(GST, cx.value_or("gst", "Pending verification")).await;
        cx.capture(CIN, cx.value_or("cin", "Pending verification")).await;

        cx.say_user("Corporate details confirmed ✓").await;
        cx.advance_step(0, 1).await;

        cx.think(&[
            "Validating GST & CIN with registries...",
            "Checking corporate structure & status...",
            "Completing KYB checks...",
        ])
        .await;
        cx.pause_ms(700).await;

        cx.push(
            Message::new(MessageBody::InfoCard(
                InfoCard::new("KYB verification complete")
                    .with_subtitle("We've verified the business and compliance status.")
                    .with_items(vec![
                        LabelValue::new("Status", "Verified"),
                        LabelValue::new("Business registration", "Matches GST/CIN"),
                        LabelValue::new("Corporate structure", "Validated"),
                        LabelValue::new("Tax checks", "No issues detected"),
                    ]),
            ))
            .with_actions(vec![ActionChoice::primary(
                "Review verified details",
                CONTINUE_FROM_KYB,
            )]),
        )
        .await;
    }

    async fn continue_from_kyb(&self, cx: &StepContext<'_>) {
        cx.say_user("Review KYB-verified details").await;
        cx.advance_step(1, 2).await;

        let company = cx.captured(COMPANY).await.unwrap_or_default();
        let contact = cx.captured(CONTACT_NAME).await.unwrap_or_default();
        let email = cx.captured(CONTACT_EMAIL).await.unwrap_or_default();
        let gst = cx.captured(GST).await.unwrap_or_default();
        let cin = cx.captured(CIN).await.unwrap_or_default();
        cx.push(
            Message::new(MessageBody::Interactive {
                prompt: Some("Verified corporate profile".into()),
                fields: vec![
                    DetailField::verified("Company", company),
                    DetailField::verified("Primary Contact", contact),
                    DetailField::verified("Contact Email", email),
                    DetailField::verified("GST", gst),
                    DetailField::verified("CIN", cin),
                ],
            })
            .with_actions(vec![ActionChoice::primary(
                "Continue to connection setup",
                CONNECTION_SELF,
            )]),
        )
        .await;
    }

    async fn connection_self(&self, cx: &StepContext<'_>) {
        cx.say_user("Set up HRMS connection").await;
        cx.advance_step(2, 3).await;

        cx.push(
            Message::new(MessageBody::Interactive {
                prompt: Some("Connection setup".into()),
                fields: vec![
                    DetailField::verified("Mode", "Self setup"),
                    DetailField::plain("Alternative", "Invite corporate HR to set up"),
                ],
            })
            .with_actions(vec![ActionChoice::primary(
                "Continue with self setup",
                CHOOSE_HRMS,
            )]),
        )
        .await;
    }

    async fn choose_hrms(&self, cx: &StepContext<'_>) {
        cx.say_user("Use HRMS as data source").await;
        cx.advance_step(3, 4).await;

        cx.push(
            Message::new(MessageBody::Interactive {
                prompt: Some("Data source".into()),
                fields: vec![
                    DetailField::verified("Selected", "HRMS"),
                    DetailField::plain("Alternatives", "SFTP, Push API, CSV upload"),
                ],
            })
            .with_actions(vec![ActionChoice::primary("Continue with HRMS", SELECT_HRMS)]),
        )
        .await;
    }

    async fn select_hrms(&self, cx: &StepContext<'_>) {
        let provider = cx.value_or("provider", HRMS_PROVIDERS[0]);
        cx.capture(PROVIDER, &provider).await;
        cx.say_user(format!("HRMS provider selected: {provider}")).await;
        cx.advance_step(4, 5).await;

        cx.push(
            Message::new(MessageBody::Interactive {
                prompt: Some("HRMS provider".into()),
                fields: vec![
                    DetailField::verified("Provider", &provider),
                    DetailField::plain("Also supported", HRMS_PROVIDERS.join(", ")),
                ],
            })
            .with_actions(vec![ActionChoice::primary("Confirm provider", SHOW_HRMS_CREDS)]),
        )
        .await;
    }

    async fn show_hrms_creds(&self, cx: &StepContext<'_>) {
        let provider = self.provider(cx).await;
        cx.push(
            Message::new(MessageBody::Interactive {
                prompt: Some(format!("{provider} connection")),
                fields: vec![
                    DetailField::editable("Host URL", ""),
                    DetailField::editable("Username", ""),
                    DetailField::editable("Password", ""),
                ],
            })
            .with_actions(vec![ActionChoice::primary("Connect HRMS", CONNECT_HRMS)]),
        )
        .await;
    }

    async fn connect_hrms(&self, cx: &StepContext<'_>) {
        let creds = HrmsCredentials::from_context(cx);
        if !creds.is_complete() {
            cx.say_agent("Add host URL, username, and password to connect your HRMS.")
                .await;
            return;
        }

        cx.say_user("Connect HRMS").await;
        cx.advance_step(5, 6).await;

        let provider = self.provider(cx).await;
        let connecting = format!("Establishing secure connection with {provider}...");
        cx.think(&[
            "Encrypting credentials...",
            &connecting,
            "Fetching available data fields...",
        ])
        .await;
        cx.pause_ms(800).await;

        cx.push(
            Message::new(MessageBody::Interactive {
                prompt: Some("Data mapping".into()),
                fields: vec![
                    DetailField::verified("Mandatory fields", "10 of 10 mapped"),
                    DetailField::verified("Employee fields", "6 selected"),
                    DetailField::plain("Company fields", "Optional, none selected"),
                    DetailField::plain("Connected as", creds.username),
                    DetailField::plain("Host", creds.host),
                ],
            })
            .with_actions(vec![ActionChoice::primary(
                "Configure & continue",
                CONFIRM_MAPPING,
            )]),
        )
        .await;
    }

    async fn confirm_mapping(&self, cx: &StepContext<'_>) {
        cx.say_user("Confirm field mapping").await;
        cx.advance_step(6, 7).await;

        cx.think(&[
            "Activating HRMS connection...",
            "Starting initial employee data sync...",
        ])
        .await;
        cx.pause_ms(900).await;
        cx.complete_step(7).await;

        let provider = self.provider(cx).await;
        let company = cx
            .captured(COMPANY)
            .await
            .unwrap_or_else(|| "the new corporate".into());
        cx.succeed(
            SuccessCard::new("Connection Successful")
                .with_details(vec![
                    format!("HRMS connection established with {provider}."),
                    format!("Data sync is now active for {company}."),
                    "Mandatory employee and company fields are mapped.".into(),
                ])
                .with_next_steps(vec![
                    "Monitor first sync in analytics.".into(),
                    "Configure product eligibility for this corporate.".into(),
                    "Invite employees to activate salary accounts.".into(),
                ]),
        )
        .await;
    }

    async fn provider(&self, cx: &StepContext<'_>) -> String {
        cx.captured(PROVIDER)
            .await
            .unwrap_or_else(|| HRMS_PROVIDERS[0].to_string())
    }
}

#[async_trait]
impl JourneyScript for CorporateOnboardingFlow {
    fn id(&self) -> JourneyId {
        JourneyId::CorporateOnboarding
    }

    fn actions(&self) -> &'static [&'static str] {
        &[
            START_ONBOARDING,
            CONFIRM_CORP_DETAILS,
            CONTINUE_FROM_KYB,
            CONNECTION_SELF,
            CHOOSE_HRMS,
            SELECT_HRMS,
            SHOW_HRMS_CREDS,
            CONNECT_HRMS,
            CONFIRM_MAPPING,
        ]
    }

    async fn start(&self, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        self.begin(cx).await;
        Ok(())
    }

    async fn on_action(&self, action: &str, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        match action {
            START_ONBOARDING => self.begin(cx).await,
            CONFIRM_CORP_DETAILS => self.confirm_corp_details(cx).await,
            CONTINUE_FROM_KYB => self.continue_from_kyb(cx).await,
            CONNECTION_SELF => self.connection_self(cx).await,
            CHOOSE_HRMS => self.choose_hrms(cx).await,
            SELECT_HRMS => self.select_hrms(cx).await,
            SHOW_HRMS_CREDS => self.show_hrms_creds(cx).await,
            CONNECT_HRMS => self.connect_hrms(cx).await,
            CONFIRM_MAPPING => self.confirm_mapping(cx).await,
            other => return Err(JourneyError::UnknownAction { id: other.into() }),
        }
        Ok(())
    }
}
