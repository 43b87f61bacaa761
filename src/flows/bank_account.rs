//! Bank-account journey — the full five-stage digital account opening:
//! mobile OTP, Aadhaar eKYC, video-KYC scheduling, setup summary, and
//! activation, plus the follow-up actions reachable from the success card
//! (salary-account request, credit offers, card activation, email details).

use async_trait::async_trait;
use rust_decimal_macros::dec;

use crate::error::JourneyError;
use crate::journey::message::{CardOffer, DetailField, InfoCard, InputSpec, LabelValue, OfferCard, OfferDetail};
use crate::journey::{ActionChoice, JourneyId, Message, MessageBody, SuccessCard};
use crate::mock::{account_number, format_lakh, masked_card, reference, virtual_card_number};

use super::credit_card::application_fields;
use super::{JourneyScript, StepContext};

/// Stage labels, fixed for the life of the journey.
pub const STAGES: &[&str] = &[
    "Mobile Verification",
    "Aadhaar eKYC",
    "Video KYC Scheduling",
    "Account Setup",
    "Account Activation",
];

const VERIFY_MOBILE_OTP: &str = "verify-mobile-otp";
const VERIFY_PAN_AADHAAR: &str = "verify-pan-aadhaar";
const VERIFY_AADHAAR_OTP: &str = "verify-aadhaar-otp";
const VKYC_SLOT_1: &str = "schedule-vkyc-slot1";
const VKYC_SLOT_2: &str = "schedule-vkyc-slot2";
const VKYC_LATER: &str = "schedule-vkyc-later";
const CONFIRM_PREFERENCES: &str = "confirm-preferences";
const REQUEST_SALARY_ACCOUNT: &str = "request-salary-account";
const VIEW_CREDIT_OFFERS: &str = "view-credit-offers";
const SELECT_CREDIT_OFFER: &str = "select-credit-card-offer";
const CONFIRM_CREDIT_APPLICATION: &str = "confirm-credit-card-application";
const EMAIL_DETAILS: &str = "email-details";
const ACTIVATE_VCARD: &str = "activate-vcard";
const VERIFY_CARD_DETAILS: &str = "verify-card-details";
const VERIFY_CARD_OTP: &str = "verify-card-otp";
const FINALIZE_CARD: &str = "finalize-card-activation";

/// Fallback demo OTPs used when the input is left blank.
const MOBILE_OTP_FALLBACK: &str = "123456";
const AADHAAR_OTP_FALLBACK: &str = "654321";
const CARD_OTP_FALLBACK: &str = "123456";

/// Captured-input keys.
const VKYC_SLOT: &str = "bank-account.vkyc-slot";
const VIRTUAL_CARD: &str = "bank-account.virtual-card";
const ACCOUNT_NUMBER: &str = "bank-account.number";
const CHOSEN_OFFER: &str = "bank-account.credit-offer";

pub struct BankAccountFlow;

fn preapproved_offers() -> Vec<CardOffer> {
    vec![
        CardOffer {
            name: "Millennia Credit Card".into(),
            credit_limit: dec!(500000),
            annual_fee: "₹1,000/year (1st year free)".into(),
            benefits: vec![
                "5% cashback on online shopping".into(),
                "2.5% cashback on all other spends".into(),
                "1000 reward points on joining".into(),
                "Fuel surcharge waiver".into(),
                "Complimentary airport lounge access (4/year)".into(),
            ],
        },
        CardOffer {
            name: "Regalia Credit Card".into(),
            credit_limit: dec!(800000),
            annual_fee: "₹2,500/year (waived on ₹3L spends)".into(),
            benefits: vec![
                "4 reward points per ₹150 spent".into(),
                "Unlimited domestic lounge access".into(),
                "International lounge access (6/year)".into(),
                "Complimentary movie tickets (2/month)".into(),
                "₹5,000 welcome voucher".into(),
            ],
        },
        CardOffer {
            name: "Infinia Credit Card".into(),
            credit_limit: dec!(1000000),
            annual_fee: "₹10,000/year (super premium)".into(),
            benefits: vec![
                "10X rewards on travel & dining".into(),
                "Unlimited lounge access worldwide".into(),
                "Concierge service 24/7".into(),
                "Golf privileges at 250+ courses".into(),
                "₹10,000 hotel voucher on joining".into(),
            ],
        },
    ]
}

fn slot_label(action: &str) -> &'static str {
    match action {
        VKYC_SLOT_1 => "Today 2:00 PM",
        VKYC_SLOT_2 => "Today 4:00 PM",
        _ => "Later",
    }
}

impl BankAccountFlow {
    async fn verify_mobile_otp(&self, cx: &StepContext<'_>) {
        let otp = cx.value_or("mobile-otp", MOBILE_OTP_FALLBACK);
        cx.say_user(format!("{otp} ✓")).await;
        cx.complete_step(0).await;
        cx.pause_ms(400).await;

        cx.say_agent(
            "Mobile verified successfully! Now let's complete your identity \
             verification with Aadhaar eKYC.",
        )
        .await;
        cx.beat().await;

        cx.start_step(1).await;
        cx.pause_ms(400).await;

        let profile = cx.profile();
        cx.push(
            Message::new(MessageBody::Interactive {
                prompt: Some(
                    "I've pre-filled your details from our records. Please verify:".into(),
                ),
                fields: vec![
                    DetailField::verified("PAN Number", &profile.pan),
                    DetailField::editable("Aadhaar Number", &profile.aadhaar),
                    DetailField::verified("Date of Birth", &profile.date_of_birth),
                    DetailField::verified("Name as per Aadhaar", &profile.name),
                ],
            })
            .with_actions(vec![ActionChoice::primary(
                "Verify & Start eKYC",
                VERIFY_PAN_AADHAAR,
            )]),
        )
        .await;
    }

    async fn verify_pan_aadhaar(&self, cx: &StepContext<'_>) {
        cx.say_user("Confirmed ✓").await;
        cx.pause_ms(400).await;

        cx.think(&[
            "Connecting to UIDAI...",
            "Initiating Aadhaar eKYC...",
            "Sending OTP to Aadhaar-linked mobile...",
        ])
        .await;

        cx.say_agent(
            "Perfect! I'm sending an OTP to your Aadhaar-linked mobile number \
             for eKYC verification.",
        )
        .await;
        cx.pause_ms(700).await;

        cx.push(
            Message::new(MessageBody::InfoCard(
                InfoCard::new("OTP sent to Aadhaar-linked number")
                    .with_subtitle("Enter the 6-digit code sent to XXXXXX4210")
                    .with_input(InputSpec::otp("aadhaar-otp")),
            ))
            .with_actions(vec![ActionChoice::primary("Verify OTP", VERIFY_AADHAAR_OTP)]),
        )
        .await;
    }

    async fn verify_aadhaar_otp(&self, cx: &StepContext<'_>) {
        let otp = cx.value_or("aadhaar-otp", AADHAAR_OTP_FALLBACK);
        cx.say_user(format!("{otp} ✓")).await;

        cx.think(&[
            "Validating Aadhaar OTP...",
            "e-KYC data retrieved successfully",
            "Address and identity confirmed",
        ])
        .await;
        cx.complete_step(1).await;

        cx.say_agent("Excellent! Your Aadhaar eKYC is complete. Here's what we verified:")
            .await;
        cx.pause_ms(600).await;

        let profile = cx.profile();
        cx.push(Message::new(MessageBody::Interactive {
            prompt: Some(format!("Address from Aadhaar:\n{}", profile.address)),
            fields: vec![
                DetailField::verified("Name", &profile.name),
                DetailField::verified("Date of Birth", &profile.date_of_birth),
                DetailField::verified("Address", &profile.address),
                DetailField::verified("PAN", &profile.pan),
            ],
        }))
        .await;
        cx.pause_ms(800).await;

        cx.start_step(2).await;
        cx.say_agent(
            "Now, let's schedule your Video KYC to upgrade to a full-access \
             account. This is a quick 5-7 minute video call.",
        )
        .await;
        cx.pause_ms(700).await;

        cx.push(
            Message::new(MessageBody::InfoCard(
                InfoCard::new("Video KYC Scheduling")
                    .with_subtitle("Required for full account access & higher limits")
                    .with_items(vec![
                        LabelValue::new("Duration", "5-7 minutes"),
                        LabelValue::new("Documents needed", "PAN & Aadhaar"),
                        LabelValue::new("Process", "Live signature + Liveness check"),
                        LabelValue::new("Security", "Encrypted & Recorded"),
                    ]),
            ))
            .with_actions(vec![
                ActionChoice::primary("Today 2:00 PM", VKYC_SLOT_1),
                ActionChoice::secondary("Today 4:00 PM", VKYC_SLOT_2),
                ActionChoice::ghost("Choose Another Time", VKYC_LATER),
            ]),
        )
        .await;
    }

    async fn schedule_vkyc(&self, action: &str, cx: &StepContext<'_>) {
        let slot = slot_label(action);
        cx.say_user(slot).await;
        cx.complete_step(2).await;
        cx.capture(VKYC_SLOT, slot).await;
        cx.pause_ms(400).await;

        cx.say_agent(format!(
            "Perfect! Video KYC scheduled for {slot}. You'll get a reminder \
             15 minutes before."
        ))
        .await;
        cx.pause_ms(600).await;

        cx.push(Message::new(MessageBody::InfoCard(
            InfoCard::new("Video KYC Confirmed")
                .with_subtitle(format!("Scheduled for {slot}"))
                .with_items(vec![
                    LabelValue::new("Reminder", "15 mins before via SMS"),
                    LabelValue::new("Duration", "5-7 minutes"),
                ]),
        )))
        .await;
        cx.pause_ms(700).await;

        cx.start_step(3).await;
        cx.say_agent(
            "Great! Let me show you a summary of your account details before we proceed:",
        )
        .await;
        cx.beat().await;

        let profile = cx.profile();
        cx.push(
            Message::new(MessageBody::InfoCard(
                InfoCard::new("Account Setup Summary")
                    .with_subtitle("Please review your information")
                    .with_items(vec![
                        LabelValue::new("Full Name", &profile.name),
                        LabelValue::new("PAN Number", &profile.pan),
                        LabelValue::new("Aadhaar", &profile.aadhaar),
                        LabelValue::new("Date of Birth", &profile.date_of_birth),
                        LabelValue::new("Mobile Number", &profile.phone),
                        LabelValue::new("Email", &profile.email),
                        LabelValue::new("Delivery Address", &profile.address),
                        LabelValue::new("Account Type", "Savings Account"),
                        LabelValue::new("Video KYC", slot),
                    ]),
            ))
            .with_actions(vec![ActionChoice::primary(
                "Confirm & Create Account",
                CONFIRM_PREFERENCES,
            )]),
        )
        .await;
    }

    async fn confirm_preferences(&self, cx: &StepContext<'_>) {
        cx.say_user("Confirmed ✓").await;
        cx.complete_step(3).await;
        cx.pause_ms(400).await;

        cx.start_step(4).await;
        cx.think(&[
            "Creating your savings account...",
            "Generating virtual debit card...",
            "Setting up UPI...",
            "Preparing account details...",
            "Account activated successfully!",
        ])
        .await;
        cx.complete_step(4).await;

        let account = account_number();
        let card = virtual_card_number();
        cx.capture(ACCOUNT_NUMBER, &account).await;
        cx.capture(VIRTUAL_CARD, &card).await;

        cx.say_agent("Congratulations! Your account is ready. Here's what you can do next:")
            .await;
        cx.pause_ms(600).await;

        let profile = cx.profile();
        let upi = format!(
            "{}@demobank",
            profile.first_name().to_lowercase()
        );
        // Follow-up actions ride on the success card; the journey itself is
        // closed once it lands.
        cx.push(
            Message::new(MessageBody::Success(
                SuccessCard::new("Your Account is Live!")
                    .with_reference(account.clone())
                    .with_details(vec![
                        format!("Account Number: {account}"),
                        "IFSC Code: DEMO0000001".into(),
                        "Branch: MG Road, Bangalore".into(),
                        "Account Type: Savings Account".into(),
                        format!("Virtual Card: {}", masked_card(&card)),
                        format!("UPI ID: {upi}"),
                        "Min Balance: ₹10,000 (MAB)".into(),
                        "Welcome Bonus: ₹500 on first txn".into(),
                    ])
                    .with_next_steps(vec![
                        "Video KYC scheduled - complete it for full access".into(),
                        "Physical debit card arriving in 7-10 days".into(),
                        "Upgrade to a salary account with HR approval: ₹0 MAB, unlimited free transactions".into(),
                        "Start transacting via UPI, IMPS, NEFT".into(),
                    ]),
            ))
            .with_actions(vec![
                ActionChoice::primary(
                    "Request HR to Make This Salary Account",
                    REQUEST_SALARY_ACCOUNT,
                ),
                ActionChoice::secondary("View Credit Card Offers", VIEW_CREDIT_OFFERS),
                ActionChoice::secondary("Activate Virtual Card", ACTIVATE_VCARD),
                ActionChoice::ghost("Email Me the Details", EMAIL_DETAILS),
            ]),
        )
        .await;
        cx.finish_journey().await;
    }

    async fn request_salary_account(&self, cx: &StepContext<'_>) {
        cx.say_user("Request HR to make this salary account").await;
        cx.pause_ms(400).await;

        cx.think(&[
            "Sending request to HR department...",
            "Request submitted successfully",
        ])
        .await;

        cx.say_agent(
            "I've sent the request to your HR department. Once approved, your \
             account will be upgraded to a salary account with premium benefits \
             including zero balance requirement and unlimited free transactions.",
        )
        .await;
        cx.pause_ms(600).await;

        let company = cx.profile().company.clone();
        cx.succeed(
            SuccessCard::new("Salary Account Request Sent")
                .with_reference(reference("SAL"))
                .with_details(vec![
                    format!("Request sent to: {company} HR"),
                    "Status: Pending approval".into(),
                    "Expected time: 24-48 hours".into(),
                    "Notification: Via email & SMS".into(),
                ])
                .with_next_steps(vec![
                    "HR will review your request".into(),
                    "Approval notification via email".into(),
                    "Account upgraded automatically".into(),
                    "Benefits active immediately".into(),
                ]),
        )
        .await;
    }

    async fn view_credit_offers(&self, cx: &StepContext<'_>) {
        cx.say_user("View credit card offers").await;
        cx.pause_ms(400).await;

        cx.think(&[
            "Fetching pre-approved offers...",
            "Analyzing your profile...",
            "Offers ready!",
        ])
        .await;

        cx.say_agent(
            "Excellent! Based on your profile, you're pre-approved for these \
             premium credit cards:",
        )
        .await;
        cx.pause_ms(600).await;

        let cards = preapproved_offers();
        let actions = cards
            .iter()
            .map(|c| {
                ActionChoice::primary(
                    format!("Apply for {} ({} limit)", c.name, format_lakh(c.credit_limit)),
                    SELECT_CREDIT_OFFER,
                )
            })
            .collect();
        cx.push(
            Message::new(MessageBody::Offer(OfferCard {
                title: "Pre-Approved Credit Cards".into(),
                highlight: "Special offers for new customers".into(),
                detail: OfferDetail::CardOffers { cards },
            }))
            .with_actions(actions),
        )
        .await;
    }

    async fn select_credit_offer(&self, cx: &StepContext<'_>) {
        let chosen = cx.value_or("card", "Millennia Credit Card");
        cx.say_user(format!("Apply for {chosen}")).await;
        cx.capture(CHOSEN_OFFER, &chosen).await;
        cx.beat().await;

        cx.say_agent(
            "Perfect choice! Since you're a new account holder, your application \
             will be fast-tracked. Let me verify your details:",
        )
        .await;
        cx.beat().await;

        cx.push(
            Message::new(MessageBody::Confirmation {
                title: "Confirm Application Details".into(),
                fields: application_fields(cx.profile()),
            })
            .with_actions(vec![ActionChoice::primary(
                "Confirm Details",
                CONFIRM_CREDIT_APPLICATION,
            )]),
        )
        .await;
    }

    async fn confirm_credit_application(&self, cx: &StepContext<'_>) {
        cx.say_user("Application details confirmed ✓").await;

        cx.think(&[
            "Processing credit card application...",
            "Credit check completed",
            "Application submitted",
        ])
        .await;
        cx.beat().await;

        let card = cx
            .captured(CHOSEN_OFFER)
            .await
            .unwrap_or_else(|| "Millennia Credit Card".into());
        cx.succeed(
            SuccessCard::new("Credit Card Application Submitted!")
                .with_reference(reference("CC"))
                .with_details(vec![
                    "Status: Pre-approved - under final review".into(),
                    format!("Card: {card}"),
                    "Expected approval: 2-3 business days".into(),
                    "Card delivery: 5-7 days post approval".into(),
                ])
                .with_next_steps(vec![
                    "Instant approval notification via SMS".into(),
                    "Virtual card available immediately".into(),
                    "Physical card delivered to registered address".into(),
                    "Activate via mobile app or SMS".into(),
                ]),
        )
        .await;
    }

    async fn email_details(&self, cx: &StepContext<'_>) {
        cx.say_user("Email me the details").await;
        cx.pause_ms(400).await;

        cx.think(&[
            "Composing email with account details...",
            "Email sent successfully!",
        ])
        .await;

        let email = cx.profile().email.clone();
        cx.say_agent(format!("Account details sent to {email}.")).await;
    }

    async fn activate_vcard(&self, cx: &StepContext<'_>) {
        cx.say_user("Activate virtual card").await;
        cx.pause_ms(400).await;

        cx.say_agent(
            "Let's activate your virtual debit card. For security, I need to \
             verify a few details first.",
        )
        .await;
        cx.pause_ms(600).await;

        let card = match cx.captured(VIRTUAL_CARD).await {
            Some(card) => card,
            None => {
                let card = virtual_card_number();
                cx.capture(VIRTUAL_CARD, &card).await;
                card
            }
        };
        let last_four = card[card.len() - 4..].to_string();
        cx.push(
            Message::new(MessageBody::Interactive {
                prompt: Some(
                    "Your virtual card has been generated. Please verify the last 4 digits:"
                        .into(),
                ),
                fields: vec![
                    DetailField::verified("Card Number", masked_card(&card)),
                    DetailField::verified("Card Type", "Visa Debit"),
                    DetailField::verified("Valid Until", "12/2028"),
                    DetailField::verified("Last 4 Digits", last_four),
                ],
            })
            .with_actions(vec![ActionChoice::primary(
                "Verify & Continue",
                VERIFY_CARD_DETAILS,
            )]),
        )
        .await;
    }

    async fn verify_card_details(&self, cx: &StepContext<'_>) {
        cx.say_user("Card verified ✓").await;
        cx.pause_ms(400).await;

        cx.say_agent(
            "Great! Now let's set up your card security. I'll send an OTP to \
             your registered mobile.",
        )
        .await;
        cx.pause_ms(600).await;

        let phone = cx.profile().phone.clone();
        cx.push(
            Message::new(MessageBody::InfoCard(
                InfoCard::new("Card activation OTP")
                    .with_subtitle(format!("Enter the 6-digit code sent to {phone}"))
                    .with_input(InputSpec::otp("card-activation-otp")),
            ))
            .with_actions(vec![ActionChoice::primary(
                "Verify OTP & Continue",
                VERIFY_CARD_OTP,
            )]),
        )
        .await;
    }

    async fn verify_card_otp(&self, cx: &StepContext<'_>) {
        let otp = cx.value_or("card-activation-otp", CARD_OTP_FALLBACK);
        cx.say_user(format!("{otp} ✓")).await;
        cx.pause_ms(400).await;

        cx.say_agent("Perfect! Now set transaction limits for your virtual card:")
            .await;
        cx.beat().await;

        cx.push(
            Message::new(MessageBody::Interactive {
                prompt: Some("You can customize these limits anytime in the app:".into()),
                fields: vec![
                    DetailField::editable("Daily Online Limit", "₹50,000"),
                    DetailField::editable("Per Transaction Limit", "₹25,000"),
                    DetailField::verified("International Usage", "Disabled (Enable in app)"),
                    DetailField::verified("Contactless Payment", "Enabled"),
                ],
            })
            .with_actions(vec![ActionChoice::primary(
                "Accept & Activate Card",
                FINALIZE_CARD,
            )]),
        )
        .await;
    }

    async fn finalize_card(&self, cx: &StepContext<'_>) {
        cx.say_user("Limits confirmed ✓").await;
        cx.pause_ms(400).await;

        cx.think(&[
            "Activating your virtual debit card...",
            "Setting up security protocols...",
            "Configuring transaction limits...",
            "Card activated successfully!",
        ])
        .await;

        cx.say_agent("Your virtual debit card is now active and ready for online transactions!")
            .await;
        cx.pause_ms(600).await;

        let card = match cx.captured(VIRTUAL_CARD).await {
            Some(card) => card,
            None => virtual_card_number(),
        };
        cx.push(Message::new(MessageBody::InfoCard(
            InfoCard::new("Virtual Card Active")
                .with_subtitle("Use for online payments immediately")
                .with_items(vec![
                    LabelValue::new("Card Number", masked_card(&card)),
                    LabelValue::new("Card Type", "Visa Debit"),
                    LabelValue::new("Valid Until", "12/2028"),
                    LabelValue::new("CVV", "View in app"),
                    LabelValue::new("Daily Limit", "₹50,000"),
                    LabelValue::new("Status", "Active ✓"),
                ]),
        )))
        .await;
    }
}

#[async_trait]
impl JourneyScript for BankAccountFlow {
    fn id(&self) -> JourneyId {
        JourneyId::BankAccount
    }

    fn actions(&self) -> &'static [&'static str] {
        &[
            VERIFY_MOBILE_OTP,
            VERIFY_PAN_AADHAAR,
            VERIFY_AADHAAR_OTP,
            VKYC_SLOT_1,
            VKYC_SLOT_2,
            VKYC_LATER,
            CONFIRM_PREFERENCES,
            REQUEST_SALARY_ACCOUNT,
            VIEW_CREDIT_OFFERS,
            SELECT_CREDIT_OFFER,
            CONFIRM_CREDIT_APPLICATION,
            EMAIL_DETAILS,
            ACTIVATE_VCARD,
            VERIFY_CARD_DETAILS,
            VERIFY_CARD_OTP,
            FINALIZE_CARD,
        ]
    }

    async fn start(&self, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        cx.begin_journey(self.id(), STAGES).await;
        cx.start_step(0).await;

        cx.think(&["Verifying mobile number...", "Number linked to profile"])
            .await;
        cx.beat().await;

        let phone = cx.profile().phone.clone();
        cx.say_agent(format!(
            "Verifying your mobile number {phone}. Sending code..."
        ))
        .await;
        cx.pause_ms(600).await;

        cx.push(
            Message::new(MessageBody::InfoCard(
                InfoCard::new("OTP sent to your mobile")
                    .with_subtitle(format!("Enter the 6-digit code sent to {phone}"))
                    .with_input(InputSpec::otp("mobile-otp")),
            ))
            .with_actions(vec![ActionChoice::primary("Verify OTP", VERIFY_MOBILE_OTP)]),
        )
        .await;
        Ok(())
    }

    async fn on_action(&self, action: &str, cx: &StepContext<'_>) -> Result<(), JourneyError> {
        match action {
            VERIFY_MOBILE_OTP => self.verify_mobile_otp(cx).await,
            VERIFY_PAN_AADHAAR => self.verify_pan_aadhaar(cx).await,
            VERIFY_AADHAAR_OTP => self.verify_aadhaar_otp(cx).await,
            VKYC_SLOT_1 | VKYC_SLOT_2 | VKYC_LATER => self.schedule_vkyc(action, cx).await,
            CONFIRM_PREFERENCES => self.confirm_preferences(cx).await,
            REQUEST_SALARY_ACCOUNT => self.request_salary_account(cx).await,
            VIEW_CREDIT_OFFERS => self.view_credit_offers(cx).await,
            SELECT_CREDIT_OFFER => self.select_credit_offer(cx).await,
            CONFIRM_CREDIT_APPLICATION => self.confirm_credit_application(cx).await,
            EMAIL_DETAILS => self.email_details(cx).await,
            ACTIVATE_VCARD => self.activate_vcard(cx).await,
            VERIFY_CARD_DETAILS => self.verify_card_details(cx).await,
            VERIFY_CARD_OTP => self.verify_card_otp(cx).await,
            FINALIZE_CARD => self.finalize_card(cx).await,
            other => return Err(JourneyError::UnknownAction { id: other.into() }),
        }
        Ok(())
    }
}
