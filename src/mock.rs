//! Static reference tables — the demo employee profile, corporate accounts,
//! roster rows, and product-eligibility rules scripts interpolate into
//! message text. Read-only; nothing here is ever mutated.

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// The employee persona every employee-side journey speaks to.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeProfile {
    pub name: String,
    pub company: String,
    pub employee_id: String,
    /// Annual salary in rupees.
    pub salary: Decimal,
    pub tenure_years: Decimal,
    pub email: String,
    pub phone: String,
    pub pan: String,
    pub address: String,
    /// Masked — only the last four digits are real.
    pub aadhaar: String,
    pub date_of_birth: String,
}

impl EmployeeProfile {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// A corporate account as the relationship-manager portal sees it.
#[derive(Debug, Clone, Serialize)]
pub struct CorporateAccount {
    pub company: String,
    pub gst: String,
    pub cin: String,
    pub poc_name: String,
    pub poc_email: String,
    pub employees: u32,
    pub status: &'static str,
}

/// A roster row as the HR portal sees it.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub salary: Decimal,
    pub salary_account_active: bool,
}

/// Minimum bar for a product offer to be scripted as "pre-approved".
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityRule {
    pub product: &'static str,
    pub min_salary: Decimal,
    pub min_tenure_years: Decimal,
    pub min_credit_score: u32,
}

/// HRMS providers offered during corporate onboarding.
pub const HRMS_PROVIDERS: &[&str] = &["Keka", "Darwinbox", "Zoho People", "greytHR"];

/// The demo employee profile.
pub fn demo_profile() -> EmployeeProfile {
    EmployeeProfile {
        name: "Rahul Sharma".into(),
        company: "Tech Corp India".into(),
        employee_id: "EMP12345".into(),
        salary: dec!(850000),
        tenure_years: dec!(3.5),
        email: "rahul.sharma@techcorp.in".into(),
        phone: "+91 98765 43210".into(),
        pan: "ABCDE1234F".into(),
        address: "123, MG Road, Bangalore - 560001".into(),
        aadhaar: "XXXX XXXX 4567".into(),
        date_of_birth: "15/08/1992".into(),
    }
}

/// Corporate accounts shown in the relationship-manager views.
pub fn corporate_accounts() -> Vec<CorporateAccount> {
    vec![
        CorporateAccount {
            company: "Tech Corp India".into(),
            gst: "29AABCT1332L1ZT".into(),
            cin: "U72200KA2011PTC060213".into(),
            poc_name: "Meera Iyer".into(),
            poc_email: "meera.iyer@techcorp.in".into(),
            employees: 1240,
            status: "active",
        },
        CorporateAccount {
            company: "Zenith Textiles".into(),
            gst: "27AAACZ4318M1ZK".into(),
            cin: "L17110MH1998PLC114801".into(),
            poc_name: "Arjun Mehta".into(),
            poc_email: "arjun.mehta@zenithtextiles.co.in".into(),
            employees: 430,
            status: "kyb_pending",
        },
        CorporateAccount {
            company: "Nimbus Logistics".into(),
            gst: "07AADCN8841P1ZF".into(),
            cin: "U63030DL2015PTC285699".into(),
            poc_name: "Sana Kapoor".into(),
            poc_email: "sana@nimbuslogistics.in".into(),
            employees: 86,
            status: "active",
        },
    ]
}

/// Roster rows shown in the HR views.
pub fn employee_records() -> Vec<EmployeeRecord> {
    vec![
        EmployeeRecord {
            employee_id: "EMP12345".into(),
            name: "Rahul Sharma".into(),
            department: "Engineering".into(),
            designation: "Senior Engineer".into(),
            salary: dec!(850000),
            salary_account_active: false,
        },
        EmployeeRecord {
            employee_id: "EMP12346".into(),
            name: "Priya Nair".into(),
            department: "Design".into(),
            designation: "Product Designer".into(),
            salary: dec!(720000),
            salary_account_active: true,
        },
        EmployeeRecord {
            employee_id: "EMP12347".into(),
            name: "Vikram Singh".into(),
            department: "Finance".into(),
            designation: "Analyst".into(),
            salary: dec!(640000),
            salary_account_active: true,
        },
        EmployeeRecord {
            employee_id: "EMP12348".into(),
            name: "Ananya Rao".into(),
            department: "Engineering".into(),
            designation: "Engineer".into(),
            salary: dec!(560000),
            salary_account_active: false,
        },
    ]
}

/// Product-eligibility bars backing the "pre-approved" scripting.
pub fn eligibility_rules() -> Vec<EligibilityRule> {
    vec![
        EligibilityRule {
            product: "personal-loan",
            min_salary: dec!(300000),
            min_tenure_years: dec!(1),
            min_credit_score: 700,
        },
        EligibilityRule {
            product: "credit-card",
            min_salary: dec!(400000),
            min_tenure_years: dec!(0.5),
            min_credit_score: 720,
        },
        EligibilityRule {
            product: "salary-account",
            min_salary: Decimal::ZERO,
            min_tenure_years: Decimal::ZERO,
            min_credit_score: 0,
        },
    ]
}

// ── Formatting & generated numbers ──────────────────────────────────────

/// Format rupees with Indian digit grouping: last three digits, then
/// groups of two (`₹15,00,000`).
pub fn format_inr(amount: Decimal) -> String {
    let rounded = amount.round();
    let negative = rounded.is_sign_negative();
    let digits = rounded.abs().to_string();

    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut parts: Vec<&str> = Vec::new();
        let bytes = head.as_bytes();
        let mut start = bytes.len() % 2;
        if start == 1 {
            parts.push(&head[..1]);
        }
        while start < head.len() {
            parts.push(&head[start..start + 2]);
            start += 2;
        }
        parts.push(tail);
        parts.join(",")
    };

    if negative {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Format rupees in lakhs (`₹8.5L`, `₹15L`).
pub fn format_lakh(amount: Decimal) -> String {
    let lakhs = (amount / dec!(100000)).round_dp(1).normalize();
    format!("₹{lakhs}L")
}

/// A reference number like `LA48291037`.
pub fn reference(prefix: &str) -> String {
    let n: u32 = rand::thread_rng().gen_range(10_000_000..100_000_000);
    format!("{prefix}{n}")
}

/// A demo savings-account number.
pub fn account_number() -> String {
    let n: u32 = rand::thread_rng().gen_range(1_000_000..10_000_000);
    format!("50100{n}")
}

/// A demo Visa-range virtual card number.
pub fn virtual_card_number() -> String {
    let mut rng = rand::thread_rng();
    let mut digits = String::from("4532");
    for _ in 0..12 {
        digits.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }
    digits
}

/// Mask a card number down to its first and last four digits.
pub fn masked_card(number: &str) -> String {
    if number.len() < 8 {
        return number.to_string();
    }
    format!(
        "{} XXXX XXXX {}",
        &number[..4],
        &number[number.len() - 4..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inr_grouping() {
        assert_eq!(format_inr(dec!(0)), "₹0");
        assert_eq!(format_inr(dec!(999)), "₹999");
        assert_eq!(format_inr(dec!(1000)), "₹1,000");
        assert_eq!(format_inr(dec!(50000)), "₹50,000");
        assert_eq!(format_inr(dec!(100000)), "₹1,00,000");
        assert_eq!(format_inr(dec!(1500000)), "₹15,00,000");
        assert_eq!(format_inr(dec!(10000000)), "₹1,00,00,000");
        assert_eq!(format_inr(dec!(-25363)), "-₹25,363");
    }

    #[test]
    fn inr_rounds_fractions() {
        assert_eq!(format_inr(dec!(16134.49)), "₹16,134");
        assert_eq!(format_inr(dec!(16134.50)), "₹16,134");
        assert_eq!(format_inr(dec!(16134.51)), "₹16,135");
    }

    #[test]
    fn lakh_formatting() {
        assert_eq!(format_lakh(dec!(850000)), "₹8.5L");
        assert_eq!(format_lakh(dec!(1500000)), "₹15L");
        assert_eq!(format_lakh(dec!(700000)), "₹7L");
        assert_eq!(format_lakh(dec!(1000000)), "₹10L");
    }

    #[test]
    fn reference_shape() {
        let r = reference("LA");
        assert!(r.starts_with("LA"));
        assert_eq!(r.len(), 10);
        assert!(r[2..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn account_number_shape() {
        let n = account_number();
        assert!(n.starts_with("50100"));
        assert_eq!(n.len(), 12);
        assert!(n.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn virtual_card_shape() {
        let n = virtual_card_number();
        assert!(n.starts_with("4532"));
        assert_eq!(n.len(), 16);
        assert!(n.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn masked_card_keeps_edges() {
        let masked = masked_card("4532123412349876");
        assert_eq!(masked, "4532 XXXX XXXX 9876");
        // Degenerate input passes through
        assert_eq!(masked_card("4532"), "4532");
    }

    #[test]
    fn demo_profile_is_internally_consistent() {
        let profile = demo_profile();
        assert_eq!(profile.first_name(), "Rahul");
        assert!(profile.email.contains("techcorp"));
        assert!(profile.aadhaar.starts_with("XXXX"));
        assert_eq!(profile.pan.len(), 10);
    }

    #[test]
    fn demo_profile_meets_preapproval_bars() {
        // The scripts present loan and card offers as pre-approved; the
        // demo profile must actually clear the rules that claim so.
        let profile = demo_profile();
        for rule in eligibility_rules() {
            assert!(
                profile.salary >= rule.min_salary,
                "{} salary bar not met",
                rule.product
            );
            assert!(
                profile.tenure_years >= rule.min_tenure_years,
                "{} tenure bar not met",
                rule.product
            );
        }
    }

    #[test]
    fn reference_tables_are_nonempty() {
        assert!(!corporate_accounts().is_empty());
        assert!(!employee_records().is_empty());
        assert!(!eligibility_rules().is_empty());
        assert!(!HRMS_PROVIDERS.is_empty());
    }

    #[test]
    fn roster_contains_demo_employee() {
        let records = employee_records();
        let rahul = records
            .iter()
            .find(|r| r.employee_id == "EMP12345")
            .expect("demo employee in roster");
        assert_eq!(rahul.salary, demo_profile().salary);
    }
}
