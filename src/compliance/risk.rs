//! Supplementary risk flags.

use serde::{Deserialize, Serialize};

use crate::core::{BuyerType, CountryCode, TransactionFacts, VatCategory, VatClass, VatOutcome};

pub const OSS_REGISTRATION: &str = "Possible OSS VAT registration required";
pub const REDUCED_RATE_ELIGIBILITY: &str = "Verify eligibility for reduced VAT";
pub const UK_NO_INPUT_RECLAIM: &str = "No input VAT reclaim is available on costs directly attributable to exempt financial services supplies.";
pub const UK_INSURANCE_PREMIUM_TAX: &str = "Insurance Premium Tax (IPT) applies separately — ensure IPT is correctly calculated and reported.";
pub const UK_EDUCATION_ELIGIBILITY: &str = "Verify that the education provider meets HMRC eligibility criteria (schools, universities, approved training providers).";
pub const UK_PROOF_OF_EXPORT: &str = "Retain proof of export documentation (customs records, shipping evidence) to support the 0% zero-rating claim.";
pub const UK_EU_VAT_ID_REQUIRED: &str = "Obtain and verify a valid EU VAT ID from the buyer before applying the reverse charge mechanism.";

/// Facts the risk flags are derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskInput {
    pub seller_country: CountryCode,
    pub buyer_country: CountryCode,
    pub buyer_type: BuyerType,
    pub category: VatCategory,
    pub vat_class: VatClass,
}

impl RiskInput {
    pub fn from_outcome(facts: &TransactionFacts, outcome: &VatOutcome) -> Self {
        Self {
            seller_country: facts.seller_country,
            buyer_country: facts.buyer_country,
            buyer_type: facts.buyer_type,
            category: facts.category,
            vat_class: outcome.vat_class,
        }
    }
}

/// Detect risk flags. The result is deduplicated and keeps detection order.
///
/// The cross-border B2C flag is a heuristic independent of the engine's own
/// OSS decision, so it also fires for UK sales.
pub fn detect_risks(input: &RiskInput) -> Vec<String> {
    let mut risks: Vec<String> = Vec::new();
    let mut push = |risk: &str| {
        if !risks.iter().any(|r| r == risk) {
            risks.push(risk.to_string());
        }
    };

    if input.seller_country != input.buyer_country && input.buyer_type == BuyerType::B2c {
        push(OSS_REGISTRATION);
    }
    if input.vat_class == VatClass::Reduced {
        push(REDUCED_RATE_ELIGIBILITY);
    }

    if input.seller_country == CountryCode::GB {
        match input.category {
            VatCategory::FinancialServices => push(UK_NO_INPUT_RECLAIM),
            VatCategory::Insurance => push(UK_INSURANCE_PREMIUM_TAX),
            VatCategory::Education => push(UK_EDUCATION_ELIGIBILITY),
            VatCategory::Exports => push(UK_PROOF_OF_EXPORT),
            VatCategory::IntraEuB2b => push(UK_EU_VAT_ID_REQUIRED),
            _ => {}
        }
    }

    risks
}
