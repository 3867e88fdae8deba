//! Human-readable rationale for a VAT decision.
//!
//! Pure text composition over already computed facts: the outcome, the
//! compliance score and the risk list. Nothing here recomputes or alters them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::score::{ComplianceBand, ComplianceResult};
use crate::core::{BuyerType, CountryCode, TransactionFacts, VatCategory, VatOutcome, VatType};

pub const SECTION_RATIONALE: &str = "WHY THIS VAT RULE APPLIES";
pub const SECTION_UK_NOTE: &str = "UK-SPECIFIC NOTE";
pub const SECTION_COMPLIANCE: &str = "INVOICE COMPLIANCE";
pub const SECTION_OSS: &str = "OSS REGISTRATION";
pub const SECTION_RISKS: &str = "COMPLIANCE RISKS";

/// Annual EU-wide cross-border B2C threshold above which OSS registration is due.
pub const OSS_THRESHOLD_EUR: Decimal = dec!(10_000);

/// Everything the explainer reads.
#[derive(Debug, Clone)]
pub struct ExplanationInput<'a> {
    pub seller_country: CountryCode,
    pub buyer_country: CountryCode,
    pub buyer_type: BuyerType,
    pub category: VatCategory,
    pub rate: Decimal,
    pub vat_type: VatType,
    pub is_oss: bool,
    pub compliance_score: u32,
    pub risks: &'a [String],
    pub note: Option<&'a str>,
}

impl<'a> ExplanationInput<'a> {
    pub fn new(
        facts: &TransactionFacts,
        outcome: &'a VatOutcome,
        compliance: &ComplianceResult,
        risks: &'a [String],
    ) -> Self {
        Self {
            seller_country: facts.seller_country,
            buyer_country: facts.buyer_country,
            buyer_type: facts.buyer_type,
            category: facts.category,
            rate: outcome.vat_rate,
            vat_type: outcome.vat_type,
            is_oss: outcome.is_oss,
            compliance_score: compliance.score,
            risks,
            note: outcome.note.as_deref(),
        }
    }

    fn is_uk(&self) -> bool {
        self.seller_country == CountryCode::GB
    }

    fn is_cross_border(&self) -> bool {
        self.seller_country != self.buyer_country
    }
}

/// Compose the four-section explanation.
pub fn explain(
    outcome: &VatOutcome,
    compliance: &ComplianceResult,
    risks: &[String],
    facts: &TransactionFacts,
) -> String {
    explain_decision(&ExplanationInput::new(facts, outcome, compliance, risks))
}

/// Compose the four-section explanation from a prepared input.
pub fn explain_decision(input: &ExplanationInput<'_>) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(SECTION_RATIONALE.to_string());
    lines.push(rationale(input));
    if input.is_uk() {
        if let Some(note) = input.note {
            lines.push(String::new());
            lines.push(SECTION_UK_NOTE.to_string());
            lines.push(note.to_string());
        }
    }
    lines.push(String::new());

    lines.push(SECTION_COMPLIANCE.to_string());
    lines.push(compliance_narrative(input.compliance_score));
    lines.push(String::new());

    lines.push(SECTION_OSS.to_string());
    lines.push(oss_guidance(input));
    lines.push(String::new());

    lines.push(SECTION_RISKS.to_string());
    lines.extend(risk_lines(input));

    lines.join("\n")
}

fn pct(rate: Decimal) -> String {
    format!("{}%", rate.normalize())
}

fn rationale(input: &ExplanationInput<'_>) -> String {
    let seller = input.seller_country.name();
    let buyer = input.buyer_country.name();
    let category = input.category.label();
    let rate = pct(input.rate);

    match input.vat_type {
        VatType::Oss => format!(
            "This transaction is subject to EU One Stop Shop (OSS) VAT rules. Because the seller is based in {seller} and the buyer is a consumer (B2C) in {buyer}, the VAT rate of the buyer's country ({rate}) applies. Under EU OSS rules, cross-border B2C sales must charge VAT at the destination country's rate."
        ),
        VatType::ReverseCharge if input.is_uk() && input.category == VatCategory::IntraEuB2b => {
            "Reverse Charge applies to this Intra-EU B2B transaction from the United Kingdom. The buyer (EU business) is responsible for accounting for VAT in their own country. The seller issues a zero-rated invoice with a \"Reverse Charge\" note. A valid EU VAT ID from the buyer is required to apply this treatment.".to_string()
        }
        VatType::ReverseCharge => format!(
            "Reverse Charge applies because this is a B2B transaction between {seller} and {buyer}. Under EU VAT Directive Article 196, the buyer (business) is responsible for accounting for VAT in their own country. The seller issues a zero-rated invoice with a \"Reverse Charge\" note."
        ),
        VatType::Exempt => exempt_rationale(input),
        VatType::ZeroRated => zero_rated_rationale(input),
        VatType::Reduced => format!(
            "A reduced VAT rate of {rate} applies to \"{category}\" in {seller}. Member states may apply reduced rates to goods and services deemed socially or economically important. Always verify that your specific goods or services qualify for the reduced rate under national legislation."
        ),
        VatType::Standard if input.is_uk() && input.category == VatCategory::Hotel => {
            "Hotel accommodation in the United Kingdom is subject to the standard VAT rate of 20%. This applies to hotel stays, serviced apartments, and similar accommodation. The temporary reduced rate introduced during COVID-19 ended in April 2022.".to_string()
        }
        VatType::Standard if input.is_uk() && input.category == VatCategory::Transport => {
            "The standard VAT rate of 20% applies to this transport transaction in the United Kingdom. Taxis, private hire vehicles, and car hire are subject to the standard rate. Only public transport services (bus and train) qualify for the 0% zero rate, and only when confirmed as such.".to_string()
        }
        VatType::Standard => format!(
            "The standard VAT rate of {rate} applies in {seller} for the category \"{category}\". This is the default rate for goods and services where no exemption, zero-rating, or reduced rate applies."
        ),
        VatType::Unknown => format!(
            "The VAT treatment could not be determined: the transaction between {seller} and {buyer} is not covered by the configured VAT rules. No VAT has been applied. Check the seller and buyer countries before issuing an invoice."
        ),
    }
}

fn exempt_rationale(input: &ExplanationInput<'_>) -> String {
    match (input.is_uk(), input.category) {
        (true, VatCategory::FinancialServices) => "Financial Services are VAT-exempt in the United Kingdom under VATA 1994 Schedule 9. No VAT is charged on these services, and no input VAT reclaim is available on costs directly attributable to exempt financial services supplies.".to_string(),
        (true, VatCategory::Insurance) => "Insurance is VAT-exempt in the United Kingdom under VATA 1994 Schedule 9. No VAT is charged on insurance premiums. Insurance Premium Tax (IPT) applies separately at the standard (12%) or higher (20%) rate depending on the type of insurance, and must be accounted for on its own.".to_string(),
        (true, VatCategory::Education) => "Education is VAT-exempt in the United Kingdom under VATA 1994 Schedule 9 when provided by eligible bodies: schools, universities, and approved training providers. Always verify that your institution or training programme meets HMRC's eligibility criteria.".to_string(),
        (_, category) => format!(
            "The category \"{category}\" is VAT-exempt under EU and UK VAT legislation. Financial services, insurance, and education are specifically excluded from VAT. No VAT is charged and no input VAT can be reclaimed on related costs."
        ),
    }
}

fn zero_rated_rationale(input: &ExplanationInput<'_>) -> String {
    const RECLAIM: &str = "Zero-rated means VAT is technically charged at 0%, allowing the seller to reclaim input VAT on related business costs.";

    if !input.is_uk() {
        return format!(
            "The category \"{}\" is zero-rated in {}. {RECLAIM}",
            input.category,
            input.seller_country.name()
        );
    }

    match input.category {
        VatCategory::BasicFood => format!(
            "Basic food items are zero-rated for VAT in the United Kingdom under VATA 1994 Schedule 8. {RECLAIM} This applies to most food for human consumption, excluding items such as confectionery, crisps, and alcoholic drinks."
        ),
        VatCategory::Books => format!(
            "Books and printed publications are zero-rated for VAT in the United Kingdom under VATA 1994 Schedule 8. {RECLAIM}"
        ),
        VatCategory::Medical => format!(
            "Medical goods and services are zero-rated for VAT in the United Kingdom. {RECLAIM} This applies to qualifying medical equipment, drugs, and healthcare services."
        ),
        VatCategory::Exports => format!(
            "Exports of goods outside the United Kingdom are zero-rated for VAT under VATA 1994. {RECLAIM} Proof of export (customs documentation, shipping records) must be retained to support the zero-rating claim."
        ),
        VatCategory::Transport => format!(
            "Public transport services (bus and train) are zero-rated for VAT in the United Kingdom. {RECLAIM} Taxis and car hire remain subject to the standard 20% VAT rate."
        ),
        category => format!(
            "The category \"{category}\" is zero-rated for VAT in the United Kingdom. {RECLAIM}"
        ),
    }
}

fn compliance_narrative(score: u32) -> String {
    match ComplianceBand::from_score(score) {
        ComplianceBand::Excellent => format!(
            "Your invoice compliance score is {score}/100 — Excellent. The invoice appears to meet the key requirements for a compliant VAT invoice under EU Directive 2006/112/EC and UK VAT regulations."
        ),
        ComplianceBand::Good => format!(
            "Your invoice compliance score is {score}/100 — Good, but with some gaps. Review the warnings below to ensure full compliance before issuing the invoice."
        ),
        ComplianceBand::AttentionRequired => format!(
            "Your invoice compliance score is {score}/100 — Attention required. Several compliance issues have been detected. Address the warnings below before issuing this invoice to avoid penalties."
        ),
    }
}

fn oss_guidance(input: &ExplanationInput<'_>) -> String {
    let threshold = OSS_THRESHOLD_EUR.normalize();
    if input.is_oss {
        format!(
            "This transaction triggers EU OSS VAT obligations. If your total cross-border B2C sales within the EU exceed €{threshold} per year, you must register for the EU One Stop Shop (OSS) scheme. OSS lets you report and pay VAT for all EU countries through a single registration in your home country."
        )
    } else if input.is_cross_border() && input.buyer_type == BuyerType::B2c {
        format!(
            "This cross-border B2C transaction may approach OSS thresholds. Monitor your total EU cross-border B2C sales. Once they exceed €{threshold} annually, OSS registration becomes mandatory."
        )
    } else {
        "OSS registration is not required for this transaction. It is either domestic, B2B, or outside the EU OSS scope.".to_string()
    }
}

fn risk_lines(input: &ExplanationInput<'_>) -> Vec<String> {
    let mut lines: Vec<String> = input.risks.iter().map(|r| format!("• {r}")).collect();

    if input.vat_type == VatType::ReverseCharge {
        lines.push("• Ensure the invoice clearly states \"Reverse Charge — VAT to be accounted for by the customer\" as required by the EU VAT Directive.".to_string());
    }
    if input.buyer_type == BuyerType::B2b && input.is_cross_border() {
        lines.push("• Verify the buyer's VAT ID is valid using the EU VIES system before issuing the invoice.".to_string());
    }

    if lines.is_empty() {
        lines.push("No significant compliance risks detected for this transaction.".to_string());
    }
    lines
}
