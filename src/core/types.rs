use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::countries::CountryCode;
use super::error::VatError;

/// Whether the buyer is a business or a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuyerType {
    /// Business customer.
    #[serde(rename = "B2B")]
    B2b,
    /// Private consumer.
    #[serde(rename = "B2C")]
    B2c,
}

impl BuyerType {
    pub fn from_is_b2b(is_b2b: bool) -> Self {
        if is_b2b { Self::B2b } else { Self::B2c }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::B2b => "B2B",
            Self::B2c => "B2C",
        }
    }
}

impl fmt::Display for BuyerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product/service category chosen for a transaction or invoice line.
///
/// The labels are shared verbatim with the category picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VatCategory {
    #[serde(rename = "Basic Food")]
    BasicFood,
    #[serde(rename = "Books")]
    Books,
    #[serde(rename = "Medical")]
    Medical,
    #[serde(rename = "Transport")]
    Transport,
    #[serde(rename = "Hotel")]
    Hotel,
    #[serde(rename = "Financial Services")]
    FinancialServices,
    #[serde(rename = "Insurance")]
    Insurance,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Exports")]
    Exports,
    #[serde(rename = "Intra-EU B2B")]
    IntraEuB2b,
    #[serde(rename = "Others")]
    Others,
}

impl VatCategory {
    /// All categories, in picker order.
    pub const ALL: [VatCategory; 11] = [
        Self::BasicFood,
        Self::Books,
        Self::Medical,
        Self::Transport,
        Self::Hotel,
        Self::FinancialServices,
        Self::Insurance,
        Self::Education,
        Self::Exports,
        Self::IntraEuB2b,
        Self::Others,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::BasicFood => "Basic Food",
            Self::Books => "Books",
            Self::Medical => "Medical",
            Self::Transport => "Transport",
            Self::Hotel => "Hotel",
            Self::FinancialServices => "Financial Services",
            Self::Insurance => "Insurance",
            Self::Education => "Education",
            Self::Exports => "Exports",
            Self::IntraEuB2b => "Intra-EU B2B",
            Self::Others => "Others",
        }
    }

    /// Parse an exact picker label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label.trim())
    }

    /// Categories that are VAT-exempt in every supported jurisdiction.
    pub fn is_exempt(&self) -> bool {
        matches!(
            self,
            Self::FinancialServices | Self::Insurance | Self::Education
        )
    }

    /// Categories eligible for a national reduced rate where no override applies.
    pub fn is_reduced_eligible(&self) -> bool {
        matches!(
            self,
            Self::BasicFood | Self::Books | Self::Medical | Self::Transport | Self::Hotel
        )
    }
}

impl fmt::Display for VatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VatCategory {
    type Err = VatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| VatError::UnknownCategory(s.to_string()))
    }
}

/// The treatment class selected by the engine. Exactly one per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatClass {
    Standard,
    Reduced,
    Zero,
    Exempt,
    ReverseCharge,
    Oss,
}

impl VatClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Reduced => "reduced",
            Self::Zero => "zero",
            Self::Exempt => "exempt",
            Self::ReverseCharge => "reverse_charge",
            Self::Oss => "oss",
        }
    }
}

/// Display label of the VAT treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VatType {
    #[serde(rename = "OSS VAT")]
    Oss,
    #[serde(rename = "Reverse Charge")]
    ReverseCharge,
    #[serde(rename = "Exempt")]
    Exempt,
    #[serde(rename = "Zero Rated")]
    ZeroRated,
    #[serde(rename = "Reduced")]
    Reduced,
    #[serde(rename = "Standard")]
    Standard,
    /// The jurisdiction is not covered by the rule table.
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl VatType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Oss => "OSS VAT",
            Self::ReverseCharge => "Reverse Charge",
            Self::Exempt => "Exempt",
            Self::ZeroRated => "Zero Rated",
            Self::Reduced => "Reduced",
            Self::Standard => "Standard",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for VatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The engine's sole input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFacts {
    pub seller_country: CountryCode,
    pub buyer_country: CountryCode,
    pub buyer_type: BuyerType,
    pub category: VatCategory,
    /// Net amount, assumed non-negative (validated by the caller).
    pub net_amount: Decimal,
    /// Confirmed bus/train service. Only consulted for UK transport.
    #[serde(default)]
    pub is_public_transport: bool,
}

impl TransactionFacts {
    pub fn new(
        seller_country: CountryCode,
        buyer_country: CountryCode,
        buyer_type: BuyerType,
        category: VatCategory,
        net_amount: Decimal,
    ) -> Self {
        Self {
            seller_country,
            buyer_country,
            buyer_type,
            category,
            net_amount,
            is_public_transport: false,
        }
    }

    pub fn public_transport(mut self, confirmed: bool) -> Self {
        self.is_public_transport = confirmed;
        self
    }

    pub fn is_cross_border(&self) -> bool {
        self.seller_country != self.buyer_country
    }
}

/// The engine's sole output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatOutcome {
    /// Taxable base the outcome was computed for.
    pub net_amount: Decimal,
    /// Applied rate in percent.
    pub vat_rate: Decimal,
    pub vat_type: VatType,
    /// `net_amount * vat_rate / 100`, unrounded.
    pub vat_amount: Decimal,
    /// `net_amount + vat_amount`.
    pub gross_total: Decimal,
    pub is_oss: bool,
    pub vat_class: VatClass,
    /// Jurisdiction-specific statutory note.
    pub note: Option<String>,
}

impl VatOutcome {
    /// Compute amounts for `net_amount` at `rate`.
    ///
    /// The rate is scaled to a fraction before multiplying, so the VAT amount
    /// never exceeds the net amount for rates up to 100%. Both amounts
    /// saturate at `Decimal::MAX` instead of overflowing.
    pub fn at_rate(net_amount: Decimal, rate: Decimal, vat_type: VatType, vat_class: VatClass) -> Self {
        let vat_amount = net_amount.saturating_mul(rate / Decimal::ONE_HUNDRED);
        Self {
            net_amount,
            vat_rate: rate,
            vat_type,
            vat_amount,
            gross_total: net_amount.saturating_add(vat_amount),
            is_oss: vat_class == VatClass::Oss,
            vat_class,
            note: None,
        }
    }

    /// Outcome for a jurisdiction missing from the rule table.
    pub fn unknown(net_amount: Decimal) -> Self {
        Self::at_rate(net_amount, Decimal::ZERO, VatType::Unknown, VatClass::Standard)
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note;
        self
    }

    /// Callers must surface this as a warning, not as a 0% standard rate.
    pub fn is_unknown(&self) -> bool {
        self.vat_type == VatType::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn category_labels_round_trip() {
        for c in VatCategory::ALL {
            assert_eq!(VatCategory::from_label(c.label()), Some(c));
        }
        assert_eq!(VatCategory::from_label("Groceries"), None);
        assert!("".parse::<VatCategory>().is_err());
    }

    #[test]
    fn category_serializes_as_label() {
        let json = serde_json::to_string(&VatCategory::IntraEuB2b).unwrap();
        assert_eq!(json, "\"Intra-EU B2B\"");
        let class = serde_json::to_string(&VatClass::ReverseCharge).unwrap();
        assert_eq!(class, "\"reverse_charge\"");
    }

    #[test]
    fn outcome_amounts() {
        let o = VatOutcome::at_rate(dec!(200), dec!(7), VatType::Reduced, VatClass::Reduced);
        assert_eq!(o.vat_amount, dec!(14));
        assert_eq!(o.gross_total, dec!(214));
        assert!(!o.is_oss);
    }

    #[test]
    fn fractional_rate_is_exact() {
        let o = VatOutcome::at_rate(dec!(33.33), dec!(5.5), VatType::Reduced, VatClass::Reduced);
        assert_eq!(o.vat_amount, dec!(1.83315));
        assert_eq!(o.net_amount + o.vat_amount, o.gross_total);
    }

    #[test]
    fn unknown_outcome_passes_net_through() {
        let o = VatOutcome::unknown(dec!(99.99));
        assert!(o.is_unknown());
        assert_eq!(o.vat_rate, Decimal::ZERO);
        assert_eq!(o.gross_total, dec!(99.99));
        assert_eq!(o.vat_class, VatClass::Standard);
    }
}
