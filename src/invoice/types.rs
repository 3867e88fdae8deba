use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{BuyerType, CountryCode, VatCategory, VatClass, VatType};

/// Invoice note required on reverse-charge invoices.
pub const REVERSE_CHARGE_NOTE: &str = "Reverse Charge — VAT to be accounted for by the customer";

/// BG-0: Assembled invoice, ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// BT-1: Invoice number.
    pub number: String,
    /// BT-2: Issue date.
    pub issue_date: NaiveDate,
    /// BT-9: Payment due date.
    pub due_date: Option<NaiveDate>,
    /// BT-5: Currency code (ISO 4217). A label only; no conversion.
    pub currency_code: String,
    /// BT-22: Free-text notes.
    pub notes: Vec<String>,
    /// BG-4: Seller.
    pub seller: Party,
    /// BG-7: Buyer.
    pub buyer: Party,
    pub buyer_type: BuyerType,
    /// BG-25: Lines, each with its engine-resolved VAT treatment.
    pub lines: Vec<LineItem>,
    /// BG-16 / BT-20: Payment terms.
    pub payment_terms: Option<PaymentTerms>,
    /// BG-22: Totals (set by `calculate_totals()`).
    pub totals: Option<Totals>,
}

impl Invoice {
    pub fn is_cross_border(&self) -> bool {
        self.seller.country != self.buyer.country
    }

    pub fn has_reverse_charge_lines(&self) -> bool {
        self.lines
            .iter()
            .any(|l| l.vat_class == VatClass::ReverseCharge)
    }

    pub fn has_reverse_charge_note(&self) -> bool {
        self.notes
            .iter()
            .any(|n| n.to_lowercase().contains("reverse charge"))
    }
}

/// BG-4 / BG-7: Seller or buyer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    /// BT-27 / BT-44: Name.
    pub name: String,
    /// BT-40 / BT-55: Country.
    pub country: CountryCode,
    /// Free-form postal address.
    pub address: Option<String>,
    /// BT-31 / BT-48: VAT identifier.
    pub vat_id: Option<String>,
    /// BT-43 / BT-58: Email.
    pub email: Option<String>,
    /// BT-42 / BT-57: Telephone.
    pub phone: Option<String>,
    /// BT-12: Contract reference (public procurement).
    pub contract_reference: Option<String>,
}

/// BG-25: Invoice line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// BT-126: Line identifier.
    pub id: String,
    /// BT-153: Item name / description.
    pub description: String,
    pub category: VatCategory,
    /// BT-129: Quantity.
    pub quantity: Decimal,
    /// BT-146: Net price per unit.
    pub unit_price: Decimal,
    /// Confirmed public transport service (UK transport only).
    pub is_public_transport: bool,
    /// BT-152: Resolved VAT rate.
    pub tax_rate: Decimal,
    pub vat_class: VatClass,
    pub vat_type: VatType,
    /// BT-131: quantity × unit price. Set by `calculate_totals()`.
    pub line_amount: Option<Decimal>,
}

impl LineItem {
    /// Blank description and zero amount: an untouched form row.
    pub fn is_empty(&self) -> bool {
        self.description.trim().is_empty() && (self.quantity.is_zero() || self.unit_price.is_zero())
    }

    pub fn tax_category(&self) -> TaxCategoryCode {
        self.vat_class.into()
    }
}

/// UNTDID 5305 tax category codes used on the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaxCategoryCode {
    /// S: Standard or reduced rate (including OSS destination rates).
    StandardRate,
    /// Z: Zero rated.
    ZeroRated,
    /// E: Exempt from tax.
    Exempt,
    /// AE: Reverse charge.
    ReverseCharge,
}

impl TaxCategoryCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::StandardRate => "S",
            Self::ZeroRated => "Z",
            Self::Exempt => "E",
            Self::ReverseCharge => "AE",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(Self::StandardRate),
            "Z" => Some(Self::ZeroRated),
            "E" => Some(Self::Exempt),
            "AE" => Some(Self::ReverseCharge),
            _ => None,
        }
    }

    /// BT-120: Exemption reason text.
    pub fn exemption_reason(&self) -> Option<&'static str> {
        match self {
            Self::Exempt => Some("Exempt from VAT"),
            Self::ReverseCharge => Some("Reverse charge"),
            _ => None,
        }
    }

    /// BT-121: VATEX exemption reason code.
    pub fn exemption_reason_code(&self) -> Option<&'static str> {
        match self {
            Self::Exempt => Some("vatex-eu-e"),
            Self::ReverseCharge => Some("vatex-eu-ae"),
            _ => None,
        }
    }
}

impl From<VatClass> for TaxCategoryCode {
    fn from(class: VatClass) -> Self {
        match class {
            VatClass::Standard | VatClass::Reduced | VatClass::Oss => Self::StandardRate,
            VatClass::Zero => Self::ZeroRated,
            VatClass::Exempt => Self::Exempt,
            VatClass::ReverseCharge => Self::ReverseCharge,
        }
    }
}

/// BG-22: Document totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Totals {
    /// BT-106 / BT-109: Sum of line net amounts.
    pub net_total: Decimal,
    /// BT-110: Total VAT.
    pub vat_total: Decimal,
    /// BT-112 / BT-115: net_total + vat_total.
    pub gross_total: Decimal,
    /// BG-23: One bucket per (tax category, rate).
    pub tax_subtotals: Vec<TaxSubtotal>,
}

/// BG-23: VAT breakdown bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxSubtotal {
    /// BT-118
    pub category: TaxCategoryCode,
    /// BT-119
    pub rate: Decimal,
    /// BT-116
    pub taxable_amount: Decimal,
    /// BT-117
    pub tax_amount: Decimal,
    /// BT-120
    pub exemption_reason: Option<String>,
    /// BT-121
    pub exemption_reason_code: Option<String>,
}

/// Payment terms as printed on the invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTerms {
    /// BT-82: Payment means text (e.g. "Bank Transfer").
    pub means: String,
    /// BT-84: IBAN.
    pub iban: Option<String>,
    pub early_payment_discount: Option<String>,
    pub late_penalty_terms: Option<String>,
}

impl PaymentTerms {
    /// BT-20: Terms rendered as one note.
    pub fn summary(&self) -> String {
        let mut parts = vec![self.means.clone()];
        if let Some(d) = &self.early_payment_discount {
            parts.push(format!("Early payment: {d}"));
        }
        if let Some(p) = &self.late_penalty_terms {
            parts.push(format!("Late payment: {p}"));
        }
        parts.join("; ")
    }
}
