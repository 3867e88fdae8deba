//! Invoice compliance score.
//!
//! Starts at 100 and subtracts fixed points for each missing element. Every
//! deduction is evaluated independently; the final score is floored at 0.

use serde::{Deserialize, Serialize};

use crate::core::{BuyerType, TransactionFacts, VatCategory};

pub const MISSING_VAT_ID: &str = "VAT ID missing for B2B transaction";
pub const MISSING_INVOICE_NUMBER: &str = "Invoice number missing";
pub const MISSING_CATEGORY: &str = "VAT category not selected";
pub const MISSING_REVERSE_CHARGE_NOTE: &str =
    "Cross-border transaction missing reverse charge note";

const MAX_SCORE: u32 = 100;

/// Transaction metadata the score is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComplianceInput {
    pub vat_id: String,
    pub buyer_type: Option<BuyerType>,
    pub invoice_number: String,
    pub category: Option<VatCategory>,
    pub cross_border: bool,
    pub reverse_charge_note: bool,
}

impl ComplianceInput {
    /// Build the input for an evaluated transaction; `cross_border` is derived.
    pub fn for_transaction(
        facts: &TransactionFacts,
        vat_id: impl Into<String>,
        invoice_number: impl Into<String>,
        reverse_charge_note: bool,
    ) -> Self {
        Self {
            vat_id: vat_id.into(),
            buyer_type: Some(facts.buyer_type),
            invoice_number: invoice_number.into(),
            category: Some(facts.category),
            cross_border: facts.is_cross_border(),
            reverse_charge_note,
        }
    }
}

/// A single point deduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub reason: String,
    pub points: u32,
}

/// Score plus the deductions that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// 0..=100
    pub score: u32,
    pub deductions: Vec<Deduction>,
}

/// Qualitative band of a compliance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceBand {
    /// 90 and above.
    Excellent,
    /// 70 to 89.
    Good,
    AttentionRequired,
}

impl ComplianceBand {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Self::Excellent,
            70..=89 => Self::Good,
            _ => Self::AttentionRequired,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::AttentionRequired => "Attention required",
        }
    }
}

impl ComplianceResult {
    pub fn band(&self) -> ComplianceBand {
        ComplianceBand::from_score(self.score)
    }

    pub fn total_deducted(&self) -> u32 {
        self.deductions.iter().map(|d| d.points).sum()
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Score the compliance of a transaction's invoice metadata.
pub fn score_compliance(input: &ComplianceInput) -> ComplianceResult {
    let mut deductions = Vec::new();
    let mut deduct = |reason: &str, points: u32| {
        deductions.push(Deduction {
            reason: reason.to_string(),
            points,
        })
    };

    if is_blank(&input.vat_id) && input.buyer_type == Some(BuyerType::B2b) {
        deduct(MISSING_VAT_ID, 20);
    }
    if is_blank(&input.invoice_number) {
        deduct(MISSING_INVOICE_NUMBER, 10);
    }
    if input.category.is_none() {
        deduct(MISSING_CATEGORY, 10);
    }
    if input.cross_border && !input.reverse_charge_note {
        deduct(MISSING_REVERSE_CHARGE_NOTE, 20);
    }

    let deducted: u32 = deductions.iter().map(|d| d.points).sum();
    ComplianceResult {
        score: MAX_SCORE.saturating_sub(deducted),
        deductions,
    }
}
