//! Invoice assembly on top of the VAT engine.
//!
//! Each line carries a VAT category; the builder resolves it through the
//! engine using the invoice's seller, buyer and buyer type, then computes the
//! EN 16931 VAT breakdown and totals.

mod builder;
mod plan;
mod types;
mod validation;

pub use builder::{InvoiceBuilder, LineItemBuilder, PartyBuilder};
pub use plan::{PlanLimits, PlanTier};
pub use types::*;
pub use validation::{calculate_totals, validate_invoice};

#[cfg(feature = "compliance")]
impl Invoice {
    /// Scorer input for this invoice.
    ///
    /// Only the first line's category is scored. Every line carries a
    /// category, so the "category missing" deduction applies only to an
    /// invoice without lines.
    pub fn compliance_input(&self) -> crate::compliance::ComplianceInput {
        crate::compliance::ComplianceInput {
            vat_id: self.buyer.vat_id.clone().unwrap_or_default(),
            buyer_type: Some(self.buyer_type),
            invoice_number: self.number.clone(),
            category: self.lines.first().map(|l| l.category),
            cross_border: self.is_cross_border(),
            reverse_charge_note: self.has_reverse_charge_note(),
        }
    }
}
