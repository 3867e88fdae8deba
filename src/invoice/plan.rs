//! Subscription plan limits.
//!
//! Limits are always passed in explicitly by the caller; nothing in this crate
//! reads session or subscription state.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::types::Invoice;
use crate::core::VatError;

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Free,
    Starter,
    Pro,
    Business,
}

impl PlanTier {
    pub fn limits(&self) -> PlanLimits {
        match self {
            Self::Free => PlanLimits {
                invoices_per_month: Some(5),
                line_items_per_invoice: Some(3),
                max_invoice_value: Some(dec!(1000)),
            },
            Self::Starter => PlanLimits {
                invoices_per_month: Some(30),
                line_items_per_invoice: Some(10),
                max_invoice_value: None,
            },
            Self::Pro | Self::Business => PlanLimits::unlimited(),
        }
    }
}

/// Quotas gating invoice creation. `None` means unlimited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    pub invoices_per_month: Option<u32>,
    pub line_items_per_invoice: Option<usize>,
    /// Compared against the invoice's gross total.
    pub max_invoice_value: Option<Decimal>,
}

impl PlanLimits {
    pub fn unlimited() -> Self {
        Self {
            invoices_per_month: None,
            line_items_per_invoice: None,
            max_invoice_value: None,
        }
    }

    /// Check whether `invoice` may be issued given how many invoices were
    /// already issued this month.
    pub fn check(&self, invoice: &Invoice, invoices_this_month: u32) -> Result<(), VatError> {
        if let Some(max) = self.invoices_per_month {
            if invoices_this_month >= max {
                return Err(VatError::PlanLimit(format!(
                    "monthly quota of {max} invoices reached"
                )));
            }
        }

        if let Some(max) = self.line_items_per_invoice {
            if invoice.lines.len() > max {
                return Err(VatError::PlanLimit(format!(
                    "{} line items exceed the plan maximum of {max}",
                    invoice.lines.len()
                )));
            }
        }

        if let (Some(max), Some(totals)) = (self.max_invoice_value, &invoice.totals) {
            if totals.gross_total > max {
                return Err(VatError::PlanLimit(format!(
                    "invoice value {} exceeds the plan maximum of {max}",
                    totals.gross_total
                )));
            }
        }

        Ok(())
    }
}
