//! Per-country rate resolution.
//!
//! Runs after the jurisdiction-independent rules (OSS, reverse charge,
//! exemption). A country either carries a statutory override for the category
//! or falls through to the generic reduced/standard switch.

use rust_decimal::Decimal;

use crate::core::{CategoryOverride, RuleConfig, VatCategory, VatClass, VatType};

/// Rate, label and class picked for a category in one jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub rate: Decimal,
    pub vat_type: VatType,
    pub vat_class: VatClass,
    pub note: Option<String>,
}

/// Resolves the national treatment of a category.
pub trait RateResolver {
    fn resolve(&self, category: VatCategory, is_public_transport: bool) -> Resolution;
}

impl RateResolver for RuleConfig {
    fn resolve(&self, category: VatCategory, is_public_transport: bool) -> Resolution {
        if let Some(rule) = self.category_override(category) {
            return from_override(rule, is_public_transport);
        }

        if category.is_reduced_eligible() {
            Resolution {
                rate: self.effective_reduced_rate(),
                vat_type: VatType::Reduced,
                vat_class: VatClass::Reduced,
                note: None,
            }
        } else {
            Resolution {
                rate: self.standard_rate,
                vat_type: VatType::Standard,
                vat_class: VatClass::Standard,
                note: None,
            }
        }
    }
}

fn from_override(rule: &CategoryOverride, is_public_transport: bool) -> Resolution {
    if rule.zero_if_public_transport && is_public_transport {
        return Resolution {
            rate: Decimal::ZERO,
            vat_type: VatType::ZeroRated,
            vat_class: VatClass::Zero,
            note: rule.note.clone(),
        };
    }
    Resolution {
        rate: rule.rate,
        vat_type: rule.vat_type,
        vat_class: rule.vat_class,
        note: rule.note.clone(),
    }
}
