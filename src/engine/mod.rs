//! VAT decision engine.
//!
//! Maps a transaction (seller, buyer, buyer type, category, net amount) to a
//! VAT treatment. Evaluation is pure and total: a jurisdiction missing from
//! the rule table yields an `UNKNOWN` outcome at 0%, never a panic or error.
//!
//! # Decision order
//!
//! A seller missing from the rule table yields `UNKNOWN` before any rule is
//! tried. Otherwise the first matching rule wins:
//!
//! 1. **OSS**: cross-border B2C between two EU states → buyer's standard rate
//! 2. **Reverse charge**: cross-border B2B with an EU seller → 0%
//! 3. **Exempt**: Financial Services, Insurance, Education → 0%
//! 4. **National resolution**: the seller's category overrides (UK zero-rating,
//!    UK transport toggle, …) or else the generic reduced/standard switch
//!
//! # Example
//!
//! ```
//! use eurovat::core::*;
//! use eurovat::engine::evaluate;
//! use rust_decimal_macros::dec;
//!
//! let facts = TransactionFacts::new(
//!     CountryCode::DE,
//!     CountryCode::FR,
//!     BuyerType::B2c,
//!     VatCategory::Others,
//!     dec!(100),
//! );
//! let outcome = evaluate(&facts);
//! assert_eq!(outcome.vat_type, VatType::Oss);
//! assert_eq!(outcome.vat_rate, dec!(20));
//! assert_eq!(outcome.gross_total, dec!(120));
//! ```

mod oss;
mod resolver;

pub use oss::is_oss;
pub use resolver::{RateResolver, Resolution};

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::{
    BuyerType, CountryCode, RuleTable, TransactionFacts, VatCategory, VatClass, VatOutcome,
    VatType, default_rules,
};

/// Evaluates transactions against an injected rule table.
#[derive(Debug, Clone, Copy)]
pub struct VatEngine<'a> {
    rules: &'a RuleTable,
}

impl Default for VatEngine<'static> {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl<'a> VatEngine<'a> {
    pub fn new(rules: &'a RuleTable) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'a RuleTable {
        self.rules
    }

    /// Evaluate a transaction. Deterministic; no state is read or written.
    pub fn evaluate(&self, facts: &TransactionFacts) -> VatOutcome {
        let net = facts.net_amount;

        let Some(seller) = self.rules.get(facts.seller_country) else {
            warn!(seller = %facts.seller_country, "seller country missing from rule table");
            return VatOutcome::unknown(net);
        };

        if is_oss(facts.seller_country, facts.buyer_country, facts.buyer_type) {
            let Some(buyer) = self.rules.get(facts.buyer_country) else {
                warn!(buyer = %facts.buyer_country, "buyer country missing from rule table");
                return VatOutcome::unknown(net);
            };
            debug!(
                seller = %facts.seller_country,
                buyer = %facts.buyer_country,
                rate = %buyer.standard_rate,
                "OSS applies"
            );
            return VatOutcome::at_rate(net, buyer.standard_rate, VatType::Oss, VatClass::Oss);
        }

        if facts.buyer_type == BuyerType::B2b
            && facts.is_cross_border()
            && facts.seller_country.is_eu()
        {
            debug!(
                seller = %facts.seller_country,
                buyer = %facts.buyer_country,
                "reverse charge applies"
            );
            return VatOutcome::at_rate(
                net,
                Decimal::ZERO,
                VatType::ReverseCharge,
                VatClass::ReverseCharge,
            );
        }

        if facts.category.is_exempt() {
            debug!(category = %facts.category, "exempt category");
            let note = seller
                .category_override(facts.category)
                .and_then(|o| o.note.clone());
            return VatOutcome::at_rate(net, Decimal::ZERO, VatType::Exempt, VatClass::Exempt)
                .with_note(note);
        }

        let r = seller.resolve(facts.category, facts.is_public_transport);
        debug!(
            seller = %facts.seller_country,
            category = %facts.category,
            rate = %r.rate,
            class = r.vat_class.as_str(),
            "national rate resolved"
        );
        VatOutcome::at_rate(net, r.rate, r.vat_type, r.vat_class).with_note(r.note)
    }
}

/// Evaluate a transaction against the built-in rule table.
pub fn evaluate(facts: &TransactionFacts) -> VatOutcome {
    VatEngine::default().evaluate(facts)
}

/// Evaluate raw form input against the built-in rule table.
///
/// Country codes outside the supported set produce an `UNKNOWN` outcome. An
/// unrecognised category label is evaluated as "Others". `net_amount` must
/// already be validated as non-negative.
pub fn evaluate_vat(
    seller_country: &str,
    buyer_country: &str,
    category: &str,
    net_amount: Decimal,
    is_b2b: bool,
    is_public_transport: bool,
) -> VatOutcome {
    let (Some(seller), Some(buyer)) = (
        CountryCode::from_code(seller_country),
        CountryCode::from_code(buyer_country),
    ) else {
        warn!(seller_country, buyer_country, "unsupported country code");
        return VatOutcome::unknown(net_amount);
    };
    let category = VatCategory::from_label(category).unwrap_or(VatCategory::Others);

    let facts = TransactionFacts::new(
        seller,
        buyer,
        BuyerType::from_is_b2b(is_b2b),
        category,
        net_amount,
    )
    .public_transport(is_public_transport);
    evaluate(&facts)
}
