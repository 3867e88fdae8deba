//! Compliance annotation: score, risk flags, and decision explanation.
//!
//! All three derive from the same transaction facts and the engine's
//! [`VatOutcome`](crate::core::VatOutcome). None of them can fail; empty input
//! yields a valid, penalized result.
//!
//! # Example
//!
//! ```
//! use eurovat::compliance::*;
//! use eurovat::core::*;
//! use eurovat::engine::evaluate;
//! use rust_decimal_macros::dec;
//!
//! let facts = TransactionFacts::new(
//!     CountryCode::DE,
//!     CountryCode::FR,
//!     BuyerType::B2b,
//!     VatCategory::Others,
//!     dec!(1000),
//! );
//! let outcome = evaluate(&facts);
//! let compliance = score_compliance(&ComplianceInput::for_transaction(&facts, "", "INV-1", false));
//! assert_eq!(compliance.score, 60);
//!
//! let risks = detect_risks(&RiskInput::from_outcome(&facts, &outcome));
//! let text = explain(&outcome, &compliance, &risks, &facts);
//! assert!(text.contains("Reverse Charge"));
//! ```

pub mod explain;
pub mod risk;
pub mod score;

pub use explain::{ExplanationInput, OSS_THRESHOLD_EUR, explain, explain_decision};
pub use risk::{RiskInput, detect_risks};
pub use score::{ComplianceBand, ComplianceInput, ComplianceResult, Deduction, score_compliance};
