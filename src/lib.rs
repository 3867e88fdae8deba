//! # eurovat
//!
//! Cross-border VAT decision engine for the EU and the UK.
//!
//! Given a seller country, a buyer country, the buyer type (B2B/B2C), a
//! product category and a net amount, the engine determines the applicable
//! VAT treatment: OSS, reverse charge, exempt, zero-rated, reduced or
//! standard. Around it sit a compliance scorer, a risk detector and a
//! plain-text decision explainer, plus an optional invoice assembler with
//! EN 16931 VAT breakdown and UBL 2.1 export.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use eurovat::{detect_risks, evaluate_vat, explain_decision, score_compliance};
//! use eurovat::compliance::{ComplianceInput, ExplanationInput, RiskInput};
//! use eurovat::core::*;
//! use rust_decimal_macros::dec;
//!
//! let outcome = evaluate_vat("DE", "FR", "Others", dec!(100), false, false);
//! assert_eq!(outcome.vat_type, VatType::Oss);
//! assert_eq!(outcome.vat_amount, dec!(20));
//!
//! let facts = TransactionFacts::new(
//!     CountryCode::DE,
//!     CountryCode::FR,
//!     BuyerType::B2c,
//!     VatCategory::Others,
//!     dec!(100),
//! );
//! let compliance = score_compliance(&ComplianceInput::for_transaction(&facts, "", "INV-1", false));
//! let risks = detect_risks(&RiskInput::from_outcome(&facts, &outcome));
//! assert!(risks.iter().any(|r| r.contains("OSS")));
//!
//! let text = explain_decision(&ExplanationInput::new(&facts, &outcome, &compliance, &risks));
//! assert!(text.contains("OSS REGISTRATION"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Countries, categories, rule table, VAT engine |
//! | `compliance` (default) | Compliance score, risk flags, decision explanation |
//! | `invoice` | Invoice assembler, VAT breakdown, plan limits |
//! | `ubl` | UBL 2.1 XML export |
//! | `config` | Load rule tables from JSON |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "core")]
pub mod engine;

#[cfg(feature = "compliance")]
pub mod compliance;

#[cfg(feature = "invoice")]
pub mod invoice;

#[cfg(feature = "ubl")]
pub mod ubl;

#[cfg(feature = "core")]
pub use crate::core::*;

#[cfg(feature = "core")]
pub use crate::engine::{VatEngine, evaluate_vat};

#[cfg(feature = "compliance")]
pub use crate::compliance::{detect_risks, explain_decision, score_compliance};
