use thiserror::Error;

/// Errors raised at the crate's boundaries: parsing, rule-table loading,
/// invoice assembly, plan gating and XML export.
///
/// The VAT engine itself never returns an error; an unsupported jurisdiction
/// is reported as an `UNKNOWN` outcome instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VatError {
    /// Country code outside the supported set or missing from the rule table.
    #[error("unsupported country: {0}")]
    UnsupportedCountry(String),

    /// Category label outside the fixed category list.
    #[error("unknown VAT category: {0}")]
    UnknownCategory(String),

    /// A rate outside [0, 100] or an inconsistent override.
    #[error("invalid rate: {0}")]
    InvalidRate(String),

    /// Rule-table configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// Builder encountered invalid or missing input.
    #[error("builder error: {0}")]
    Builder(String),

    /// One or more invoice validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The injected plan limits forbid the operation.
    #[error("plan limit exceeded: {0}")]
    PlanLimit(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "buyer.vat_id").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// EN 16931 business rule ID if applicable (e.g. "BR-AE-02").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule ID.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error with an EN 16931 rule ID.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}
