//! Per-country VAT rate configuration.
//!
//! The built-in table carries the current flat rates only; there is no
//! effective-dating. It is loaded once and never mutated. Custom tables can be
//! built in code or, with the `config` feature, loaded from JSON and injected
//! into a [`VatEngine`](crate::engine::VatEngine).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::countries::CountryCode;
use super::error::VatError;
use super::types::{VatCategory, VatClass, VatType};

/// Statutory treatment of one category in one jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOverride {
    pub rate: Decimal,
    pub vat_type: VatType,
    pub vat_class: VatClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Switch to 0% zero-rated when the caller confirms a public transport service.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub zero_if_public_transport: bool,
}

impl CategoryOverride {
    pub fn new(rate: Decimal, vat_type: VatType, vat_class: VatClass, note: &str) -> Self {
        Self {
            rate,
            vat_type,
            vat_class,
            note: Some(note.to_string()),
            zero_if_public_transport: false,
        }
    }

    fn zero_rated(note: &str) -> Self {
        Self::new(Decimal::ZERO, VatType::ZeroRated, VatClass::Zero, note)
    }

    fn exempt(note: &str) -> Self {
        Self::new(Decimal::ZERO, VatType::Exempt, VatClass::Exempt, note)
    }
}

/// VAT configuration of a single jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    pub standard_rate: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduced_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_reduced_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub category_overrides: BTreeMap<VatCategory, CategoryOverride>,
}

impl RuleConfig {
    pub fn new(name: impl Into<String>, standard_rate: Decimal, reduced_rate: Decimal) -> Self {
        Self {
            name: name.into(),
            standard_rate,
            reduced_rate: Some(reduced_rate),
            super_reduced_rate: None,
            category_overrides: BTreeMap::new(),
        }
    }

    pub fn super_reduced(mut self, rate: Decimal) -> Self {
        self.super_reduced_rate = Some(rate);
        self
    }

    pub fn with_override(mut self, category: VatCategory, rule: CategoryOverride) -> Self {
        self.category_overrides.insert(category, rule);
        self
    }

    /// Reduced rate, falling back to the standard rate when none is configured.
    pub fn effective_reduced_rate(&self) -> Decimal {
        self.reduced_rate.unwrap_or(self.standard_rate)
    }

    pub fn category_override(&self, category: VatCategory) -> Option<&CategoryOverride> {
        self.category_overrides.get(&category)
    }

    fn validate(&self, country: CountryCode) -> Result<(), VatError> {
        check_rate(country, "standard_rate", self.standard_rate)?;
        if let Some(r) = self.reduced_rate {
            check_rate(country, "reduced_rate", r)?;
        }
        if let Some(r) = self.super_reduced_rate {
            check_rate(country, "super_reduced_rate", r)?;
        }
        for (category, rule) in &self.category_overrides {
            check_rate(country, category.label(), rule.rate)?;
            let must_be_zero = matches!(
                rule.vat_class,
                VatClass::Zero | VatClass::Exempt | VatClass::ReverseCharge
            );
            if must_be_zero && !rule.rate.is_zero() {
                return Err(VatError::InvalidRate(format!(
                    "{country} {category}: {} override must have rate 0, got {}",
                    rule.vat_class.as_str(),
                    rule.rate
                )));
            }
            if rule.vat_class == VatClass::Oss {
                return Err(VatError::InvalidRate(format!(
                    "{country} {category}: OSS cannot be configured as a category override"
                )));
            }
        }
        Ok(())
    }
}

fn check_rate(country: CountryCode, field: &str, rate: Decimal) -> Result<(), VatError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
        return Err(VatError::InvalidRate(format!(
            "{country} {field}: {rate} is outside [0, 100]"
        )));
    }
    Ok(())
}

/// Rule table keyed by jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    countries: BTreeMap<CountryCode, RuleConfig>,
}

static BUILTIN: LazyLock<RuleTable> = LazyLock::new(RuleTable::builtin);

/// The process-wide built-in rule table.
pub fn default_rules() -> &'static RuleTable {
    &BUILTIN
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, country: CountryCode, config: RuleConfig) -> &mut Self {
        self.countries.insert(country, config);
        self
    }

    pub fn get(&self, country: CountryCode) -> Option<&RuleConfig> {
        self.countries.get(&country)
    }

    pub fn contains(&self, country: CountryCode) -> bool {
        self.countries.contains_key(&country)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CountryCode, &RuleConfig)> {
        self.countries.iter().map(|(c, r)| (*c, r))
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Display name of `country`, falling back to its code.
    pub fn country_name(&self, country: CountryCode) -> &str {
        self.get(country)
            .map(|r| r.name.as_str())
            .unwrap_or(country.code())
    }

    /// Check every rate and override for consistency.
    pub fn validate(&self) -> Result<(), VatError> {
        for (country, config) in &self.countries {
            config.validate(*country)?;
        }
        Ok(())
    }

    /// Load and validate a table from JSON.
    ///
    /// ```
    /// # #[cfg(feature = "config")] {
    /// use eurovat::core::{CountryCode, RuleTable};
    ///
    /// let table = RuleTable::from_json(r#"{"DE": {"name": "Germany", "standard_rate": "19", "reduced_rate": "7"}}"#).unwrap();
    /// assert!(table.contains(CountryCode::DE));
    /// # }
    /// ```
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> Result<Self, VatError> {
        let table: RuleTable =
            serde_json::from_str(json).map_err(|e| VatError::Config(e.to_string()))?;
        table.validate()?;
        tracing::debug!(countries = table.len(), "loaded VAT rule table");
        Ok(table)
    }

    /// Serialize the table as pretty-printed JSON.
    #[cfg(feature = "config")]
    pub fn to_json(&self) -> Result<String, VatError> {
        serde_json::to_string_pretty(self).map_err(|e| VatError::Config(e.to_string()))
    }

    /// The built-in table of current flat rates.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table
            .insert(CountryCode::DE, RuleConfig::new("Germany", dec!(19), dec!(7)))
            .insert(
                CountryCode::FR,
                RuleConfig::new("France", dec!(20), dec!(10)).super_reduced(dec!(5.5)),
            )
            .insert(CountryCode::NL, RuleConfig::new("Netherlands", dec!(21), dec!(9)))
            .insert(
                CountryCode::PL,
                RuleConfig::new("Poland", dec!(23), dec!(8)).super_reduced(dec!(5)),
            )
            .insert(
                CountryCode::SE,
                RuleConfig::new("Sweden", dec!(25), dec!(12)).super_reduced(dec!(6)),
            )
            .insert(
                CountryCode::IT,
                RuleConfig::new("Italy", dec!(22), dec!(10)).super_reduced(dec!(4)),
            )
            .insert(
                CountryCode::BE,
                RuleConfig::new("Belgium", dec!(21), dec!(12)).super_reduced(dec!(6)),
            )
            .insert(
                CountryCode::AT,
                RuleConfig::new("Austria", dec!(20), dec!(10)).super_reduced(dec!(5)),
            )
            .insert(
                CountryCode::HU,
                RuleConfig::new("Hungary", dec!(27), dec!(18)).super_reduced(dec!(5)),
            )
            .insert(
                CountryCode::ES,
                RuleConfig::new("Spain", dec!(21), dec!(10)).super_reduced(dec!(4)),
            )
            .insert(CountryCode::GB, united_kingdom());
        table
    }
}

fn united_kingdom() -> RuleConfig {
    RuleConfig::new("United Kingdom", dec!(20), dec!(5))
        .with_override(
            VatCategory::BasicFood,
            CategoryOverride::zero_rated("Basic food items are zero-rated for VAT in the UK."),
        )
        .with_override(
            VatCategory::Books,
            CategoryOverride::zero_rated(
                "Books and printed publications are zero-rated for VAT in the UK.",
            ),
        )
        .with_override(
            VatCategory::Medical,
            CategoryOverride::zero_rated(
                "Medical goods and services are zero-rated for VAT in the UK.",
            ),
        )
        .with_override(
            VatCategory::Transport,
            CategoryOverride {
                zero_if_public_transport: true,
                ..CategoryOverride::new(
                    dec!(20),
                    VatType::Standard,
                    VatClass::Standard,
                    "Public transport (bus/train) = 0%. Taxis and car hire = 20%. Default is 20% unless confirmed as public transport.",
                )
            },
        )
        .with_override(
            VatCategory::Hotel,
            CategoryOverride::new(
                dec!(20),
                VatType::Standard,
                VatClass::Standard,
                "Hotel accommodation is subject to the standard 20% VAT rate in the UK.",
            ),
        )
        .with_override(
            VatCategory::FinancialServices,
            CategoryOverride::exempt(
                "Financial services are VAT-exempt in the UK. No input VAT reclaim is available on related costs.",
            ),
        )
        .with_override(
            VatCategory::Insurance,
            CategoryOverride::exempt(
                "Insurance is VAT-exempt in the UK. Insurance Premium Tax (IPT) applies separately.",
            ),
        )
        .with_override(
            VatCategory::Education,
            CategoryOverride::exempt(
                "Education is VAT-exempt in the UK when provided by eligible bodies: schools, universities, and approved training providers.",
            ),
        )
        .with_override(
            VatCategory::Exports,
            CategoryOverride::zero_rated(
                "Exports outside the UK are zero-rated. Proof of export is required to apply the 0% rate.",
            ),
        )
        .with_override(
            VatCategory::IntraEuB2b,
            CategoryOverride::new(
                Decimal::ZERO,
                VatType::ReverseCharge,
                VatClass::ReverseCharge,
                "Intra-EU B2B supplies from the UK are subject to 0% VAT under the reverse charge mechanism. A valid EU VAT ID from the buyer is required.",
            ),
        )
}
