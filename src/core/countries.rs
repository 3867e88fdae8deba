//! Supported VAT jurisdictions.
//!
//! Ten EU member states plus the United Kingdom. The set is closed: any code
//! outside it is reported as unsupported, never silently mapped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::VatError;

/// ISO 3166-1 alpha-2 code of a supported jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CountryCode {
    DE,
    FR,
    NL,
    PL,
    SE,
    IT,
    BE,
    AT,
    HU,
    ES,
    GB,
}

impl CountryCode {
    /// All supported jurisdictions, in picker order.
    pub const ALL: [CountryCode; 11] = [
        Self::DE,
        Self::FR,
        Self::NL,
        Self::PL,
        Self::SE,
        Self::IT,
        Self::BE,
        Self::AT,
        Self::HU,
        Self::ES,
        Self::GB,
    ];

    /// The EU subset. The UK is not part of it and never takes part in OSS.
    pub const EU: [CountryCode; 10] = [
        Self::DE,
        Self::FR,
        Self::NL,
        Self::PL,
        Self::SE,
        Self::IT,
        Self::BE,
        Self::AT,
        Self::HU,
        Self::ES,
    ];

    /// Two-letter code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DE => "DE",
            Self::FR => "FR",
            Self::NL => "NL",
            Self::PL => "PL",
            Self::SE => "SE",
            Self::IT => "IT",
            Self::BE => "BE",
            Self::AT => "AT",
            Self::HU => "HU",
            Self::ES => "ES",
            Self::GB => "GB",
        }
    }

    /// English country name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DE => "Germany",
            Self::FR => "France",
            Self::NL => "Netherlands",
            Self::PL => "Poland",
            Self::SE => "Sweden",
            Self::IT => "Italy",
            Self::BE => "Belgium",
            Self::AT => "Austria",
            Self::HU => "Hungary",
            Self::ES => "Spain",
            Self::GB => "United Kingdom",
        }
    }

    /// Whether the jurisdiction is an EU member state.
    pub fn is_eu(&self) -> bool {
        !matches!(self, Self::GB)
    }

    /// Parse a two-letter code, case-insensitive, surrounding whitespace ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CountryCode {
    type Err = VatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| VatError::UnsupportedCountry(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_codes() {
        assert_eq!(CountryCode::from_code("DE"), Some(CountryCode::DE));
        assert_eq!(CountryCode::from_code("gb"), Some(CountryCode::GB));
        assert_eq!(CountryCode::from_code(" fr "), Some(CountryCode::FR));
    }

    #[test]
    fn rejects_unsupported_codes() {
        assert_eq!(CountryCode::from_code("US"), None);
        assert_eq!(CountryCode::from_code(""), None);
        assert_eq!(CountryCode::from_code("DEU"), None);
        assert!(matches!(
            "CH".parse::<CountryCode>(),
            Err(VatError::UnsupportedCountry(c)) if c == "CH"
        ));
    }

    #[test]
    fn uk_is_not_eu() {
        assert!(!CountryCode::GB.is_eu());
        assert!(!CountryCode::EU.contains(&CountryCode::GB));
        assert!(CountryCode::EU.iter().all(|c| c.is_eu()));
    }

    #[test]
    fn code_round_trips_through_display() {
        for c in CountryCode::ALL {
            assert_eq!(c.to_string().parse::<CountryCode>().unwrap(), c);
        }
    }
}
