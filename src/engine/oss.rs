//! One-Stop-Shop detection.

use crate::core::{BuyerType, CountryCode};

/// Whether a sale falls under the EU One-Stop-Shop scheme.
///
/// True iff seller and buyer differ, the buyer is a consumer, and both are EU
/// member states. UK sellers and buyers never trigger OSS.
pub fn is_oss(seller: CountryCode, buyer: CountryCode, buyer_type: BuyerType) -> bool {
    seller != buyer && buyer_type == BuyerType::B2c && seller.is_eu() && buyer.is_eu()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eu_cross_border_b2c() {
        assert!(is_oss(CountryCode::DE, CountryCode::FR, BuyerType::B2c));
        assert!(is_oss(CountryCode::ES, CountryCode::SE, BuyerType::B2c));
    }

    #[test]
    fn domestic_is_never_oss() {
        for c in CountryCode::ALL {
            assert!(!is_oss(c, c, BuyerType::B2c));
        }
    }

    #[test]
    fn b2b_is_never_oss() {
        assert!(!is_oss(CountryCode::DE, CountryCode::FR, BuyerType::B2b));
    }

    #[test]
    fn uk_is_never_oss() {
        assert!(!is_oss(CountryCode::GB, CountryCode::FR, BuyerType::B2c));
        assert!(!is_oss(CountryCode::IT, CountryCode::GB, BuyerType::B2c));
    }
}
