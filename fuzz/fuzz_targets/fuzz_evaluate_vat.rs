#![no_main]

use libfuzzer_sys::fuzz_target;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // seller|buyer|category|cents|flags
    let mut parts = s.splitn(5, '|');
    let seller = parts.next().unwrap_or_default();
    let buyer = parts.next().unwrap_or_default();
    let category = parts.next().unwrap_or_default();
    let cents = parts
        .next()
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or_default();
    let flags = parts.next().map(str::as_bytes).unwrap_or_default();
    let is_b2b = flags.first().is_some_and(|b| b & 1 == 1);
    let is_public_transport = flags.first().is_some_and(|b| b & 2 == 2);

    let net = Decimal::new(i64::from(cents), 2);
    let o = eurovat::evaluate_vat(seller, buyer, category, net, is_b2b, is_public_transport);
    assert_eq!(o.gross_total, net + o.vat_amount);
    assert!(o.vat_rate >= Decimal::ZERO && o.vat_rate <= Decimal::ONE_HUNDRED);
});
