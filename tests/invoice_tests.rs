#![cfg(feature = "invoice")]

use chrono::NaiveDate;
use eurovat::core::*;
use eurovat::invoice::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seller(country: CountryCode) -> Party {
    PartyBuilder::new("ACME GmbH", country)
        .address("Friedrichstraße 123, 10115 Berlin")
        .vat_id("DE123456789")
        .email("billing@acme.de")
        .build()
}

fn buyer(country: CountryCode) -> Party {
    PartyBuilder::new("Client SAS", country)
        .vat_id("FR12345678901")
        .build()
}

fn line(id: &str, category: VatCategory, price: Decimal) -> LineItem {
    LineItemBuilder::new(id, format!("Item {id}"), category, price).build()
}

// --- Assembly ---

#[test]
fn domestic_mixed_rates() {
    let inv = InvoiceBuilder::new("INV-2024-001", date(2024, 6, 15))
        .due_date(date(2024, 7, 15))
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::DE))
        .buyer_type(BuyerType::B2b)
        .add_line(
            LineItemBuilder::new("1", "Consulting", VatCategory::Others, dec!(120))
                .quantity(dec!(8))
                .build(),
        )
        .add_line(line("2", VatCategory::Books, dec!(29.90)))
        .add_line(line("3", VatCategory::FinancialServices, dec!(50)))
        .build()
        .unwrap();

    assert_eq!(inv.lines[0].tax_rate, dec!(19));
    assert_eq!(inv.lines[0].vat_type, VatType::Standard);
    assert_eq!(inv.lines[1].tax_rate, dec!(7));
    assert_eq!(inv.lines[1].vat_class, VatClass::Reduced);
    assert_eq!(inv.lines[2].vat_class, VatClass::Exempt);
    assert_eq!(inv.lines[0].line_amount, Some(dec!(960)));

    let totals = inv.totals.unwrap();
    assert_eq!(totals.net_total, dec!(1039.90));
    // 960 × 19% = 182.40, 29.90 × 7% = 2.093 → 2.09
    assert_eq!(totals.vat_total, dec!(184.49));
    assert_eq!(totals.gross_total, dec!(1224.39));

    let codes: Vec<(&str, Decimal)> = totals
        .tax_subtotals
        .iter()
        .map(|s| (s.category.code(), s.rate))
        .collect();
    assert_eq!(
        codes,
        vec![("S", dec!(7)), ("S", dec!(19)), ("E", Decimal::ZERO)]
    );
    let exempt = &totals.tax_subtotals[2];
    assert_eq!(exempt.exemption_reason_code.as_deref(), Some("vatex-eu-e"));
}

#[test]
fn same_rate_lines_share_a_bucket() {
    let inv = InvoiceBuilder::new("INV-2", date(2024, 1, 10))
        .seller(seller(CountryCode::FR))
        .buyer(buyer(CountryCode::FR))
        .buyer_type(BuyerType::B2c)
        .add_line(line("1", VatCategory::Others, dec!(0.025)))
        .add_line(line("2", VatCategory::Others, dec!(0.025)))
        .add_line(line("3", VatCategory::Others, dec!(0.025)))
        .build()
        .unwrap();
    let totals = inv.totals.unwrap();
    assert_eq!(totals.tax_subtotals.len(), 1);
    // 0.075 × 20% = 0.015 rounds once to 0.02; per line it would be 3 × 0.01
    assert_eq!(totals.vat_total, dec!(0.02));
}

#[test]
fn cross_border_business_invoice_is_reverse_charge() {
    let inv = InvoiceBuilder::new("INV-3", date(2024, 2, 1))
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::FR))
        .buyer_type(BuyerType::B2b)
        .reverse_charge_note()
        .add_line(line("1", VatCategory::Others, dec!(1000)))
        .build()
        .unwrap();
    assert!(inv.has_reverse_charge_lines());
    let totals = inv.totals.as_ref().unwrap();
    assert_eq!(totals.vat_total, Decimal::ZERO);
    assert_eq!(totals.tax_subtotals[0].category, TaxCategoryCode::ReverseCharge);
    assert_eq!(
        totals.tax_subtotals[0].exemption_reason_code.as_deref(),
        Some("vatex-eu-ae")
    );
}

#[test]
fn cross_border_consumer_invoice_uses_destination_rate() {
    let inv = InvoiceBuilder::new("INV-4", date(2024, 2, 1))
        .seller(seller(CountryCode::DE))
        .buyer(PartyBuilder::new("Jan Kowalski", CountryCode::PL).build())
        .buyer_type(BuyerType::B2c)
        .add_line(line("1", VatCategory::Others, dec!(100)))
        .build()
        .unwrap();
    assert_eq!(inv.lines[0].vat_class, VatClass::Oss);
    assert_eq!(inv.lines[0].tax_category(), TaxCategoryCode::StandardRate);
    assert_eq!(inv.totals.unwrap().gross_total, dec!(123.00));
}

#[test]
fn uk_public_transport_line() {
    let inv = InvoiceBuilder::new("INV-5", date(2024, 5, 5))
        .currency("GBP")
        .seller(PartyBuilder::new("Rail Ltd", CountryCode::GB).vat_id("GB123456789").build())
        .buyer(PartyBuilder::new("Jane Doe", CountryCode::GB).build())
        .buyer_type(BuyerType::B2c)
        .add_line(
            LineItemBuilder::new("1", "Season ticket", VatCategory::Transport, dec!(50))
                .public_transport(true)
                .build(),
        )
        .add_line(line("2", VatCategory::Transport, dec!(50)))
        .build()
        .unwrap();
    assert_eq!(inv.lines[0].vat_class, VatClass::Zero);
    assert_eq!(inv.lines[1].tax_rate, dec!(20));
    assert_eq!(inv.totals.unwrap().gross_total, dec!(110.00));
}

#[test]
fn custom_rule_table() {
    let mut table = RuleTable::new();
    table
        .insert(CountryCode::DE, RuleConfig::new("Germany", dec!(16), dec!(5)))
        .insert(CountryCode::AT, RuleConfig::new("Austria", dec!(20), dec!(10)));
    let inv = InvoiceBuilder::new("INV-6", date(2020, 8, 1))
        .rules(&table)
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::DE))
        .add_line(line("1", VatCategory::Others, dec!(100)))
        .build()
        .unwrap();
    assert_eq!(inv.lines[0].tax_rate, dec!(16));
}

#[test]
fn empty_lines_are_skipped() {
    let inv = InvoiceBuilder::new("INV-7", date(2024, 1, 1))
        .seller(seller(CountryCode::NL))
        .buyer(buyer(CountryCode::NL))
        .add_line(LineItemBuilder::new("1", "  ", VatCategory::Others, Decimal::ZERO).build())
        .add_line(line("2", VatCategory::Others, dec!(10)))
        .build()
        .unwrap();
    assert_eq!(inv.lines.len(), 1);
    assert_eq!(inv.lines[0].id, "2");
}

// --- Failures ---

#[test]
fn no_lines_is_an_error() {
    let err = InvoiceBuilder::new("INV-8", date(2024, 1, 1))
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::DE))
        .add_line(LineItemBuilder::new("1", "", VatCategory::Others, Decimal::ZERO).build())
        .build()
        .unwrap_err();
    assert!(matches!(err, VatError::Builder(_)));
}

#[test]
fn missing_seller_is_an_error() {
    let err = InvoiceBuilder::new("INV-9", date(2024, 1, 1))
        .buyer(buyer(CountryCode::DE))
        .add_line(line("1", VatCategory::Others, dec!(10)))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("seller is required"));
}

#[test]
fn unresolvable_line_fails_build() {
    let mut table = RuleTable::new();
    table.insert(CountryCode::DE, RuleConfig::new("Germany", dec!(19), dec!(7)));
    let err = InvoiceBuilder::new("INV-10", date(2024, 1, 1))
        .rules(&table)
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::ES))
        .buyer_type(BuyerType::B2c)
        .add_line(line("1", VatCategory::Others, dec!(10)))
        .build()
        .unwrap_err();
    assert!(matches!(err, VatError::UnsupportedCountry(_)));
}

#[test]
fn reverse_charge_without_note_or_buyer_vat_id() {
    let err = InvoiceBuilder::new("INV-11", date(2024, 1, 1))
        .seller(seller(CountryCode::DE))
        .buyer(PartyBuilder::new("Client SAS", CountryCode::FR).build())
        .buyer_type(BuyerType::B2b)
        .add_line(line("1", VatCategory::Others, dec!(10)))
        .build()
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("BR-AE-02"));
    assert!(msg.contains("reverse charge note"));
}

#[test]
fn validation_collects_all_errors() {
    let inv = InvoiceBuilder::new(" ", date(2024, 3, 1))
        .due_date(date(2024, 2, 1))
        .currency("euro")
        .seller(PartyBuilder::new("", CountryCode::DE).build())
        .buyer(PartyBuilder::new("", CountryCode::DE).build())
        .add_line(line("1", VatCategory::Others, dec!(10)))
        .build_unchecked()
        .unwrap();
    let errors = validate_invoice(&inv);
    let rules: Vec<&str> = errors.iter().filter_map(|e| e.rule.as_deref()).collect();
    assert!(rules.contains(&"BR-02"));
    assert!(rules.contains(&"BR-05"));
    assert!(rules.contains(&"BR-06"));
    assert!(rules.contains(&"BR-07"));
    assert!(rules.contains(&"BR-S-02"));
    assert!(errors.iter().any(|e| e.field == "due_date"));
}

#[test]
fn tampered_totals_are_detected() {
    let mut inv = InvoiceBuilder::new("INV-12", date(2024, 3, 1))
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::DE))
        .add_line(line("1", VatCategory::Others, dec!(100)))
        .build()
        .unwrap();
    if let Some(totals) = inv.totals.as_mut() {
        totals.gross_total = dec!(1);
    }
    let errors = validate_invoice(&inv);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].rule.as_deref(), Some("BR-CO-15"));
}

// --- Plan limits ---

#[test]
fn free_plan_monthly_quota() {
    let build = |issued: u32| {
        InvoiceBuilder::new("INV-13", date(2024, 3, 1))
            .seller(seller(CountryCode::DE))
            .buyer(buyer(CountryCode::DE))
            .add_line(line("1", VatCategory::Others, dec!(10)))
            .plan_limits(PlanTier::Free.limits(), issued)
            .build()
    };
    assert!(build(4).is_ok());
    assert!(matches!(build(5), Err(VatError::PlanLimit(_))));
}

#[test]
fn free_plan_line_and_value_limits() {
    let mut builder = InvoiceBuilder::new("INV-14", date(2024, 3, 1))
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::DE))
        .plan_limits(PlanTier::Free.limits(), 0);
    for i in 1..=4 {
        builder = builder.add_line(line(&i.to_string(), VatCategory::Others, dec!(1)));
    }
    let err = builder.build().unwrap_err();
    assert!(err.to_string().contains("line items"));

    // 900 + 19% = 1071 > 1000
    let err = InvoiceBuilder::new("INV-15", date(2024, 3, 1))
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::DE))
        .add_line(line("1", VatCategory::Others, dec!(900)))
        .plan_limits(PlanTier::Free.limits(), 0)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("invoice value"));
}

#[test]
fn business_plan_is_unlimited() {
    let inv = InvoiceBuilder::new("INV-16", date(2024, 3, 1))
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::DE))
        .add_line(line("1", VatCategory::Others, dec!(1_000_000)))
        .plan_limits(PlanTier::Business.limits(), 10_000)
        .build();
    assert!(inv.is_ok());
}

#[test]
fn payment_terms_summary() {
    let terms = PaymentTerms {
        means: "Bank Transfer".into(),
        iban: Some("DE89370400440532013000".into()),
        early_payment_discount: Some("2% within 10 days".into()),
        late_penalty_terms: None,
    };
    assert_eq!(
        terms.summary(),
        "Bank Transfer; Early payment: 2% within 10 days"
    );
}

#[cfg(feature = "compliance")]
#[test]
fn invoice_compliance_input() {
    let inv = InvoiceBuilder::new("INV-17", date(2024, 3, 1))
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::FR))
        .buyer_type(BuyerType::B2b)
        .reverse_charge_note()
        .add_line(line("1", VatCategory::Others, dec!(10)))
        .build()
        .unwrap();
    let result = eurovat::compliance::score_compliance(&inv.compliance_input());
    assert_eq!(result.score, 100);
}

#[cfg(feature = "compliance")]
#[test]
fn compliance_input_takes_first_line_category() {
    let inv = InvoiceBuilder::new("INV-18", date(2024, 3, 1))
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::DE))
        .add_line(line("1", VatCategory::Books, dec!(10)))
        .add_line(line("2", VatCategory::Others, dec!(20)))
        .build()
        .unwrap();
    let input = inv.compliance_input();
    assert_eq!(input.category, Some(VatCategory::Books));
    assert!(!input.cross_border);
}

// --- Out-of-range amounts ---

#[test]
fn line_amount_out_of_range_is_rejected() {
    let err = InvoiceBuilder::new("INV-19", date(2024, 3, 1))
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::DE))
        .add_line(
            LineItemBuilder::new("1", "Bulk", VatCategory::Others, Decimal::MAX)
                .quantity(dec!(2))
                .build(),
        )
        .build_unchecked()
        .unwrap_err();
    assert!(matches!(err, VatError::Builder(ref m) if m.contains("line 1")));
}

#[test]
fn gross_total_out_of_range_is_rejected() {
    let err = InvoiceBuilder::new("INV-20", date(2024, 3, 1))
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::DE))
        .add_line(line("1", VatCategory::Others, Decimal::MAX))
        .build_unchecked()
        .unwrap_err();
    assert!(matches!(err, VatError::Builder(ref m) if m.contains("gross total")));
}

#[test]
fn net_total_out_of_range_is_rejected() {
    let err = InvoiceBuilder::new("INV-21", date(2024, 3, 1))
        .seller(seller(CountryCode::DE))
        .buyer(buyer(CountryCode::DE))
        .add_line(line("1", VatCategory::FinancialServices, Decimal::MAX))
        .add_line(line("2", VatCategory::FinancialServices, Decimal::MAX))
        .build_unchecked()
        .unwrap_err();
    assert!(matches!(err, VatError::Builder(ref m) if m.contains("net total")));
}
