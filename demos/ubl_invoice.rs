use chrono::NaiveDate;
use eurovat::core::*;
use eurovat::invoice::*;
use eurovat::ubl;
use rust_decimal_macros::dec;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let invoice = InvoiceBuilder::new("INV-2024-042", NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .due_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
        .seller(
            PartyBuilder::new("ACME GmbH", CountryCode::DE)
                .address("Friedrichstraße 123, 10115 Berlin")
                .vat_id("DE123456789")
                .email("billing@acme.de")
                .build(),
        )
        .buyer(
            PartyBuilder::new("Atelier Dupont", CountryCode::FR)
                .vat_id("FR12345678901")
                .build(),
        )
        .buyer_type(BuyerType::B2b)
        .reverse_charge_note()
        .payment_terms(PaymentTerms {
            means: "Bank Transfer".into(),
            iban: Some("DE89370400440532013000".into()),
            early_payment_discount: Some("2% within 10 days".into()),
            late_penalty_terms: None,
        })
        .add_line(
            LineItemBuilder::new("1", "Software development", VatCategory::Others, dec!(120))
                .quantity(dec!(16))
                .build(),
        )
        .add_line(LineItemBuilder::new("2", "Technical handbook", VatCategory::Books, dec!(49.90)).build())
        .plan_limits(PlanTier::Starter.limits(), 12)
        .build();

    let invoice = match invoice {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("Invoice rejected: {e}");
            std::process::exit(1);
        }
    };

    if let Some(totals) = &invoice.totals {
        println!("Net:   {} {}", totals.net_total, invoice.currency_code);
        println!("VAT:   {} {}", totals.vat_total, invoice.currency_code);
        println!("Gross: {} {}\n", totals.gross_total, invoice.currency_code);
    }

    match ubl::to_ubl_xml(&invoice) {
        Ok(xml) => println!("{xml}"),
        Err(e) => eprintln!("UBL export failed: {e}"),
    }
}
