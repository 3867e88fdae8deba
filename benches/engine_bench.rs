use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use eurovat::core::*;
use eurovat::engine::{VatEngine, evaluate_vat};
use eurovat::invoice::*;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn build_invoice(lines: usize) -> Invoice {
    let mut builder = InvoiceBuilder::new("BENCH-001", test_date())
        .seller(
            PartyBuilder::new("Benchmark GmbH", CountryCode::DE)
                .vat_id("DE123456789")
                .build(),
        )
        .buyer(PartyBuilder::new("Client SAS", CountryCode::FR).build())
        .buyer_type(BuyerType::B2c);

    for i in 0..lines {
        let category = VatCategory::ALL[i % VatCategory::ALL.len()];
        builder = builder.add_line(
            LineItemBuilder::new(i.to_string(), format!("Item {i}"), category, dec!(19.99))
                .quantity(dec!(3))
                .build(),
        );
    }

    builder.build().unwrap()
}

fn bench_evaluate(c: &mut Criterion) {
    let engine = VatEngine::default();
    let facts = TransactionFacts::new(
        CountryCode::GB,
        CountryCode::GB,
        BuyerType::B2c,
        VatCategory::Transport,
        dec!(50),
    )
    .public_transport(true);
    c.bench_function("evaluate_uk_transport", |b| {
        b.iter(|| engine.evaluate(black_box(&facts)))
    });
}

fn bench_evaluate_all_pairs(c: &mut Criterion) {
    c.bench_function("evaluate_all_country_pairs", |b| {
        b.iter(|| {
            for seller in CountryCode::ALL {
                for buyer in CountryCode::ALL {
                    black_box(evaluate_vat(
                        seller.code(),
                        buyer.code(),
                        "Books",
                        dec!(100),
                        false,
                        false,
                    ));
                }
            }
        })
    });
}

fn bench_build_invoice(c: &mut Criterion) {
    c.bench_function("build_invoice_10_lines", |b| {
        b.iter(|| build_invoice(black_box(10)))
    });
}

fn bench_build_invoice_1000_lines(c: &mut Criterion) {
    c.bench_function("build_invoice_1000_lines", |b| {
        b.iter(|| build_invoice(black_box(1000)))
    });
}

fn bench_calculate_totals(c: &mut Criterion) {
    let invoice = build_invoice(1000);
    c.bench_function("calculate_totals_1000_lines", |b| {
        b.iter(|| {
            let mut inv = invoice.clone();
            let _ = calculate_totals(black_box(&mut inv));
            inv
        })
    });
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_evaluate_all_pairs,
    bench_build_invoice,
    bench_build_invoice_1000_lines,
    bench_calculate_totals,
);
criterion_main!(benches);
