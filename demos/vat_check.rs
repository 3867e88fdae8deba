use eurovat::compliance::*;
use eurovat::core::*;
use eurovat::engine::evaluate;
use rust_decimal_macros::dec;

fn main() {
    // RUST_LOG=eurovat=debug shows which rule matched
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    println!("=== VAT Decisions ===\n");

    let scenarios = [
        ("DE → FR consumer", CountryCode::DE, CountryCode::FR, BuyerType::B2c, VatCategory::Others, dec!(100)),
        ("GB → DE financial services", CountryCode::GB, CountryCode::DE, BuyerType::B2b, VatCategory::FinancialServices, dec!(5000)),
        ("DE domestic food", CountryCode::DE, CountryCode::DE, BuyerType::B2b, VatCategory::BasicFood, dec!(200)),
        ("FR → IT business", CountryCode::FR, CountryCode::IT, BuyerType::B2b, VatCategory::Others, dec!(1200)),
        ("GB taxi ride", CountryCode::GB, CountryCode::GB, BuyerType::B2c, VatCategory::Transport, dec!(50)),
    ];

    for (label, seller, buyer, buyer_type, category, net) in scenarios {
        let outcome = evaluate(&TransactionFacts::new(seller, buyer, buyer_type, category, net));
        println!("  {label}:");
        println!(
            "    {} at {}% → VAT {}, gross {}",
            outcome.vat_type,
            outcome.vat_rate,
            outcome.vat_amount.round_dp(2),
            outcome.gross_total.round_dp(2)
        );
    }

    println!("\n=== UK Public Transport Toggle ===\n");

    for confirmed in [false, true] {
        let outcome = eurovat::evaluate_vat("GB", "GB", "Transport", dec!(50), false, confirmed);
        println!(
            "  public transport confirmed={confirmed}: {} at {}%",
            outcome.vat_type, outcome.vat_rate
        );
    }

    println!("\n=== Full Report ===\n");

    let facts = TransactionFacts::new(
        CountryCode::DE,
        CountryCode::FR,
        BuyerType::B2b,
        VatCategory::Others,
        dec!(1000),
    );
    let outcome = evaluate(&facts);
    let compliance = score_compliance(&ComplianceInput::for_transaction(&facts, "", "INV-1", false));
    let risks = detect_risks(&RiskInput::from_outcome(&facts, &outcome));

    println!("  Score: {}/100 ({})", compliance.score, compliance.band().label());
    for d in &compliance.deductions {
        println!("    -{} {}", d.points, d.reason);
    }
    println!();
    println!("{}", explain(&outcome, &compliance, &risks, &facts));
}
