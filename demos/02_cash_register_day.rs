/// cash register day - open, collect, reconcile
use chrono::{Duration, TimeZone, Utc};
use microloan_ledger::{
    CashRegisterLedger, ClosureReport, LedgerConfig, Money, PaymentMethod, SafeTimeProvider,
    TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== cash register day ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 3, 3, 8, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let config = LedgerConfig::default();
    let mut ledger = CashRegisterLedger::new(config.clone());

    let session = ledger.open(Money::from_major(500), "op1", &time)?;
    println!("opened session {} at {}", session.id, session.opened_at);

    let payments = [
        ("123.47", PaymentMethod::Cash, "DNI 45678912"),
        ("80.00", PaymentMethod::Digital, "DNI 70001122"),
        ("57.32", PaymentMethod::Cash, "RUC 20123456789"),
    ];

    for (amount, method, client) in payments {
        controller.advance(Duration::minutes(45));
        let tx = ledger.record_payment(amount.parse()?, method, client, &time)?;
        println!(
            "  {:?} {:>8} adj {:>5} -> {:>8}  ({})",
            tx.method,
            tx.nominal_amount.to_string(),
            tx.rounding_adjustment.to_string(),
            tx.settled_amount.to_string(),
            client
        );
    }

    let summary = ledger.summary();
    println!("\nopening:     {}", summary.opening_balance);
    println!("cash in:     {}", summary.cash_entries);
    println!("digital in:  {}", summary.digital_entries);
    println!("rounding:    {}", summary.total_rounding_adjustment);
    println!("theoretical: {}", summary.theoretical_total);

    controller.advance(Duration::hours(8));
    let result = ledger.close("680.80".parse()?, &time)?;
    println!(
        "\ncounted {} difference {} balanced {}",
        result.counted_cash, result.difference, result.is_balanced
    );

    if let Some(session) = ledger.session() {
        let report = ClosureReport::from_session(session, &config);
        println!("\n{}", report.to_json_pretty()?);
    }

    Ok(())
}
