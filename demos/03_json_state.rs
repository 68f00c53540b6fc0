/// json state - persist a session, restart, and finish the day
use chrono::{TimeZone, Utc};
use microloan_ledger::{
    CashRegisterLedger, CoreConfig, InMemorySessionRepository, Money, PaymentMethod,
    SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== json state ===\n");

    let config = CoreConfig::from_json(
        r#"{
            "ledger": { "currency_code": "PEN", "balance_tolerance": "0.01", "max_cash_payment": "5000" },
            "lending": { "uit_value": "5150", "max_installment_count": 36, "max_annual_rate_percent": "80" }
        }"#,
    )?;
    println!("config:\n{}\n", config.to_json_pretty()?);

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 6, 2, 8, 30, 0).unwrap(),
    ));
    let mut repository = InMemorySessionRepository::new();

    // morning terminal
    let mut ledger = CashRegisterLedger::new(config.ledger.clone());
    ledger.open(Money::from_major(300), "op2", &time)?;
    ledger.record_payment("45.18".parse()?, PaymentMethod::Cash, "DNI 40123456", &time)?;
    ledger.save_to(&mut repository)?;
    for event in ledger.events.take_events() {
        println!("event: {}", serde_json::to_string(&event)?);
    }

    // terminal restarted; resume the open session from storage
    let mut ledger = CashRegisterLedger::resume_open(config.ledger.clone(), &repository)?;
    ledger.record_payment("19.99".parse()?, PaymentMethod::Digital, "DNI 45678912", &time)?;
    let result = ledger.close("345.20".parse()?, &time)?;
    ledger.save_to(&mut repository)?;

    println!("\nclosure: {}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
