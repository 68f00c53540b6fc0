/// loan schedule - validate a client, check policy and print the full schedule
use microloan_ledger::chrono::NaiveDate;
use microloan_ledger::{
    AmortizationSchedule, ClientProfile, ContactDetails, CoreConfig, Decimal, LoanTerms, Money,
    NaturalPerson, Rate,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== loan schedule ===\n");

    let config = CoreConfig::default();

    let client = ClientProfile::Natural(NaturalPerson {
        dni: "45678912".to_string(),
        first_name: "Rosa".to_string(),
        last_name: "Quispe".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1988, 4, 2),
        is_pep: false,
        contact: ContactDetails::default(),
    });
    client.validate()?;

    let terms = LoanTerms::new(
        Money::from_major(6_000),
        Rate::from_percent(Decimal::new(365, 1)),
        NaiveDate::from_ymd_opt(2025, 1, 31).ok_or("bad date")?,
        12,
    )?;
    config.lending.check_terms(&terms)?;

    println!("client: {} ({})", client.display_name(), client.document());
    for declaration in config.lending.required_declarations(&client, terms.principal) {
        println!("  requires declaration: {:?}", declaration);
    }

    let schedule = AmortizationSchedule::generate(terms)?;

    println!("\n  #  due date     amount   interest  principal    balance");
    for i in &schedule.installments {
        println!(
            "{:>3}  {}  {:>9}  {:>9}  {:>9}  {:>9}",
            i.installment_number,
            i.due_date,
            i.amount.to_string(),
            i.interest_portion.to_string(),
            i.principal_portion.to_string(),
            i.remaining_balance.to_string(),
        );
    }

    println!("\ntotal interest: {}", schedule.total_interest);
    println!("total payment:  {}", schedule.total_payment);

    // a zero-rate loan splits the principal evenly
    let interest_free = LoanTerms::new(
        Money::from_major(1_200),
        Rate::ZERO,
        NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("bad date")?,
        12,
    )?;
    let schedule = AmortizationSchedule::generate(interest_free)?;
    println!("\ninterest-free installment: {}", schedule.base_payment);

    Ok(())
}
