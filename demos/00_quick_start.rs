/// quick start - minimal example to get started
use microloan_ledger::chrono::NaiveDate;
use microloan_ledger::{AmortizationSchedule, Decimal, LoanTerms, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // S/ 1,000 over three months at 24% a year
    let terms = LoanTerms::new(
        Money::from_major(1_000),
        Rate::from_percent(Decimal::from(24)),
        NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("bad date")?,
        3,
    )?;

    let schedule = AmortizationSchedule::generate(terms)?;
    for installment in &schedule.installments {
        println!(
            "#{} {} {}",
            installment.installment_number, installment.due_date, installment.amount
        );
    }

    Ok(())
}
