use crate::models::{SwpInput, SwpOutcome};

pub const MAX_SWP_MONTHS: u32 = 600;

/// Effective monthly rate equivalent to an annual return percentage.
pub fn monthly_rate(annual_return_percent: f64) -> f64 {
    (1.0 + annual_return_percent / 100.0).powf(1.0 / 12.0) - 1.0
}

/// Months a corpus survives a fixed monthly withdrawal, capped at `max_months`.
pub fn simulate(
    corpus: f64,
    monthly_withdrawal: f64,
    annual_return_percent: f64,
    max_months: u32,
) -> u32 {
    amortize(
        corpus,
        monthly_withdrawal,
        annual_return_percent,
        max_months,
        |_| {},
    )
}

/// Month-end balances of the same schedule `simulate` counts.
pub fn project(input: &SwpInput, max_months: u32) -> Vec<f64> {
    let mut balances = Vec::new();
    amortize(
        *input.corpus(),
        *input.monthly_withdrawal(),
        *input.annual_return_percent(),
        max_months,
        |balance| balances.push(balance),
    );
    balances
}

pub fn run_swp(input: &SwpInput) -> SwpOutcome {
    SwpOutcome::new(simulate(
        *input.corpus(),
        *input.monthly_withdrawal(),
        *input.annual_return_percent(),
        MAX_SWP_MONTHS,
    ))
}

// Growth is applied before the withdrawal each month.
fn amortize(
    corpus: f64,
    monthly_withdrawal: f64,
    annual_return_percent: f64,
    max_months: u32,
    mut on_month: impl FnMut(f64),
) -> u32 {
    let rate = monthly_rate(annual_return_percent);
    let mut balance = corpus;
    let mut months = 0;

    while balance > 0.0 && months < max_months {
        balance *= 1.0 + rate;
        balance -= monthly_withdrawal;
        if balance < 0.0 {
            balance = 0.0;
        }
        months += 1;
        on_month(balance);
    }

    months
}
