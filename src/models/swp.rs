use std::fmt;

use derive_getters::Getters;
use derive_new::new;

#[derive(Clone, Copy, Debug, Getters, PartialEq, new)]
pub struct SwpInput {
    corpus: f64,
    monthly_withdrawal: f64,
    annual_return_percent: f64,
}

impl Default for SwpInput {
    fn default() -> Self {
        Self {
            corpus: 500_000.0,
            monthly_withdrawal: 5_000.0,
            annual_return_percent: 10.0,
        }
    }
}

impl SwpInput {
    pub fn set_corpus(&mut self, corpus: f64) {
        self.corpus = corpus;
    }

    pub fn set_monthly_withdrawal(&mut self, monthly_withdrawal: f64) {
        self.monthly_withdrawal = monthly_withdrawal;
    }

    pub fn set_annual_return_percent(&mut self, annual_return_percent: f64) {
        self.annual_return_percent = annual_return_percent;
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, new)]
pub struct SwpOutcome {
    months_survived: u32,
}

impl SwpOutcome {
    pub fn months_survived(&self) -> u32 {
        self.months_survived
    }

    pub fn years(&self) -> u32 {
        self.months_survived / 12
    }

    pub fn remainder_months(&self) -> u32 {
        self.months_survived % 12
    }
}

impl fmt::Display for SwpOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} months (~{} years and {} months)",
            self.months_survived,
            self.years(),
            self.remainder_months()
        )
    }
}
