use std::str::FromStr;

use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use super::AssetKind;

/// A mutual fund position valued from its live NAV.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct FundHolding {
    name: String,
    kind: AssetKind,
    scheme_code: String,
    invested_amount: Decimal,
}

/// A REIT position held at a fixed unit price.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct ReitHolding {
    name: String,
    unit_price: Decimal,
    unit_count: Decimal,
}

impl ReitHolding {
    /// `None` when the product overflows.
    pub fn value(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(self.unit_count)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Holding {
    Fund(FundHolding),
    Reit(ReitHolding),
}

impl Holding {
    pub fn name(&self) -> &str {
        match self {
            Holding::Fund(fund) => fund.name(),
            Holding::Reit(reit) => reit.name(),
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            Holding::Fund(fund) => *fund.kind(),
            Holding::Reit(_) => AssetKind::Reit,
        }
    }
}

#[derive(Debug, Error)]
pub enum HoldingError {
    #[error("Unknown asset type '{asset_type}' for '{name}'")]
    UnknownType { name: String, asset_type: String },

    #[error("REIT holding '{name}' needs both 'Price' and 'Units'")]
    MissingUnitPricing { name: String },

    #[error("Fund holding '{name}' needs both 'AMFI Code' and 'Amount'")]
    MissingSchemePricing { name: String },

    #[error("REIT holding '{name}' is worth more than a decimal can hold")]
    ValueOverflow { name: String },
}

/// One entry of the portfolio file, in the column names of the exported summary.
#[derive(Clone, Debug, Deserialize)]
pub struct HoldingRecord {
    #[serde(rename = "Asset")]
    pub asset: String,
    #[serde(rename = "Type")]
    pub asset_type: String,
    #[serde(rename = "AMFI Code", default)]
    pub amfi_code: Option<String>,
    #[serde(rename = "Amount", default)]
    pub amount: Option<Decimal>,
    #[serde(rename = "Price", default)]
    pub price: Option<Decimal>,
    #[serde(rename = "Units", default)]
    pub units: Option<Decimal>,
}

impl TryFrom<HoldingRecord> for Holding {
    type Error = HoldingError;

    fn try_from(record: HoldingRecord) -> Result<Self, Self::Error> {
        let kind = AssetKind::from_str(&record.asset_type).map_err(|_| {
            HoldingError::UnknownType {
                name: record.asset.clone(),
                asset_type: record.asset_type.clone(),
            }
        })?;

        if kind.is_reit() {
            return match (record.price, record.units) {
                (Some(price), Some(units)) => {
                    let reit = ReitHolding::new(record.asset, price, units);
                    match reit.value() {
                        Some(_) => Ok(Holding::Reit(reit)),
                        None => Err(HoldingError::ValueOverflow {
                            name: reit.name().clone(),
                        }),
                    }
                }
                _ => Err(HoldingError::MissingUnitPricing { name: record.asset }),
            };
        }

        match (record.amfi_code, record.amount) {
            (Some(code), Some(amount)) => Ok(Holding::Fund(FundHolding::new(
                record.asset,
                kind,
                code,
                amount,
            ))),
            _ => Err(HoldingError::MissingSchemePricing { name: record.asset }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PortfolioFile {
    pub holdings: Vec<HoldingRecord>,
    #[serde(default)]
    pub reminders: Vec<String>,
}
