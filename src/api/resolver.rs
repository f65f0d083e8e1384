use std::future::Future;

use rust_decimal::Decimal;
use thiserror::Error;

/// Why a price could not be resolved.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum LookupMiss {
    #[error("scheme code not listed")]
    NotListed,

    #[error("price list unavailable: {0}")]
    Unavailable(String),

    #[error("malformed price record: {0}")]
    Malformed(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PriceLookup {
    Found(Decimal),
    Miss(LookupMiss),
}

impl PriceLookup {
    pub fn price(&self) -> Option<Decimal> {
        match self {
            PriceLookup::Found(price) => Some(*price),
            PriceLookup::Miss(_) => None,
        }
    }
}

/// Source of per-unit prices keyed by an opaque lookup key.
///
/// Implementations must not fail: every fetch or parse problem is reported as
/// a [`PriceLookup::Miss`].
pub trait PriceResolver {
    fn resolve(&self, key: &str) -> impl Future<Output = PriceLookup>;
}
