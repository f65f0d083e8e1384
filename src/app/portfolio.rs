use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, Local};
use derive_getters::Getters;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::{
    api::{LookupMiss, PriceLookup, PriceResolver},
    app::utils::round_money,
    models::{
        AssetKind, FundHolding, Holding, ReitHolding, Snapshot, SnapshotCache, ValuationRow,
    },
};

/// The static holdings of a session together with the cached valuation.
pub struct Portfolio<R> {
    holdings: Vec<Holding>,
    reminders: Vec<String>,
    resolver: R,
    cache: SnapshotCache,
}

impl<R: PriceResolver> Portfolio<R> {
    pub fn new(
        holdings: Vec<Holding>,
        reminders: Vec<String>,
        resolver: R,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            holdings,
            reminders,
            resolver,
            cache: SnapshotCache::new(refresh_interval),
        }
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn reminders(&self) -> &[String] {
        &self.reminders
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.cache.snapshot()
    }

    pub fn refresh_interval(&self) -> Duration {
        self.cache.refresh_interval()
    }

    pub fn is_stale(&self, now: DateTime<Local>) -> bool {
        self.cache.is_stale(now)
    }

    /// Rebuilds the snapshot unconditionally.
    pub async fn refresh(&mut self, now: DateTime<Local>) {
        let rows = build_valuation(&self.holdings, &self.resolver).await;
        info!(
            rows = rows.len(),
            holdings = self.holdings.len(),
            "valuation snapshot rebuilt"
        );
        self.cache.store(Snapshot::new(rows, now));
    }

    /// Rebuilds the snapshot only once it has outlived the refresh interval.
    /// Returns whether a rebuild happened.
    pub async fn refresh_if_stale(&mut self, now: DateTime<Local>) -> bool {
        if !self.cache.is_stale(now) {
            return false;
        }
        self.refresh(now).await;
        true
    }
}

pub async fn build_valuation<R: PriceResolver>(
    holdings: &[Holding],
    resolver: &R,
) -> Vec<ValuationRow> {
    let mut rows = Vec::with_capacity(holdings.len());

    for holding in holdings {
        match holding {
            Holding::Reit(reit) => match value_reit(reit) {
                Some(row) => rows.push(row),
                None => warn!(holding = %reit.name(), "dropping REIT whose value overflows"),
            },
            Holding::Fund(fund) => {
                let row = match resolver.resolve(fund.scheme_code()).await {
                    PriceLookup::Found(nav) if nav > Decimal::ZERO => {
                        value_fund(fund, nav).or_else(|| {
                            let reason = format!("NAV {} overflows the valuation", nav);
                            drop_unpriced(fund, &LookupMiss::Malformed(reason))
                        })
                    }
                    PriceLookup::Found(nav) => drop_unpriced(
                        fund,
                        &LookupMiss::Malformed(format!("non-positive NAV {}", nav)),
                    ),
                    PriceLookup::Miss(miss) => drop_unpriced(fund, &miss),
                };
                rows.extend(row);
            }
        }
    }

    rows
}

/// REITs are held at cost: current value equals invested, gain/loss is zero.
/// `None` when `unit_price * unit_count` does not fit a decimal.
pub fn value_reit(reit: &ReitHolding) -> Option<ValuationRow> {
    let value = reit.value()?;
    Some(ValuationRow::new(
        reit.name().clone(),
        AssetKind::Reit,
        value,
        value,
        Decimal::ZERO,
    ))
}

/// `None` when the NAV is too small or too large to value `invested` with.
pub fn value_fund(fund: &FundHolding, nav: Decimal) -> Option<ValuationRow> {
    let invested = *fund.invested_amount();
    let units = invested.checked_div(nav)?;
    let current_value = units.checked_mul(nav)?;
    let gain_loss = current_value.checked_sub(invested)?;

    Some(ValuationRow::new(
        fund.name().clone(),
        *fund.kind(),
        invested,
        round_money(current_value),
        round_money(gain_loss),
    ))
}

/// A fund without a usable price is left out of the snapshot; the miss is
/// only logged.
pub fn drop_unpriced(fund: &FundHolding, miss: &LookupMiss) -> Option<ValuationRow> {
    warn!(
        holding = %fund.name(),
        scheme_code = %fund.scheme_code(),
        reason = %miss,
        "dropping holding without a price"
    );
    None
}

pub fn filter_rows<'a>(
    rows: &'a [ValuationRow],
    kinds: &BTreeSet<AssetKind>,
) -> Vec<&'a ValuationRow> {
    rows.iter().filter(|row| kinds.contains(row.kind())).collect()
}

/// Current value per asset kind, ordered by kind.
pub fn allocation_by_kind(rows: &[&ValuationRow]) -> Vec<(AssetKind, Decimal)> {
    let mut allocation: BTreeMap<AssetKind, Decimal> = BTreeMap::new();
    for row in rows {
        *allocation.entry(*row.kind()).or_insert(Decimal::ZERO) += *row.current_value();
    }
    allocation.into_iter().collect()
}

#[derive(Clone, Debug, Default, Getters)]
pub struct Totals {
    invested: Decimal,
    current_value: Decimal,
    gain_loss: Decimal,
}

pub fn totals(rows: &[&ValuationRow]) -> Totals {
    rows.iter().fold(Totals::default(), |acc, row| Totals {
        invested: acc.invested + *row.invested(),
        current_value: acc.current_value + *row.current_value(),
        gain_loss: acc.gain_loss + *row.gain_loss(),
    })
}
