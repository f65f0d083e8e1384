use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use super::AssetKind;

#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct ValuationRow {
    name: String,
    kind: AssetKind,
    invested: Decimal,
    current_value: Decimal,
    gain_loss: Decimal,
}
