use strum_macros::{Display, EnumIter, EnumString};

/// Category tag of a holding. Only the REIT / non-REIT split changes how a
/// holding is valued; the other kinds drive filtering and allocation.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AssetKind {
    Equity,
    Thematic,
    #[strum(to_string = "REIT")]
    Reit,
    Debt,
    Hybrid,
    Liquid,
}

impl AssetKind {
    pub fn is_reit(&self) -> bool {
        *self == AssetKind::Reit
    }
}
