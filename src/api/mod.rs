pub mod amfi;
pub mod resolver;
pub mod utils;

pub use amfi::AmfiNavResolver;
pub use resolver::{LookupMiss, PriceLookup, PriceResolver};
