use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::debug;

use super::{
    resolver::{LookupMiss, PriceLookup, PriceResolver},
    utils::fetch_text,
};
use crate::app::utils::parse_decimal;

pub const NAV_ALL_URL: &str = "https://www.amfiindia.com/spages/NAVAll.txt";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Resolves scheme codes against the AMFI `NAVAll.txt` price list.
///
/// The list is downloaded on every lookup; callers cache whole snapshots.
#[derive(Clone, Debug)]
pub struct AmfiNavResolver {
    client: Client,
    url: String,
}

impl AmfiNavResolver {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .with_context(|| "Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl PriceResolver for AmfiNavResolver {
    async fn resolve(&self, scheme_code: &str) -> PriceLookup {
        debug!(scheme_code, url = %self.url, "fetching NAV list");
        match fetch_text(&self.client, &self.url).await {
            Ok(nav_list) => find_nav(&nav_list, scheme_code),
            Err(err) => PriceLookup::Miss(LookupMiss::Unavailable(format!("{:#}", err))),
        }
    }
}

/// Finds the first record starting with `scheme_code` and reads the NAV from
/// its second-to-last `;` field.
pub fn find_nav(nav_list: &str, scheme_code: &str) -> PriceLookup {
    let Some(line) = nav_list.lines().find(|line| line.starts_with(scheme_code)) else {
        return PriceLookup::Miss(LookupMiss::NotListed);
    };

    let fields: Vec<&str> = line.trim().split(';').collect();
    if fields.len() < 2 {
        return PriceLookup::Miss(LookupMiss::Malformed(format!(
            "expected at least 2 fields in '{}'",
            line.trim()
        )));
    }

    match parse_decimal(fields[fields.len() - 2].trim(), "NAV") {
        Ok(nav) => PriceLookup::Found(nav),
        Err(err) => PriceLookup::Miss(LookupMiss::Malformed(err.to_string())),
    }
}
