use anyhow::{Error, Result};
use reqwest::Client;

pub async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let res = client.get(url).send().await?;

    if !res.status().is_success() {
        return Err(Error::msg(format!("Request failed: {}", res.status())));
    }

    let text = res.text().await?;

    Ok(text)
}
