use std::{
    fs::{File, read_to_string},
    io::{Read, Write},
    str::FromStr,
};

use anyhow::{Context, Error, Result};
use csv::{Reader, Writer};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{
    AssetKind, FundHolding, Holding, PortfolioFile, ReitHolding, ValuationRow,
};

pub const DEFAULT_EXPORT_PATH: &str = "portfolio_summary.csv";
pub const SUMMARY_HEADER: [&str; 5] = ["Asset", "Type", "Invested", "Current Value", "Gain/Loss"];

pub fn parse_decimal(field: &str, field_name: &str) -> Result<Decimal> {
    field
        .parse::<Decimal>()
        .with_context(|| format!("Failed to parse {} '{}'", field_name, field))
}

/// Rounds a money amount to two places, half to even, without a negative zero.
pub fn round_money(amount: Decimal) -> Decimal {
    let rounded = amount.round_dp(2);
    if rounded.is_zero() {
        Decimal::new(0, 2)
    } else {
        rounded
    }
}

pub fn load_portfolio(path: &str) -> Result<(Vec<Holding>, Vec<String>)> {
    let path = shellexpand::tilde(path);
    let data = read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read portfolio file at path: {}", path))?;

    parse_portfolio(&data).with_context(|| format!("Invalid portfolio file: {}", path))
}

pub fn parse_portfolio(data: &str) -> Result<(Vec<Holding>, Vec<String>)> {
    let file: PortfolioFile = serde_json::from_str(data)?;
    let holdings = file
        .holdings
        .into_iter()
        .map(Holding::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((holdings, file.reminders))
}

pub fn default_holdings() -> Vec<Holding> {
    vec![
        Holding::Fund(FundHolding::new(
            "Parag Parikh Flexi Cap Fund".to_string(),
            AssetKind::Equity,
            "120503".to_string(),
            dec!(5000),
        )),
        Holding::Fund(FundHolding::new(
            "ICICI Infrastructure Fund".to_string(),
            AssetKind::Thematic,
            "120767".to_string(),
            dec!(15000),
        )),
        Holding::Reit(ReitHolding::new(
            "Embassy Office Parks REIT".to_string(),
            dec!(335),
            dec!(60),
        )),
        Holding::Fund(FundHolding::new(
            "ICICI Corporate Bond Fund".to_string(),
            AssetKind::Debt,
            "118834".to_string(),
            dec!(25000),
        )),
        Holding::Fund(FundHolding::new(
            "HDFC Balanced Advantage Fund".to_string(),
            AssetKind::Hybrid,
            "118550".to_string(),
            dec!(15000),
        )),
        Holding::Fund(FundHolding::new(
            "Axis Liquid Fund".to_string(),
            AssetKind::Liquid,
            "119551".to_string(),
            dec!(5000),
        )),
    ]
}

pub fn default_reminders() -> Vec<String> {
    [
        "Upcoming SIP Date: 10th of each month",
        "SGB Next Window: Awaiting RBI Notification",
        "Embassy REIT Q1 Payout: May 15, 2025",
        "Review portfolio quarterly",
        "Top up ICICI Infra Fund if cash available",
    ]
    .iter()
    .map(|r| r.to_string())
    .collect()
}

pub fn write_summary_csv<W: Write>(rows: &[ValuationRow], writer: W) -> Result<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(SUMMARY_HEADER)?;

    for row in rows {
        writer.write_record([
            row.name().clone(),
            row.kind().to_string(),
            row.invested().to_string(),
            row.current_value().to_string(),
            row.gain_loss().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn export_summary_csv(rows: &[ValuationRow], path: &str) -> Result<String> {
    let path = shellexpand::tilde(path).to_string();
    let file = File::create(&path)
        .with_context(|| format!("Failed to create CSV file at path: {}", path))?;
    write_summary_csv(rows, file)
        .with_context(|| format!("Failed to write CSV file at path: {}", path))?;

    Ok(path)
}

pub fn read_summary_csv<R: Read>(reader: R) -> Result<Vec<ValuationRow>> {
    let mut reader = Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (row_idx, record) in reader.records().enumerate() {
        let rec =
            record.with_context(|| format!("Failed to read CSV record at row {}", row_idx + 1))?;

        if rec.len() != SUMMARY_HEADER.len() {
            return Err(Error::msg(format!(
                "Invalid CSV format at row {}: expected {} columns, found {}",
                row_idx + 1,
                SUMMARY_HEADER.len(),
                rec.len()
            )));
        }

        let kind = AssetKind::from_str(&rec[1]).with_context(|| {
            format!("Unknown asset type '{}' at row {}", &rec[1], row_idx + 1)
        })?;

        rows.push(ValuationRow::new(
            rec[0].to_string(),
            kind,
            parse_decimal(&rec[2], "invested amount")?,
            parse_decimal(&rec[3], "current value")?,
            parse_decimal(&rec[4], "gain/loss")?,
        ));
    }

    Ok(rows)
}
