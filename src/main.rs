use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use nav_dashboard::{
    api::AmfiNavResolver,
    app::{
        App, Portfolio,
        calc::run_swp,
        utils::{default_holdings, default_reminders, export_summary_csv, load_portfolio},
    },
    config::{Cli, Command},
    logging::init_tracing,
    models::SwpInput,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_file)?;

    if let Some(Command::Swp {
        corpus,
        withdrawal,
        annual_return,
    }) = cli.command
    {
        let outcome = run_swp(&SwpInput::new(corpus, withdrawal, annual_return));
        println!("Your corpus will last for {}.", outcome);
        return Ok(());
    }

    let (holdings, reminders) = match &cli.portfolio {
        Some(path) => load_portfolio(path)?,
        None => (default_holdings(), default_reminders()),
    };
    info!(holdings = holdings.len(), nav_url = %cli.nav_url, "starting");

    let resolver = AmfiNavResolver::new(&cli.nav_url, Duration::from_secs(cli.timeout_secs))?;
    let mut portfolio = Portfolio::new(
        holdings,
        reminders,
        resolver,
        chrono::Duration::minutes(i64::from(cli.refresh_minutes)),
    );

    if cli.command == Some(Command::Export) {
        portfolio.refresh(Local::now()).await;
        let rows = portfolio
            .snapshot()
            .map(|snapshot| snapshot.rows().as_slice())
            .unwrap_or_default();
        let path = export_summary_csv(rows, &cli.export_path)?;
        println!("Exported {} rows to {}", rows.len(), path);
        return Ok(());
    }

    let mut app = App::new(portfolio, cli.export_path);
    app.run().await?;

    Ok(())
}
