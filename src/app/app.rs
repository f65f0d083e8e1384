use std::{collections::BTreeSet, io, time::Duration};

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    widgets::TableState,
};
use strum::IntoEnumIterator;
use tracing::{error, info};

use crate::{
    api::PriceResolver,
    app::{
        Portfolio,
        portfolio::filter_rows,
        ui::{self, DashboardView},
        utils::export_summary_csv,
    },
    models::{AssetKind, SwpInput},
};

const TICK_RATE: Duration = Duration::from_secs(1);
const CORPUS_STEP: f64 = 50_000.0;
const WITHDRAWAL_STEP: f64 = 500.0;
const RETURN_STEP: f64 = 0.5;
pub const MAX_ANNUAL_RETURN: f64 = 15.0;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwpField {
    Corpus,
    Withdrawal,
    AnnualReturn,
}

impl SwpField {
    pub fn next(self) -> Self {
        match self {
            SwpField::Corpus => SwpField::Withdrawal,
            SwpField::Withdrawal => SwpField::AnnualReturn,
            SwpField::AnnualReturn => SwpField::Corpus,
        }
    }
}

pub struct App<R> {
    portfolio: Portfolio<R>,
    export_path: String,
    selected_kinds: BTreeSet<AssetKind>,
    swp: SwpInput,
    swp_field: SwpField,
    table_state: TableState,
    popup_message: Option<String>,
    error_popup: Option<String>,
}

impl<R: PriceResolver> App<R> {
    pub fn new(portfolio: Portfolio<R>, export_path: String) -> Self {
        Self {
            portfolio,
            export_path,
            selected_kinds: AssetKind::iter().collect(),
            swp: SwpInput::default(),
            swp_field: SwpField::Corpus,
            table_state: TableState::default(),
            popup_message: None,
            error_popup: None,
        }
    }

    pub fn portfolio(&self) -> &Portfolio<R> {
        &self.portfolio
    }

    pub fn selected_kinds(&self) -> &BTreeSet<AssetKind> {
        &self.selected_kinds
    }

    pub fn swp(&self) -> &SwpInput {
        &self.swp
    }

    pub fn swp_field(&self) -> SwpField {
        self.swp_field
    }

    fn show_popup(&mut self, message: &str) {
        self.popup_message = Some(message.to_string());
    }

    fn clear_popup(&mut self) {
        self.popup_message = None;
    }

    fn show_error_popup(&mut self, message: &str) {
        self.error_popup = Some(message.to_string());
    }

    fn clear_error_popup(&mut self) {
        self.error_popup = None;
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal).await;

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            if self.portfolio.is_stale(Local::now()) {
                self.refresh(terminal).await?;
            }

            self.draw(terminal)?;

            if !event::poll(TICK_RATE)? {
                continue;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if self.error_popup.is_some() {
                    if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                        self.clear_error_popup();
                    }
                    continue;
                }
                self.clear_popup();

                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::F(5) => self.refresh(terminal).await?,
                    KeyCode::Char('e') => self.export(),
                    KeyCode::Char('a') => self.selected_kinds = AssetKind::iter().collect(),
                    KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
                        if let Some(position) = c.to_digit(10) {
                            self.toggle_kind(position as usize - 1);
                        }
                    }
                    KeyCode::Tab => self.next_swp_field(),
                    KeyCode::Right | KeyCode::Char('+') => self.adjust_swp(1.0),
                    KeyCode::Left | KeyCode::Char('-') => self.adjust_swp(-1.0),
                    KeyCode::Esc => self.table_state.select(None),
                    KeyCode::Down => self.select_row(1),
                    KeyCode::Up => self.select_row(-1),
                    _ => {}
                }
            }
        }
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let view = DashboardView {
            snapshot: self.portfolio.snapshot(),
            reminders: self.portfolio.reminders(),
            refresh_interval: self.portfolio.refresh_interval(),
            selected_kinds: &self.selected_kinds,
            swp: &self.swp,
            swp_field: self.swp_field,
            popup_message: &self.popup_message,
            error_popup: &self.error_popup,
        };
        let table_state = &mut self.table_state;
        terminal.draw(|frame| ui::render(frame, &view, table_state))?;
        Ok(())
    }

    async fn refresh<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        self.table_state.select(None);
        self.show_popup("Fetching latest NAVs...");
        self.draw(terminal)?;

        self.portfolio.refresh(Local::now()).await;

        self.clear_popup();
        Ok(())
    }

    /// Writes the whole snapshot, not just the filtered rows.
    pub fn export(&mut self) {
        let Some(snapshot) = self.portfolio.snapshot() else {
            self.show_error_popup("Nothing to export yet");
            return;
        };
        let row_count = snapshot.rows().len();

        match export_summary_csv(snapshot.rows(), &self.export_path) {
            Ok(path) => {
                info!(rows = row_count, path = %path, "exported portfolio summary");
                self.show_popup(&format!("Exported {} rows to {}", row_count, path));
            }
            Err(e) => {
                error!("CSV export failed: {:#}", e);
                self.show_error_popup(&format!("Error exporting CSV: {:?}", e));
            }
        }
    }

    /// Toggles the `position`-th kind present in the snapshot.
    pub fn toggle_kind(&mut self, position: usize) {
        let Some(kind) = self
            .portfolio
            .snapshot()
            .and_then(|snapshot| snapshot.kinds().get(position).copied())
        else {
            return;
        };

        if !self.selected_kinds.remove(&kind) {
            self.selected_kinds.insert(kind);
        }
        self.table_state.select(None);
    }

    pub fn next_swp_field(&mut self) {
        self.swp_field = self.swp_field.next();
    }

    /// Moves the focused SWP input by `steps` increments. Amounts stay
    /// non-negative and the return stays within `0..=MAX_ANNUAL_RETURN`.
    pub fn adjust_swp(&mut self, steps: f64) {
        match self.swp_field {
            SwpField::Corpus => self
                .swp
                .set_corpus((self.swp.corpus() + steps * CORPUS_STEP).max(0.0)),
            SwpField::Withdrawal => self.swp.set_monthly_withdrawal(
                (self.swp.monthly_withdrawal() + steps * WITHDRAWAL_STEP).max(0.0),
            ),
            SwpField::AnnualReturn => self.swp.set_annual_return_percent(
                (self.swp.annual_return_percent() + steps * RETURN_STEP)
                    .clamp(0.0, MAX_ANNUAL_RETURN),
            ),
        }
    }

    fn select_row(&mut self, offset: isize) {
        let row_count = self
            .portfolio
            .snapshot()
            .map(|snapshot| filter_rows(snapshot.rows(), &self.selected_kinds).len())
            .unwrap_or(0);
        if row_count == 0 {
            return;
        }

        let i = match self.table_state.selected() {
            Some(i) => (i as isize + offset).rem_euclid(row_count as isize) as usize,
            None => 0,
        };
        self.table_state.select(Some(i));
    }
}
