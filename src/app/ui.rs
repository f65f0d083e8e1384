use std::collections::BTreeSet;

use chrono::Duration;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row,
        Sparkline, Table, TableState, Wrap,
    },
};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{
    app::{
        app::SwpField,
        calc::{MAX_SWP_MONTHS, project, run_swp},
        portfolio::{allocation_by_kind, filter_rows, totals},
    },
    models::{AssetKind, Snapshot, SwpInput, ValuationRow},
};

/// Everything the dashboard draws in one frame.
pub struct DashboardView<'a> {
    pub snapshot: Option<&'a Snapshot>,
    pub reminders: &'a [String],
    pub refresh_interval: Duration,
    pub selected_kinds: &'a BTreeSet<AssetKind>,
    pub swp: &'a SwpInput,
    pub swp_field: SwpField,
    pub popup_message: &'a Option<String>,
    pub error_popup: &'a Option<String>,
}

pub fn render(frame: &mut Frame, view: &DashboardView, table_state: &mut TableState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = Paragraph::new("Personal Investment Dashboard")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let rows = view
        .snapshot
        .map(|snapshot| filter_rows(snapshot.rows(), view.selected_kinds))
        .unwrap_or_default();

    render_filters(frame, chunks[1], view);
    render_summary(frame, chunks[2], view.snapshot.is_some(), &rows, table_state);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    render_allocation(frame, charts[0], &rows);
    render_gain_loss(frame, charts[1], &rows);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[4]);
    render_swp(frame, bottom[0], view.swp, view.swp_field);
    render_reminders(frame, bottom[1], view.reminders);

    render_footer(frame, chunks[5], view);

    if let Some(message) = view.popup_message {
        render_popup(frame, message, Color::Yellow, "Info");
    }
    if let Some(message) = view.error_popup {
        render_popup(frame, message, Color::Red, "Error (Enter to dismiss)");
    }
}

fn render_filters(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let mut spans = vec![Span::raw("Asset type: ")];
    if let Some(snapshot) = view.snapshot {
        for (i, kind) in snapshot.kinds().iter().enumerate() {
            let selected = view.selected_kinds.contains(kind);
            let marker = if selected { "[x]" } else { "[ ]" };
            let style = if selected {
                Style::default().fg(kind_color(*kind))
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!("{} {} {}  ", i + 1, marker, kind), style));
        }
    }

    let filters = Paragraph::new(Line::from(spans))
        .block(Block::default().title("Filters").borders(Borders::ALL));
    frame.render_widget(filters, area);
}

fn render_summary(
    frame: &mut Frame,
    area: Rect,
    loaded: bool,
    rows: &[&ValuationRow],
    table_state: &mut TableState,
) {
    let block = Block::default()
        .title("Portfolio Summary")
        .borders(Borders::ALL);

    if rows.is_empty() {
        let message = if loaded {
            "No holdings to display for the selected asset types."
        } else {
            "Fetching latest NAVs..."
        };
        let empty_message = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .block(block);
        frame.render_widget(empty_message, area);
        return;
    }

    let header_cells = ["Asset", "Type", "Invested", "Current Value", "Gain/Loss"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).style(Style::default()).height(1);

    let mut table_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            Row::new([
                Cell::from(row.name().to_string()),
                Cell::from(row.kind().to_string())
                    .style(Style::default().fg(kind_color(*row.kind()))),
                Cell::from(format!("{:.2}", row.invested())),
                Cell::from(format!("{:.2}", row.current_value())),
                Cell::from(signed(*row.gain_loss()))
                    .style(Style::default().fg(gain_color(*row.gain_loss()))),
            ])
            .height(1)
        })
        .collect();

    let sum = totals(rows);
    table_rows.push(
        Row::new([
            Cell::from("TOTAL"),
            Cell::from(""),
            Cell::from(format!("{:.2}", sum.invested())),
            Cell::from(format!("{:.2}", sum.current_value())),
            Cell::from(signed(*sum.gain_loss()))
                .style(Style::default().fg(gain_color(*sum.gain_loss()))),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    );

    let widths = [
        Constraint::Min(30),
        Constraint::Length(10),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(15),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    frame.render_stateful_widget(table, area, table_state);
}

fn render_allocation(frame: &mut Frame, area: Rect, rows: &[&ValuationRow]) {
    let allocation = allocation_by_kind(rows);
    let total: Decimal = allocation.iter().map(|(_, value)| *value).sum();

    let bars: Vec<Bar> = allocation
        .iter()
        .map(|(kind, value)| {
            let percent = if total.is_zero() {
                Decimal::ZERO
            } else {
                *value / total * Decimal::ONE_HUNDRED
            };
            Bar::default()
                .label(Line::from(kind.to_string()))
                .value(bar_value(*value))
                .text_value(format!("{:.1}%", percent))
                .style(Style::default().fg(kind_color(*kind)))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Allocation by Asset Type")
                .borders(Borders::ALL),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(2);

    frame.render_widget(chart, area);
}

fn render_gain_loss(frame: &mut Frame, area: Rect, rows: &[&ValuationRow]) {
    let bars: Vec<Bar> = rows
        .iter()
        .map(|row| {
            let gain_loss = *row.gain_loss();
            Bar::default()
                .label(Line::from(short_name(row.name(), 18)))
                .value(bar_value(gain_loss))
                .text_value(signed(gain_loss))
                .style(Style::default().fg(gain_color(gain_loss)))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Gain/Loss by Asset")
                .borders(Borders::ALL),
        )
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0);

    frame.render_widget(chart, area);
}

fn render_swp(frame: &mut Frame, area: Rect, swp: &SwpInput, focus: SwpField) {
    let block = Block::default()
        .title("SWP Simulator (Tab to switch, \u{2190}/\u{2192} to adjust)")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)])
        .split(inner);

    let field = |label: &str, value: String, this: SwpField| {
        let style = if this == focus {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        Line::from(vec![Span::raw(format!("{:<28}", label)), Span::styled(value, style)])
    };

    let outcome = run_swp(swp);
    let lines = vec![
        field(
            "Corpus amount (INR)",
            format!("{:.0}", swp.corpus()),
            SwpField::Corpus,
        ),
        field(
            "Monthly SWP amount (INR)",
            format!("{:.0}", swp.monthly_withdrawal()),
            SwpField::Withdrawal,
        ),
        field(
            "Expected annual return (%)",
            format!("{:.1}", swp.annual_return_percent()),
            SwpField::AnnualReturn,
        ),
        Line::from(Span::styled(
            format!("Your corpus will last for {}.", outcome),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), parts[0]);

    let balances: Vec<u64> = project(swp, MAX_SWP_MONTHS)
        .iter()
        .map(|balance| balance.max(0.0).round() as u64)
        .collect();
    let sparkline = Sparkline::default()
        .data(&balances)
        .style(Style::default().fg(Color::Green));
    frame.render_widget(sparkline, parts[1]);
}

fn render_reminders(frame: &mut Frame, area: Rect, reminders: &[String]) {
    let items: Vec<ListItem> = reminders
        .iter()
        .map(|reminder| ListItem::new(format!("\u{2022} {}", reminder)))
        .collect();
    let list = List::new(items).block(
        Block::default()
            .title("Reminders & Notes")
            .borders(Borders::ALL),
    );
    frame.render_widget(list, area);
}

fn render_footer(frame: &mut Frame, area: Rect, view: &DashboardView) {
    let refreshed = view
        .snapshot
        .map(|snapshot| snapshot.captured_at().format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let footer = Paragraph::new(format!(
        "Last refresh {} | auto-refresh every {} min | {}",
        refreshed,
        view.refresh_interval.num_minutes(),
        "F5 refresh | e export CSV | 1-9 filter | a all types | q quit"
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, area);
}

fn render_popup(frame: &mut Frame, message: &str, color: Color, title: &str) {
    let area = centered_rect(60, 20, frame.area());
    let popup = Paragraph::new(message.to_string())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn kind_color(kind: AssetKind) -> Color {
    match kind {
        AssetKind::Equity => Color::Blue,
        AssetKind::Thematic => Color::Magenta,
        AssetKind::Reit => Color::Yellow,
        AssetKind::Debt => Color::Cyan,
        AssetKind::Hybrid => Color::LightGreen,
        AssetKind::Liquid => Color::White,
    }
}

fn gain_color(amount: Decimal) -> Color {
    if amount >= Decimal::ZERO {
        Color::Green
    } else {
        Color::Red
    }
}

fn signed(amount: Decimal) -> String {
    if amount >= Decimal::ZERO {
        format!("+{:.2}", amount)
    } else {
        format!("{:.2}", amount)
    }
}

fn bar_value(amount: Decimal) -> u64 {
    amount.abs().round().to_u64().unwrap_or(0)
}

fn short_name(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let head: String = name.chars().take(width - 1).collect();
        format!("{}\u{2026}", head)
    }
}
