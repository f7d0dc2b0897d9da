use chrono::Local;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};
use rust_decimal::Decimal;
use soprum_core::report::{ComparisonReport, SizeClass};

use crate::app::{App, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let today = Local::now().date_naive().format("%Y-%m-%d");
    let header = Paragraph::new(format!(
        "soprum – annual waste costs for {} · {today}",
        app.username
    ))
    .block(Block::default().borders(Borders::ALL).title("Soprum"));
    frame.render_widget(header, *header_area);

    match app.screen {
        Screen::PropertyList => draw_property_list(frame, app, *content_area),
        Screen::ComparisonView => draw_comparison(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::PropertyList => "↑/↓ move · Enter compare with peers · r reload · q/Ctrl-C quit",
        Screen::ComparisonView => "Esc/←/b back to properties · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_property_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = "Properties (↑/↓, Enter)";

    if app.costs.is_empty() {
        let text = if app.is_loading {
            "Loading costs…"
        } else {
            "No properties to show. Press r to reload."
        };
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = app.costs.iter().map(|report| {
        Row::new(vec![
            Cell::from(report.address.clone()),
            Cell::from(money(report.total_cost)),
            Cell::from(money(report.cost_per_apartment)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(16),
            Constraint::Length(16),
        ],
    )
    .header(
        Row::new(vec!["Address", "Total / year", "Per apartment"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ")
    .column_spacing(1);

    let mut state = TableState::default();
    state.select(Some(app.list_index));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_comparison(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(report) = app.comparison.as_ref() else {
        let paragraph = Paragraph::new("No comparison loaded.")
            .block(Block::default().borders(Borders::ALL).title("Comparison"));
        frame.render_widget(paragraph, area);
        return;
    };

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // summary
            Constraint::Min(0),    // waste amounts
            Constraint::Min(0),    // frequencies
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [summary_area, waste_area, frequency_area] = chunks else {
        return;
    };

    draw_summary(frame, report, *summary_area);
    draw_waste_amounts(frame, report, *waste_area);
    draw_frequencies(frame, report, *frequency_area);
}

fn draw_summary(frame: &mut Frame<'_>, report: &ComparisonReport, area: Rect) {
    let cost = &report.cost_comparison;
    let size = &report.container_size_comparison;

    let lines = vec![
        Line::from(vec![
            Span::raw(format!("Annual cost {} ", money(cost.property_cost))),
            Span::styled(
                percent(cost.percentage_difference),
                difference_style(cost.percentage_difference),
            ),
            Span::raw(format!(
                " vs. average {} (min {}, max {})",
                money(cost.average_cost),
                money(cost.min_cost),
                money(cost.max_cost)
            )),
        ]),
        Line::from(vec![
            Span::raw(format!(
                "Container volume {} l vs. average {} l: ",
                size.property_total_volume, size.average_volume
            )),
            Span::styled(size.comparison.label(), size_style(size.comparison)),
        ]),
        Line::from(format!(
            "{} peers · {} · {} apartments",
            cost.comparison_group_size, report.property_type, report.number_of_apartments
        )),
    ];

    let title = format!("{} (Esc/←/b to go back)", report.address);
    let summary = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(summary, area);
}

fn draw_waste_amounts(frame: &mut Frame<'_>, report: &ComparisonReport, area: Rect) {
    let rows = report.waste_amount_comparisons.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.service_type.to_string()),
            Cell::from(row.property_amount.to_string()),
            Cell::from(row.average_amount.to_string()),
            Cell::from(format!("{} – {}", row.min_amount, row.max_amount)),
            Cell::from(percent(row.percentage_difference))
                .style(difference_style(row.percentage_difference)),
            Cell::from(row.comparison_group_size.to_string()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(24),
            Constraint::Length(10),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec!["Service", "l / year", "Average", "Range", "Diff", "Peers"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Waste amount per service"),
    )
    .column_spacing(1);

    frame.render_widget(table, area);
}

fn draw_frequencies(frame: &mut Frame<'_>, report: &ComparisonReport, area: Rect) {
    let rows = report.frequency_comparisons.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.service_type.to_string()),
            Cell::from(row.property_frequency.to_string()),
            Cell::from(row.average_frequency.to_string()),
            Cell::from(percent(row.percentage_difference))
                .style(difference_style(row.percentage_difference)),
            Cell::from(row.comparison_group_size.to_string()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec!["Service", "Per year", "Average", "Diff", "Peers"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Emptying frequency per service"),
    )
    .column_spacing(1);

    frame.render_widget(table, area);
}

fn money(amount: Decimal) -> String {
    format!("{amount:.2} kr")
}

fn percent(value: Decimal) -> String {
    if value.is_sign_positive() && !value.is_zero() {
        format!("+{value:.2} %")
    } else {
        format!("{value:.2} %")
    }
}

// Paying less than the peers is good news.
fn difference_style(value: Decimal) -> Style {
    if value.is_sign_negative() && !value.is_zero() {
        Style::default().fg(Color::Green)
    } else if value.is_zero() {
        Style::default()
    } else {
        Style::default().fg(Color::Red)
    }
}

fn size_style(class: SizeClass) -> Style {
    match class {
        SizeClass::Smaller => Style::default().fg(Color::Cyan),
        SizeClass::Similar => Style::default().fg(Color::Green),
        SizeClass::Larger => Style::default().fg(Color::Magenta),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn formats_amounts_and_percentages() {
        assert_eq!(money(Decimal::new(64_005, 2)), "640.05 kr", "money");
        assert_eq!(money(Decimal::from(1500)), "1500.00 kr", "padded");
        assert_eq!(percent(Decimal::new(-3333, 2)), "-33.33 %", "negative");
        assert_eq!(percent(Decimal::new(5, 0)), "+5.00 %", "positive");
        assert_eq!(percent(Decimal::ZERO), "0.00 %", "zero");
    }
}
