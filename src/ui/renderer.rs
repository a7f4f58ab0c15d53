use crate::catalog::{CharacterRecord, FilterField};
use crate::core::app::{ActiveView, App};
use crate::ui::theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame,
};

const CYCLED_FILTERS: [(&str, FilterField); 4] = [
    ("F1", FilterField::Element),
    ("F2", FilterField::Position),
    ("F3", FilterField::Gender),
    ("F4", FilterField::Team),
];

pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_tabs(f, app, chunks[0]);
    match app.view {
        ActiveView::Scout => render_scout(f, app, chunks[1]),
        ActiveView::Encyclopedia => render_encyclopedia(f, app, chunks[1]),
    }
    render_footer(f, app, chunks[2]);

    if let Some(record) = &app.detail {
        render_detail(f, record, f.area());
    }
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let selected = match app.view {
        ActiveView::Scout => 0,
        ActiveView::Encyclopedia => 1,
    };
    let title = format!(
        "Scoutdex v{} - {}",
        env!("CARGO_PKG_VERSION"),
        app.source_label
    );
    let tabs = Tabs::new([ActiveView::Scout.title(), ActiveView::Encyclopedia.title()])
        .block(Block::default().borders(Borders::ALL).title(title))
        .select(selected)
        .highlight_style(theme::title_style().add_modifier(Modifier::REVERSED));
    f.render_widget(tabs, area);
}

fn render_scout(f: &mut Frame, app: &App, area: Rect) {
    let button = centered_rect(30, 7, area);
    let label = Paragraph::new(vec![
        Line::default(),
        Line::default(),
        Line::from(Span::styled(app.scout_label(), theme::title_style())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT)),
    );
    f.render_widget(label, button);

    let hint_area = Rect {
        y: button.y.saturating_add(button.height).saturating_add(1),
        height: 2,
        ..area
    }
    .intersection(area);

    let mut hint = vec![Line::from(Span::styled(
        if app.scout.is_pending() {
            "Searching database..."
        } else {
            "Press Enter to scout a player"
        },
        theme::dim_style(),
    ))];
    if let Some(error) = &app.scout_error {
        hint.push(Line::from(Span::styled(
            format!("Scout failed: {error}"),
            theme::error_style(),
        )));
    }
    f.render_widget(Paragraph::new(hint).alignment(Alignment::Center), hint_area);
}

fn render_encyclopedia(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let search = Paragraph::new(app.browse.search_input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Search name or nickname"),
    );
    f.render_widget(search, chunks[0]);

    let mut filters = Vec::new();
    for (key, field) in CYCLED_FILTERS {
        filters.push(Span::styled(format!("{key} "), theme::dim_style()));
        filters.push(Span::raw(format!(
            "{}: {}  ",
            field.label(),
            app.browse.query.filter(field)
        )));
    }
    f.render_widget(Paragraph::new(Line::from(filters)), chunks[1]);

    render_results(f, app, chunks[2]);

    let status = match &app.browse.error {
        Some(error) => Line::from(Span::styled(
            format!("{error} (press Ctrl+R to retry)"),
            theme::error_style(),
        )),
        None if app.browse.loading => Line::from(vec![
            Span::raw(app.browse.status_line()),
            Span::styled("  loading...", theme::dim_style()),
        ]),
        None => Line::from(app.browse.status_line()),
    };
    f.render_widget(Paragraph::new(status), chunks[3]);
}

fn render_results(f: &mut Frame, app: &App, area: Rect) {
    let rows = app.browse.rows().iter().map(|record| {
        Row::new([
            Cell::from(record.name.clone()),
            Cell::from(record.display_nickname().to_string()),
            Cell::from(Span::styled(
                record.position.clone(),
                theme::position_style(&record.position),
            )),
            Cell::from(Span::styled(
                record.element.clone(),
                theme::element_style(record.element_kind()),
            )),
            Cell::from(record.team.clone()),
        ])
    });

    let header = Row::new(["Name", "Nickname", "Pos", "Element", "Team"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(28),
            Constraint::Percentage(22),
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Characters"))
    .row_highlight_style(theme::selected_row_style());

    let mut state = TableState::default();
    if !app.browse.rows().is_empty() {
        state.select(Some(app.browse.selected));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(status) = &app.status {
        Span::styled(status.clone(), theme::error_style())
    } else if app.detail.is_some() {
        Span::styled("Esc close", theme::dim_style())
    } else {
        match app.view {
            ActiveView::Scout => Span::styled(
                "Enter/Space scout • Tab encyclopedia • Ctrl+C quit",
                theme::dim_style(),
            ),
            ActiveView::Encyclopedia => Span::styled(
                "Type to search • F1-F4 filters • ←/→ page • ↑/↓ select • Enter details • Ctrl+R retry • Tab scout",
                theme::dim_style(),
            ),
        }
    };
    f.render_widget(Paragraph::new(Line::from(text)), area);
}

fn render_detail(f: &mut Frame, record: &CharacterRecord, area: Rect) {
    let popup = centered_rect(64, 24, area);
    f.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(Span::styled(record.name.clone(), theme::title_style())),
        Line::from(Span::styled(
            format!("\"{}\"", record.display_nickname()),
            theme::dim_style(),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(record.position.clone(), theme::position_style(&record.position)),
            Span::raw("  "),
            Span::styled(
                record.element_kind().label(),
                theme::element_style(record.element_kind()),
            ),
            Span::raw(format!(
                "  {} {}  {}",
                record.gender_kind().symbol(),
                record.gender,
                record.team
            )),
        ]),
    ];

    let extras = [
        ("School year", record.school_year.as_deref()),
        ("Age group", record.age_group.as_deref()),
        ("Role", record.character_role.as_deref()),
    ];
    for (label, value) in extras {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            lines.push(Line::from(format!("{label}: {value}")));
        }
    }

    lines.push(Line::default());
    for (label, value) in record.stats.entries() {
        lines.push(Line::from(vec![
            Span::raw(format!("{label:<13}")),
            Span::styled(stat_bar(value), Style::default().fg(theme::ACCENT)),
            Span::raw(format!(" {value}")),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("{:<13}{}", "Total", record.stats.total()),
        Style::default().add_modifier(Modifier::BOLD),
    )));

    for (label, text) in [
        ("Description", record.description.as_deref()),
        ("How to obtain", record.how_to_obtain.as_deref()),
    ] {
        if let Some(text) = text.filter(|t| !t.trim().is_empty()) {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                label,
                Style::default().fg(theme::HIGHLIGHT),
            )));
            lines.push(Line::from(text.to_string()));
        }
    }

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .title("Character"),
        );
    f.render_widget(detail, popup);
}

/// Twenty-cell bar for a 0..=100 stat; out-of-range values are clamped.
fn stat_bar(value: i32) -> String {
    let filled = (value.clamp(0, 100) / 5) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
