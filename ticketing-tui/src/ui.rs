use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{palette::tailwind, Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation},
    Frame,
};
use strum::IntoEnumIterator;
use ticketing_core::{
    form::Field,
    panel::{StatusKind, StatusMessage},
};

use crate::app::App;

const INFO_TEXT: &str = "(Esc/q) quit | (Tab/↑/↓) field | (0-9/⌫) edit | (Enter) submit | (s) start | (x) stop | (PgUp/PgDn) scroll logs";

/// Width of the longest form label plus a separator.
const LABEL_WIDTH: u16 = 32;

struct PanelColors {
    buffer_bg: Color,
    text_fg: Color,
    focused_fg: Color,
    disabled_fg: Color,
    start_fg: Color,
    stop_fg: Color,
    success_fg: Color,
    failure_fg: Color,
    info_fg: Color,
    border_color: Color,
}

impl PanelColors {
    fn new(color: &tailwind::Palette) -> Self {
        Self {
            buffer_bg: tailwind::SLATE.c950,
            text_fg: tailwind::SLATE.c200,
            focused_fg: color.c400,
            disabled_fg: tailwind::SLATE.c600,
            start_fg: tailwind::GREEN.c500,
            stop_fg: tailwind::RED.c500,
            success_fg: tailwind::GREEN.c400,
            failure_fg: tailwind::RED.c400,
            info_fg: color.c300,
            border_color: color.c400,
        }
    }
}

/// Renders the user interface widgets.
pub fn render(app: &mut App, frame: &mut Frame) {
    let colors = PanelColors::new(&tailwind::BLUE);
    let rectangles = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(Field::iter().count() as u16 + 2),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
    ])
    .split(frame.size());

    render_status(app, frame, rectangles[0], &colors);
    render_form(app, frame, rectangles[1], &colors);
    render_controls(app, frame, rectangles[2], &colors);
    render_logs(app, frame, rectangles[3], &colors);
    render_scrollbar(app, frame, rectangles[3]);
    render_footer(frame, rectangles[4], &colors);
}

fn block<'a>(title: impl Into<Line<'a>>, colors: &PanelColors) -> Block<'a> {
    let title: Line<'a> = title.into();
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::new().fg(colors.border_color))
        .border_type(BorderType::Rounded)
}

fn render_status(app: &App, frame: &mut Frame, area: Rect, colors: &PanelColors) {
    let line = match app.panel.status() {
        Some(StatusMessage { kind, text }) => {
            let fg = match kind {
                StatusKind::Success => colors.success_fg,
                StatusKind::Failure => colors.failure_fg,
                StatusKind::Info => colors.info_fg,
            };
            Line::from(Span::styled(text.as_str(), Style::new().fg(fg)))
        }
        None => Line::from(""),
    };
    let status = Paragraph::new(line)
        .centered()
        .bg(colors.buffer_bg)
        .block(block(" Ticket Management ", colors));
    frame.render_widget(status, area);
}

fn render_form(app: &App, frame: &mut Frame, area: Rect, colors: &PanelColors) {
    let form = &app.panel.form;
    let lines: Vec<Line> = Field::iter()
        .map(|field| {
            let focused = field == form.focused();
            let label_style = if focused {
                Style::new().fg(colors.focused_fg).add_modifier(Modifier::BOLD)
            } else {
                Style::new().fg(colors.text_fg)
            };
            Line::from(vec![
                Span::styled(
                    format!("{:<width$}", format!("{}:", field), width = LABEL_WIDTH as usize),
                    label_style,
                ),
                Span::styled(form.value(field).to_string(), Style::new().fg(colors.text_fg)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .bg(colors.buffer_bg)
        .block(block(" Configuration (Enter to submit) ", colors));
    frame.render_widget(paragraph, area);

    let row = Field::iter()
        .position(|field| field == form.focused())
        .unwrap_or(0) as u16;
    let column = LABEL_WIDTH + form.value(form.focused()).chars().count() as u16;
    frame.set_cursor(
        (area.x + 1 + column).min(area.right().saturating_sub(2)),
        area.y + 1 + row,
    );
}

fn render_controls(app: &App, frame: &mut Frame, area: Rect, colors: &PanelColors) {
    let session = app.panel.session();
    let button = |label: &'static str, enabled: bool, fg: Color| {
        if enabled {
            Span::styled(label, Style::new().fg(fg).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(label, Style::new().fg(colors.disabled_fg))
        }
    };

    let line = Line::from(vec![
        Span::styled("Available Tickets: ", Style::new().fg(colors.text_fg)),
        Span::styled(
            app.panel.available_tickets().to_string(),
            Style::new().fg(colors.focused_fg).add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        button("[ Start (s) ]", session.start_enabled(), colors.start_fg),
        Span::raw("  "),
        button("[ Stop (x) ]", session.stop_enabled(), colors.stop_fg),
        Span::raw("    "),
        Span::styled(format!("State: {}", session.state()), Style::new().fg(colors.text_fg)),
    ]);
    let controls = Paragraph::new(line)
        .bg(colors.buffer_bg)
        .block(block(" Simulation ", colors));
    frame.render_widget(controls, area);
}

fn render_logs(app: &mut App, frame: &mut Frame, area: Rect, colors: &PanelColors) {
    let log = app.panel.log();
    let height = area.height.saturating_sub(2) as usize;
    let max_offset = log.len().saturating_sub(height);

    let view = &mut app.log_view;
    view.max_offset = max_offset;
    view.offset = if view.follow {
        max_offset
    } else {
        view.offset.min(max_offset)
    };
    view.scroll_state = view
        .scroll_state
        .content_length(max_offset)
        .position(view.offset);

    let lines: Vec<Line> = log
        .iter()
        .skip(view.offset)
        .take(height)
        .map(|entry| Line::from(entry.to_string()))
        .collect();

    let title = match log.evicted() {
        0 => " Logs ".to_string(),
        dropped => format!(" Logs ({} older entries dropped) ", dropped),
    };
    let logs = Paragraph::new(lines)
        .style(Style::new().fg(colors.text_fg).bg(colors.buffer_bg))
        .block(block(title, colors));
    frame.render_widget(logs, area);
}

fn render_scrollbar(app: &mut App, frame: &mut Frame, area: Rect) {
    frame.render_stateful_widget(
        Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None),
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
        &mut app.log_view.scroll_state,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, colors: &PanelColors) {
    let info_footer = Paragraph::new(Line::from(INFO_TEXT))
        .style(Style::new().fg(colors.text_fg).bg(colors.buffer_bg))
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::new().fg(colors.border_color))
                .border_type(BorderType::Double),
        );
    frame.render_widget(info_footer, area);
}
