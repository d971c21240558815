//! TUI views and rendering

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{App, Mode};
use crate::sequence::StepKind;
use crate::session::Rosary;

/// Main render function
///
/// The rosary is re-derived from the session on every draw.
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    if !app.session().is_loaded() {
        let loading = Paragraph::new("Loading catalog...")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Rosary "));
        frame.render_widget(loading, chunks[1]);
        render_footer(app, frame, chunks[2]);
        return;
    }

    match app.session().render() {
        Ok(rosary) => {
            render_header(&rosary, frame, chunks[0]);
            render_steps(app, &rosary, frame, chunks[1]);
        }
        Err(e) => {
            let message = Paragraph::new(e.to_string())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Rosary "));
            frame.render_widget(message, chunks[1]);
        }
    }

    if app.mode == Mode::Help {
        render_help_overlay(frame, chunks[1]);
    }

    render_footer(app, frame, chunks[2]);
}

/// Render the header bar
fn render_header(rosary: &Rosary, frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            rosary.header(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!("{} {}", rosary.weekday, rosary.date),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(" │ "),
        Span::styled(rosary.language.clone(), Style::default().fg(Color::Green)),
    ])])
    .block(Block::default().borders(Borders::ALL).title(" Rosary "));

    frame.render_widget(header, area);
}

/// Render the step list and the focused step's text side by side
fn render_steps(app: &App, rosary: &Rosary, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let items: Vec<ListItem> = rosary
        .steps
        .iter()
        .map(|step| {
            let style = match step.kind {
                StepKind::Announcement => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                StepKind::Opening | StepKind::Closing => Style::default().fg(Color::Cyan),
                StepKind::Prayer => Style::default(),
            };
            ListItem::new(Line::from(Span::styled(step.title.clone(), style)))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Steps ({}/{}) ", app.session().focus() + 1, rosary.steps.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.session().focus()));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let (title, body) = match rosary.steps.get(app.session().focus()) {
        Some(step) => (step.title.clone(), step.text.clone().unwrap_or_default()),
        None => (String::new(), String::new()),
    };
    let text = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)));
    frame.render_widget(text, chunks[1]);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(Color::Cyan)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )]),
        Line::from(""),
        key("↓, n       ", "Next step"),
        key("↑, N       ", "Previous step"),
        key("g, Home    ", "First step"),
        key("G, End     ", "Last step"),
        Line::from(""),
        key("e, E       ", "English"),
        key("j, J       ", "Japanese"),
        key("l          ", "Next language in the catalog"),
        Line::from(""),
        key("?, F1      ", "Toggle help"),
        key("q, Esc     ", "Quit"),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(help, popup_area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let line = match &app.error_message {
        Some(message) => Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red))),
        None => Line::from(vec![
            Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
            Span::raw(" step  "),
            Span::styled("e/j", Style::default().fg(Color::Cyan)),
            Span::raw(" language  "),
            Span::styled("?", Style::default().fg(Color::Cyan)),
            Span::raw(" help  "),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]),
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}
