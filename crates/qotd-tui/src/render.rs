//! Rendering for the two views.
//!
//! The anonymous view shows the credential form (login or register); the
//! authenticated view shows the quote. Which one renders is derived purely
//! from session state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::state::{FocusField, FormMode, TuiState};

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

/// Renders the full frame from state.
pub fn render(state: &TuiState, frame: &mut Frame) {
    let area = frame.area();
    if state.session.authenticated() {
        render_quote_view(state, frame, area);
    } else {
        render_form_view(state, frame, area);
    }
}

fn spinner(state: &TuiState) -> &'static str {
    SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()]
}

/// Centers a popup of the given size within `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(area.x + x, area.y + y, width, height)
}

// ============================================================================
// Anonymous view (credential form)
// ============================================================================

fn render_form_view(state: &TuiState, frame: &mut Frame, area: Rect) {
    let popup = centered(area, 48, 12);
    frame.render_widget(Clear, popup);

    let title = match state.form.mode {
        FormMode::Login => " Sign in ",
        FormMode::Register => " Register ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, popup);

    let inner = Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    );

    let field_style = |focused: bool| {
        if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        }
    };
    let username_focused = state.form.focus == FocusField::Username;
    let masked: String = "•".repeat(state.form.password.chars().count());

    let mut lines = vec![
        Line::from(Span::styled("Quote of the Day", Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("username ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}{}", state.form.username, cursor(username_focused)),
                field_style(username_focused),
            ),
        ]),
        Line::from(vec![
            Span::styled("password ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}{}", masked, cursor(!username_focused)),
                field_style(!username_focused),
            ),
        ]),
        Line::from(""),
    ];

    if state.pending.login || state.pending.register {
        let verb = match state.form.mode {
            FormMode::Login => "signing in",
            FormMode::Register => "registering",
        };
        lines.push(Line::from(Span::styled(
            format!("{} {verb}...", spinner(state)),
            Style::default().fg(Color::Yellow),
        )));
    } else if !state.error.is_empty() {
        lines.push(Line::from(Span::styled(
            state.error.as_str(),
            Style::default().fg(Color::Red),
        )));
    } else if !state.notice.is_empty() {
        lines.push(Line::from(Span::styled(
            state.notice.as_str(),
            Style::default().fg(Color::Green),
        )));
    } else {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    let toggle_hint = match state.form.mode {
        FormMode::Login => "Ctrl+T register",
        FormMode::Register => "Ctrl+T sign in",
    };
    lines.push(Line::from(Span::styled(
        format!("Enter submit · Tab field · {toggle_hint} · Esc quit"),
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn cursor(focused: bool) -> &'static str {
    if focused { "█" } else { "" }
}

// ============================================================================
// Authenticated view (quote)
// ============================================================================

fn render_quote_view(state: &TuiState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Quote of the Day ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);

    let inner = Rect::new(
        area.x + 2,
        area.y + 2,
        area.width.saturating_sub(4),
        area.height.saturating_sub(4),
    );

    let mut lines: Vec<Line> = Vec::new();

    if state.pending.fetch {
        lines.push(Line::from(Span::styled(
            format!("{} thinking...", spinner(state)),
            Style::default().fg(Color::Yellow),
        )));
        lines.push(Line::from(""));
    }

    // Error and quote are mutually exclusive; the reducer guarantees at
    // most one is non-empty.
    if !state.error.is_empty() {
        lines.push(Line::from(Span::styled(
            state.error.as_str(),
            Style::default().fg(Color::Red),
        )));
    } else if !state.quote.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("“{}”", state.quote),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::ITALIC),
        )));
    } else if !state.pending.fetch {
        lines.push(Line::from(Span::styled(
            "Press n for a quote.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "n new quote · l logout · q quit",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
