//! Top-level rendering: nav bar, active page body, status line, overlay.
//!
//! Pure function of `&AppState`; all layout decisions live here, all state
//! decisions live in the reducer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::{admin, auth, chat, home, profile, quests, titles};
use crate::state::{AppState, NoticeKind, Page};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    if app.tui.session.is_none() {
        auth::render(frame, area, &app.tui.auth, app.tui.tasks.auth.is_running());
        render_status_line(app, frame, bottom_line(area));
        if let Some(overlay) = &app.overlay {
            overlay.render(frame, area);
        }
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_nav(app, frame, rows[0]);
    match app.tui.page {
        Page::Home => home::render(frame, rows[2], &app.tui),
        Page::Titles => titles::render(frame, rows[2], &app.tui),
        Page::Quests => quests::render(frame, rows[2], &app.tui),
        Page::Chat => chat::render(frame, rows[2], &app.tui),
        Page::Profile => profile::render(frame, rows[2], &app.tui),
        Page::Admin => admin::render(frame, rows[2], &app.tui),
    }
    render_status_line(app, frame, rows[3]);

    // Overlay draws last, on top of everything.
    if let Some(overlay) = &app.overlay {
        overlay.render(frame, rows[2]);
    }
}

fn bottom_line(area: Rect) -> Rect {
    Rect::new(
        area.x,
        area.y + area.height.saturating_sub(1),
        area.width,
        1,
    )
}

fn render_nav(app: &AppState, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    for page in Page::all() {
        if page == Page::Admin && !app.tui.is_admin() {
            continue;
        }
        if !spans.is_empty() {
            spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        }
        let style = if page == app.tui.page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(page.label(), style));
    }
    spans.push(Span::styled(
        format!("    {} ТК", app.tui.coins()),
        Style::default().fg(Color::Yellow),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    if let Some(notice) = &app.tui.notice {
        let color = match notice.kind {
            NoticeKind::Success => Color::Green,
            NoticeKind::Error => Color::Red,
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                notice.text.clone(),
                Style::default().fg(color),
            ))),
            area,
        );
        return;
    }

    let mut spans = Vec::new();
    if app.tui.tasks.is_any_running() {
        let glyph = SPINNER[usize::from(app.tui.spinner_frame) % SPINNER.len()];
        spans.push(Span::styled(
            format!("{glyph} "),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans.push(Span::styled(
        if app.tui.session.is_some() {
            "Tab страницы • Ctrl+C выход"
        } else {
            "Ctrl+C выход"
        },
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
