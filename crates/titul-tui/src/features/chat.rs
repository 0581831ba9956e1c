//! Global chat view.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use titul_core::types::MAX_MESSAGE_LEN;

use crate::state::{ChatState, TuiState};

/// Appends a character to the input buffer, enforcing the server limit.
pub fn push_input_char(chat: &mut ChatState, c: char) {
    if chat.input.chars().count() < MAX_MESSAGE_LEN {
        chat.input.push(c);
    }
}

pub fn render(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    render_messages(frame, rows[0], tui);
    render_input(frame, rows[1], &tui.chat);
}

fn render_messages(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let chat = &tui.chat;
    if chat.messages.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Сообщений пока нет",
                Style::default().fg(Color::DarkGray),
            ))),
            area,
        );
        return;
    }

    let own_id = tui.session.as_ref().map(|s| s.id);
    let visible = area.height as usize;

    // Newest at the bottom; scroll_up counts messages hidden below.
    let total = chat.messages.len();
    let end = total.saturating_sub(chat.scroll_up);
    let start = end.saturating_sub(visible);

    let lines: Vec<Line> = chat.messages[start..end]
        .iter()
        .map(|message| {
            let name_color = if own_id == Some(message.user_id) {
                Color::Yellow
            } else {
                Color::Cyan
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ", message.time_short()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!("{}: ", message.username),
                    Style::default().fg(name_color),
                ),
                Span::raw(message.message.clone()),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_input(frame: &mut Frame, area: Rect, chat: &ChatState) {
    let used = chat.input.chars().count();
    let counter = format!(" {used}/{MAX_MESSAGE_LEN}");
    let input_width = (area.width as usize).saturating_sub(counter.len() + 3);

    let shown: String = if chat.input.chars().count() > input_width {
        chat.input
            .chars()
            .skip(used.saturating_sub(input_width))
            .collect()
    } else {
        chat.input.clone()
    };

    let counter_color = if used >= MAX_MESSAGE_LEN {
        Color::Red
    } else {
        Color::DarkGray
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::DarkGray)),
            Span::raw(shown),
            Span::styled("█", Style::default().fg(Color::Yellow)),
            Span::styled(counter, Style::default().fg(counter_color)),
        ])),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_stops_at_limit() {
        let mut chat = ChatState {
            input: "a".repeat(MAX_MESSAGE_LEN),
            ..ChatState::default()
        };
        push_input_char(&mut chat, 'b');
        assert_eq!(chat.input.chars().count(), MAX_MESSAGE_LEN);
        assert!(!chat.input.ends_with('b'));
    }

    #[test]
    fn input_accepts_below_limit() {
        let mut chat = ChatState::default();
        push_input_char(&mut chat, 'ж');
        assert_eq!(chat.input, "ж");
    }
}
