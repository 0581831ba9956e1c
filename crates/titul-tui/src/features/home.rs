//! Home view: greeting and account summary.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::titles::title_color;
use crate::state::TuiState;

pub fn render(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let Some(session) = &tui.session else {
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Добро пожаловать, "),
            Span::styled(
                session.username.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("!"),
        ]),
        Line::default(),
        Line::from(vec![
            Span::styled("Баланс: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} ТитулКоинов", tui.coins()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
    ];

    if let Some(profile) = &tui.profile {
        let owned: Vec<_> = profile.titles.iter().filter(|t| t.owned).collect();
        lines.push(Line::from(vec![
            Span::styled("Титулы: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{} из {}", owned.len(), profile.titles.len())),
        ]));
        let mut spans = Vec::new();
        for title in owned {
            if !spans.is_empty() {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                title.name.clone(),
                Style::default().fg(title_color(&title.color)),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Серия входов: ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{} дн.", profile.daily_streak)),
            if profile.can_claim_daily {
                Span::styled(
                    "  — награда доступна (Профиль, клавиша d)",
                    Style::default().fg(Color::Green),
                )
            } else {
                Span::raw("")
            },
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "Загрузка профиля...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
