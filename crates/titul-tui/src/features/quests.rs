//! Quest list view with progress bars.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use titul_core::types::Quest;

use crate::state::TuiState;

const BAR_WIDTH: usize = 20;

fn progress_bar(quest: &Quest) -> String {
    let filled = (usize::from(quest.progress_percent()) * BAR_WIDTH) / 100;
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    )
}

pub fn render(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let Some(profile) = &tui.profile else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Загрузка заданий...",
                Style::default().fg(Color::DarkGray),
            ))),
            area,
        );
        return;
    };

    if profile.quests.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Заданий пока нет",
                Style::default().fg(Color::DarkGray),
            ))),
            area,
        );
        return;
    }

    let mut lines = Vec::new();
    for quest in &profile.quests {
        let name_style = if quest.completed {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(quest.title.clone(), name_style),
            Span::styled(
                format!("  +{} ТК", quest.reward),
                Style::default().fg(Color::Yellow),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled(
                progress_bar(quest),
                Style::default().fg(if quest.completed {
                    Color::Green
                } else {
                    Color::Cyan
                }),
            ),
            Span::styled(
                format!(" {}%  {}", quest.progress_percent(), quest.description),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::default());
    }

    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_is_full_at_completion() {
        let quest = Quest {
            id: 1,
            title: "x".to_string(),
            description: String::new(),
            reward: 10,
            progress: 100,
            completed: true,
        };
        assert_eq!(progress_bar(&quest), format!("[{}]", "█".repeat(BAR_WIDTH)));
    }

    #[test]
    fn bar_overflow_is_clamped() {
        let quest = Quest {
            id: 1,
            title: "x".to_string(),
            description: String::new(),
            reward: 10,
            progress: 250,
            completed: true,
        };
        assert_eq!(progress_bar(&quest), format!("[{}]", "█".repeat(BAR_WIDTH)));
    }
}
