//! Title catalog view.
//!
//! Owned titles show their name in the server-supplied color tag; unowned
//! ones are masked until purchased, only the price is visible.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};
use titul_core::types::Title;

use crate::state::TuiState;

/// Maps the backend's CSS color tags to terminal colors.
pub fn title_color(tag: &str) -> Color {
    match tag {
        "text-gray-400" => Color::Gray,
        "text-yellow-400" => Color::Yellow,
        "text-green-400" => Color::Green,
        "text-blue-400" => Color::Blue,
        "text-cyan-400" => Color::Cyan,
        "text-purple-400" => Color::Magenta,
        "text-pink-400" => Color::LightMagenta,
        "text-red-500" => Color::Red,
        "text-orange-400" => Color::LightRed,
        _ => Color::White,
    }
}

/// Display name for a catalog entry: masked until owned.
pub fn display_name(title: &Title) -> String {
    if title.owned {
        title.name.clone()
    } else {
        "████████".to_string()
    }
}

pub fn render(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let Some(profile) = &tui.profile else {
        frame.render_widget(
            Line::from(Span::styled(
                "Загрузка титулов...",
                Style::default().fg(Color::DarkGray),
            )),
            area,
        );
        return;
    };

    let items: Vec<ListItem> = profile
        .titles
        .iter()
        .map(|title| {
            let mut spans = vec![Span::styled(
                format!("{:<14}", display_name(title)),
                Style::default().fg(if title.owned {
                    title_color(&title.color)
                } else {
                    Color::DarkGray
                }),
            )];
            if title.owned {
                if title.is_starter() {
                    spans.push(Span::styled(
                        "  стартовый",
                        Style::default().fg(Color::DarkGray),
                    ));
                } else {
                    spans.push(Span::styled(
                        format!("  продажа: {} ТК", title.sell_price()),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            } else {
                spans.push(Span::styled(
                    format!("  цена: {} ТК", title.price),
                    Style::default().fg(Color::Gray),
                ));
            }
            if title.is_limited {
                spans.push(Span::styled(
                    "  [лимит]",
                    Style::default().fg(Color::LightRed),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .bg(Color::Rgb(40, 40, 40)),
    );
    let mut list_state = ListState::default();
    list_state.select(Some(tui.shop.cursor.min(profile.titles.len().saturating_sub(1))));
    frame.render_stateful_widget(list, area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(owned: bool) -> Title {
        Title {
            id: 2,
            name: "[VIP]".to_string(),
            price: 500,
            color: "text-yellow-400".to_string(),
            is_limited: false,
            owned,
        }
    }

    #[test]
    fn known_tags_map_to_colors() {
        assert_eq!(title_color("text-yellow-400"), Color::Yellow);
        assert_eq!(title_color("text-purple-400"), Color::Magenta);
    }

    #[test]
    fn unknown_tag_falls_back_to_white() {
        assert_eq!(title_color("text-chartreuse-900"), Color::White);
    }

    #[test]
    fn unowned_titles_are_masked() {
        assert_eq!(display_name(&title(false)), "████████");
        assert_eq!(display_name(&title(true)), "[VIP]");
    }
}
