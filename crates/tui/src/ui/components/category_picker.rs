use api_types::transaction::Category;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState},
};

use crate::ui::{
    components::{card::Card, centered_rect},
    theme::Theme,
};

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    cursor: usize,
    current: Option<Category>,
    theme: &Theme,
) {
    let rect = centered_rect(28, Category::ALL.len() as u16 + 2, area);

    let items = Category::ALL
        .iter()
        .map(|category| {
            let marker = if Some(*category) == current { " •" } else { "" };
            ListItem::new(Line::from(vec![
                Span::styled(
                    category.as_str(),
                    Style::default().fg(theme.category(*category)),
                ),
                Span::styled(marker, Style::default().fg(theme.dim)),
            ]))
        })
        .collect::<Vec<_>>();

    let card = Card::new(" Category ", theme).focused(true);
    let list = List::new(items)
        .block(card.block())
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
        .highlight_symbol("» ");
    let mut state = ListState::default().with_selected(Some(cursor));

    frame.render_widget(Clear, rect);
    frame.render_stateful_widget(list, rect, &mut state);
}
