use api_types::tag::Tag;
use ledger::{TagFocus, TagPopover, tag_color};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::ui::{
    components::{card::Card, centered_rect},
    theme::Theme,
};

const VISIBLE_TAGS: u16 = 8;

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    popover: &TagPopover,
    vocabulary: &[Tag],
    theme: &Theme,
) {
    let list_height = (vocabulary.len() as u16).clamp(1, VISIBLE_TAGS);
    let rect = centered_rect(36, list_height + 5, area);
    let card = Card::new(" Add tag ", theme).focused(true);
    let inner = card.inner(rect);
    frame.render_widget(Clear, rect);
    card.render_frame(frame, rect);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let input_focused = popover.focus == TagFocus::Input;
    let input_style = if input_focused {
        Style::default().fg(theme.text)
    } else {
        Style::default().fg(theme.dim)
    };
    let cursor = if input_focused { "▏" } else { "" };
    let input = Paragraph::new(Line::from(vec![
        Span::styled("# ", Style::default().fg(theme.accent)),
        Span::styled(popover.input.as_str(), input_style),
        Span::styled(cursor, Style::default().fg(theme.accent)),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(input, layout[0]);

    if vocabulary.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No tags yet", Style::default().fg(theme.dim))),
            layout[1],
        );
        return;
    }

    let items = vocabulary
        .iter()
        .map(|tag| {
            ListItem::new(Span::styled(
                format!("#{}", tag.name),
                Style::default().fg(theme.tag(tag_color(&tag.name))),
            ))
        })
        .collect::<Vec<_>>();
    let mut list = List::new(items);
    let mut state = ListState::default();
    if !input_focused {
        list = list
            .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED))
            .highlight_symbol("» ");
        state.select(Some(popover.cursor));
    }
    frame.render_stateful_widget(list, layout[1], &mut state);
}
