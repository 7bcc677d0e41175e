use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::ui::{
    components::{card::Card, centered_rect},
    theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, buffer: &str, theme: &Theme) {
    let rect = centered_rect(60, 12, area);
    let card = Card::new(" Comment ", theme).focused(true);

    let mut lines: Vec<Line<'_>> = buffer
        .split('\n')
        .map(|line| Line::from(Span::styled(line, Style::default().fg(theme.text))))
        .collect();
    if let Some(last) = lines.last_mut() {
        last.push_span(Span::styled("▏", Style::default().fg(theme.accent)));
    }

    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    frame.render_widget(Clear, rect);
    card.render_with(frame, rect, paragraph);
}
