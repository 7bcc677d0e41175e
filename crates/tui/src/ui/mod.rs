pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use ledger::{Editor, LedgerState, LoadState};

use crate::ui::{components::hints, keymap::KeyContext, theme::Theme};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};

pub fn render(frame: &mut Frame<'_>, state: &LedgerState) {
    let theme = Theme::default();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    screens::transactions::render(frame, layout[0], state, &theme);
    render_editor(frame, layout[0], state, &theme);
    render_bottom_bar(frame, layout[1], state, &theme);
    components::toast::render(frame, layout[0], state.toast.as_ref(), &theme);
}

fn render_editor(frame: &mut Frame<'_>, area: Rect, state: &LedgerState, theme: &Theme) {
    match &state.editor {
        Editor::None => {}
        Editor::Category {
            transaction_id,
            cursor,
        } => {
            let current = state.store.get(transaction_id).map(|tx| tx.category);
            components::category_picker::render(frame, area, *cursor, current, theme);
        }
        Editor::Tags { popover, .. } => {
            components::tag_popover::render(frame, area, popover, state.store.vocabulary(), theme);
        }
        Editor::Comment { popup, .. } => {
            if let Some(buffer) = popup.buffer() {
                components::comment_popup::render(frame, area, buffer, theme);
            }
        }
    }
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &LedgerState, theme: &Theme) {
    let context = KeyContext::of(&state.editor);
    let mut parts = hints::hints_to_spans(&hints::for_context(context), theme);

    if context == KeyContext::Table {
        if !state.filters.is_default() {
            parts.push(Span::raw("  "));
            parts.push(Span::styled("0", Style::default().fg(theme.accent)));
            parts.push(Span::raw(" reset"));
        }
        if matches!(state.load, LoadState::Failed(_)) {
            parts.push(hints::hint_separator(theme));
            parts.push(Span::styled("r", Style::default().fg(theme.accent)));
            parts.push(Span::raw(" retry"));
        }
        parts.push(hints::hint_separator(theme));
        parts.push(Span::styled("q", Style::default().fg(theme.accent)));
        parts.push(Span::raw(" quit"));
    }

    let bar = Paragraph::new(Line::from(parts)).style(Style::default().fg(theme.text_muted));
    frame.render_widget(bar, area);
}
