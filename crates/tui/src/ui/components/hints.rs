use ratatui::{style::Style, text::Span};

use crate::ui::{keymap::KeyContext, theme::Theme};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hints for whatever currently owns the keyboard.
pub fn for_context(context: KeyContext) -> Vec<KeyHint> {
    match context {
        KeyContext::Table => vec![
            KeyHint::new("↑↓", "select"),
            KeyHint::new("c", "category"),
            KeyHint::new("t", "tag"),
            KeyHint::new("n", "comment"),
            KeyHint::new("a/m/f", "filter"),
            KeyHint::new("x", "collapse"),
        ],
        KeyContext::Picker => vec![
            KeyHint::new("↑↓", "move"),
            KeyHint::new("Enter", "pick"),
            KeyHint::new("Esc", "cancel"),
        ],
        KeyContext::TagInput => vec![
            KeyHint::new("Enter", "add"),
            KeyHint::new("Tab", "existing"),
            KeyHint::new("Esc", "cancel"),
        ],
        KeyContext::Comment => vec![
            KeyHint::new("Ctrl+S", "save"),
            KeyHint::new("Enter", "newline"),
            KeyHint::new("Esc", "cancel"),
        ],
    }
}
