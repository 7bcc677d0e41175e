use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ledger::{Action, Editor, TagFocus};

/// What the keyboard is currently talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    Table,
    /// Category picker or the vocabulary list of the tag popover.
    Picker,
    /// Tag name input.
    TagInput,
    /// Multi-line comment popup.
    Comment,
}

impl KeyContext {
    pub fn of(editor: &Editor) -> Self {
        match editor {
            Editor::None => Self::Table,
            Editor::Category { .. } => Self::Picker,
            Editor::Tags { popover, .. } => match popover.focus {
                TagFocus::Input => Self::TagInput,
                TagFocus::Vocabulary => Self::Picker,
            },
            Editor::Comment { .. } => Self::Comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    Quit,
    Dispatch(Action),
    CycleAccount { forward: bool },
    CycleMonth { forward: bool },
    CycleCategory { forward: bool },
    None,
}

pub fn map_key(key: KeyEvent, context: KeyContext) -> AppAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return AppAction::Quit;
    }

    match context {
        KeyContext::Comment => match key.code {
            KeyCode::Char('s') if ctrl => AppAction::Dispatch(Action::SubmitEditor),
            KeyCode::Esc => AppAction::Dispatch(Action::CloseEditor),
            KeyCode::Enter => AppAction::Dispatch(Action::EditorNewline),
            KeyCode::Backspace => AppAction::Dispatch(Action::EditorBackspace),
            KeyCode::Char(ch) if !ctrl => AppAction::Dispatch(Action::EditorInput(ch)),
            _ => AppAction::None,
        },
        KeyContext::TagInput => match key.code {
            KeyCode::Esc => AppAction::Dispatch(Action::CloseEditor),
            KeyCode::Enter => AppAction::Dispatch(Action::SubmitEditor),
            KeyCode::Tab | KeyCode::Down => AppAction::Dispatch(Action::EditorToggleFocus),
            KeyCode::Backspace => AppAction::Dispatch(Action::EditorBackspace),
            KeyCode::Char(ch) if !ctrl => AppAction::Dispatch(Action::EditorInput(ch)),
            _ => AppAction::None,
        },
        KeyContext::Picker => match key.code {
            KeyCode::Esc => AppAction::Dispatch(Action::CloseEditor),
            KeyCode::Enter => AppAction::Dispatch(Action::SubmitEditor),
            KeyCode::Tab => AppAction::Dispatch(Action::EditorToggleFocus),
            KeyCode::Up | KeyCode::Char('k') => AppAction::Dispatch(Action::EditorUp),
            KeyCode::Down | KeyCode::Char('j') => AppAction::Dispatch(Action::EditorDown),
            _ => AppAction::None,
        },
        KeyContext::Table => match key.code {
            KeyCode::Char('q') => AppAction::Quit,
            KeyCode::Esc => AppAction::Dispatch(Action::DismissToast),
            KeyCode::Up | KeyCode::Char('k') => AppAction::Dispatch(Action::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => AppAction::Dispatch(Action::SelectNext),
            KeyCode::Char('x') => AppAction::Dispatch(Action::ToggleExpanded),
            KeyCode::Char('a') => AppAction::CycleAccount { forward: true },
            KeyCode::Char('A') => AppAction::CycleAccount { forward: false },
            KeyCode::Char('m') => AppAction::CycleMonth { forward: true },
            KeyCode::Char('M') => AppAction::CycleMonth { forward: false },
            KeyCode::Char('f') => AppAction::CycleCategory { forward: true },
            KeyCode::Char('F') => AppAction::CycleCategory { forward: false },
            KeyCode::Char('0') => AppAction::Dispatch(Action::ResetFilters),
            KeyCode::Char('c') => AppAction::Dispatch(Action::OpenCategoryPicker),
            KeyCode::Char('t') => AppAction::Dispatch(Action::OpenTagPopover),
            KeyCode::Char('n') => AppAction::Dispatch(Action::OpenCommentEditor),
            KeyCode::Char('r') => AppAction::Dispatch(Action::Retry),
            _ => AppAction::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn q_types_into_text_editors_but_quits_the_table() {
        assert_eq!(map_key(key(KeyCode::Char('q')), KeyContext::Table), AppAction::Quit);
        assert_eq!(
            map_key(key(KeyCode::Char('q')), KeyContext::TagInput),
            AppAction::Dispatch(Action::EditorInput('q'))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('q')), KeyContext::Comment),
            AppAction::Dispatch(Action::EditorInput('q'))
        );
    }

    #[test]
    fn comment_enter_is_newline_and_ctrl_s_submits() {
        assert_eq!(
            map_key(key(KeyCode::Enter), KeyContext::Comment),
            AppAction::Dispatch(Action::EditorNewline)
        );
        let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        assert_eq!(
            map_key(save, KeyContext::Comment),
            AppAction::Dispatch(Action::SubmitEditor)
        );
    }

    #[test]
    fn ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for context in [
            KeyContext::Table,
            KeyContext::Picker,
            KeyContext::TagInput,
            KeyContext::Comment,
        ] {
            assert_eq!(map_key(ctrl_c, context), AppAction::Quit);
        }
    }

    #[test]
    fn context_follows_tag_focus() {
        let mut editor = Editor::Tags {
            transaction_id: "t1".to_string(),
            popover: Default::default(),
        };
        assert_eq!(KeyContext::of(&editor), KeyContext::TagInput);
        if let Editor::Tags { popover, .. } = &mut editor {
            popover.focus = TagFocus::Vocabulary;
        }
        assert_eq!(KeyContext::of(&editor), KeyContext::Picker);
    }
}
