use api_types::{
    account::Account,
    tag::Tag,
    transaction::{Category, Transaction},
};

use crate::{
    editor::{Editor, TagFocus, TagPopover},
    filter::{Filters, MonthKey, Selection, filtered},
    popup::CommentPopup,
    store::Store,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterChange {
    Account(Selection<String>),
    Month(Selection<MonthKey>),
    Category(Selection<Category>),
}

/// Why adding a tag failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagFailure {
    /// The backend answered with an error; carries its response text.
    Rejected(String),
    /// The request never produced a usable answer.
    Unreachable,
}

/// Inputs to [`LedgerState::dispatch`]: user intents and request outcomes.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    LedgerLoaded {
        transactions: Vec<Transaction>,
        accounts: Vec<Account>,
    },
    LoadFailed(String),
    Retry,
    VocabularyLoaded(Vec<Tag>),
    VocabularyLoadFailed(String),

    FilterChanged(FilterChange),
    ResetFilters,
    ToggleExpanded,
    SelectNext,
    SelectPrev,

    OpenCategoryPicker,
    OpenTagPopover,
    OpenCommentEditor,
    CloseEditor,
    EditorInput(char),
    EditorNewline,
    EditorBackspace,
    EditorUp,
    EditorDown,
    EditorToggleFocus,
    SubmitEditor,

    ChangeCategory {
        transaction_id: String,
        category: Category,
    },
    AddTag {
        transaction_id: String,
        name: String,
    },
    AttachTag {
        transaction_id: String,
        tag: Tag,
    },
    UpdateComment {
        transaction_id: String,
        comment: String,
    },

    CategoryUpdated {
        transaction_id: String,
        category: Category,
    },
    CategoryUpdateFailed(String),
    TagCreated(Tag),
    TagAdded {
        transaction_id: String,
        tag: Tag,
    },
    TagAddFailed(TagFailure),
    CommentSaved {
        transaction_id: String,
        transaction: Transaction,
    },
    CommentSaveFailed(String),
    DismissToast,
}

/// Side effects requested by the reducer. Each one is a backend call whose
/// outcome comes back as an [`Action`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `GET /api/transactions` and `GET /api/accounts`, concurrently.
    LoadLedger,
    /// `GET /api/tags`.
    LoadVocabulary,
    UpdateCategory {
        transaction_id: String,
        category: Category,
    },
    /// Create the tag, then associate it.
    CreateTag {
        transaction_id: String,
        name: String,
    },
    /// Associate a tag that already exists.
    AttachTag {
        transaction_id: String,
        tag: Tag,
    },
    UpdateComment {
        transaction_id: String,
        comment: String,
    },
}

/// Everything the transactions table shows, driven by [`Action`]s.
#[derive(Clone, Debug)]
pub struct LedgerState {
    pub load: LoadState,
    pub store: Store,
    pub filters: Filters,
    pub expanded: bool,
    pub selected: usize,
    pub editor: Editor,
    pub toast: Option<Toast>,
    /// Bumped every time a toast is shown, even one equal to the last.
    pub toasts_shown: u64,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            load: LoadState::Loading,
            store: Store::default(),
            filters: Filters::default(),
            expanded: true,
            selected: 0,
            editor: Editor::None,
            toast: None,
            toasts_shown: 0,
        }
    }
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests issued when the view mounts.
    pub fn initial_commands() -> Vec<Command> {
        vec![Command::LoadLedger, Command::LoadVocabulary]
    }

    pub fn filtered(&self) -> Vec<&Transaction> {
        filtered(&self.store, &self.filters)
    }

    pub fn selected_transaction(&self) -> Option<&Transaction> {
        self.filtered().get(self.selected).copied()
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Command> {
        match action {
            Action::LedgerLoaded {
                transactions,
                accounts,
            } => {
                self.store.load(transactions, accounts);
                self.load = LoadState::Ready;
                self.clamp_selection();
            }
            Action::LoadFailed(message) => {
                tracing::error!("failed to load transactions: {message}");
                self.load = LoadState::Failed(message);
            }
            Action::Retry => {
                if matches!(self.load, LoadState::Failed(_)) {
                    self.load = LoadState::Loading;
                    self.editor = Editor::None;
                    return vec![Command::LoadLedger];
                }
            }
            Action::VocabularyLoaded(tags) => self.store.merge_vocabulary(tags),
            Action::VocabularyLoadFailed(message) => {
                tracing::warn!("tag vocabulary unavailable: {message}");
            }

            Action::FilterChanged(change) => {
                match change {
                    FilterChange::Account(sel) => self.filters.account = sel,
                    FilterChange::Month(sel) => self.filters.month = sel,
                    FilterChange::Category(sel) => self.filters.category = sel,
                }
                self.clamp_selection();
            }
            Action::ResetFilters => {
                self.filters = Filters::default();
                self.clamp_selection();
            }
            Action::ToggleExpanded => self.expanded = !self.expanded,
            Action::SelectNext => {
                let len = self.filtered().len();
                if len > 0 {
                    self.selected = (self.selected + 1).min(len - 1);
                }
            }
            Action::SelectPrev => self.selected = self.selected.saturating_sub(1),

            Action::OpenCategoryPicker => self.open_category_picker(),
            Action::OpenTagPopover => {
                if let Some(id) = self.editable_id() {
                    self.editor = Editor::Tags {
                        transaction_id: id,
                        popover: TagPopover::default(),
                    };
                }
            }
            Action::OpenCommentEditor => self.open_comment_editor(),
            Action::CloseEditor => self.editor = Editor::None,
            Action::EditorInput(ch) => self.editor_input(ch),
            Action::EditorNewline => {
                if let Editor::Comment { popup, .. } = &mut self.editor {
                    popup.newline();
                }
            }
            Action::EditorBackspace => match &mut self.editor {
                Editor::Tags { popover, .. } if popover.focus == TagFocus::Input => {
                    popover.input.pop();
                }
                Editor::Comment { popup, .. } => popup.backspace(),
                _ => {}
            },
            Action::EditorUp => self.move_editor_cursor(false),
            Action::EditorDown => self.move_editor_cursor(true),
            Action::EditorToggleFocus => {
                if let Editor::Tags { popover, .. } = &mut self.editor {
                    popover.focus = match popover.focus {
                        TagFocus::Input => TagFocus::Vocabulary,
                        TagFocus::Vocabulary => TagFocus::Input,
                    };
                }
            }
            Action::SubmitEditor => return self.submit_editor(),

            Action::ChangeCategory {
                transaction_id,
                category,
            } => return self.change_category(transaction_id, category),
            Action::AddTag {
                transaction_id,
                name,
            } => return self.add_tag(transaction_id, &name),
            Action::AttachTag {
                transaction_id,
                tag,
            } => {
                return vec![Command::AttachTag {
                    transaction_id,
                    tag,
                }];
            }
            Action::UpdateComment {
                transaction_id,
                comment,
            } => return self.update_comment(transaction_id, comment),

            Action::CategoryUpdated {
                transaction_id,
                category,
            } => {
                self.store.set_category(&transaction_id, category);
                self.clamp_selection();
                self.show(Toast::success("Category updated"));
            }
            Action::CategoryUpdateFailed(_) => {
                self.show(Toast::error("Failed to update category"));
            }
            Action::TagCreated(tag) => self.store.merge_tag(tag),
            Action::TagAdded {
                transaction_id,
                tag,
            } => {
                self.store.attach_tag(&transaction_id, tag.clone());
                self.store.merge_tag(tag);
                if matches!(&self.editor, Editor::Tags { transaction_id: open, .. } if *open == transaction_id)
                {
                    self.editor = Editor::None;
                }
                self.show(Toast::success("Tag added successfully"));
            }
            Action::TagAddFailed(failure) => {
                let message = match failure {
                    TagFailure::Rejected(text) => format!("Failed to add tag: {text}"),
                    TagFailure::Unreachable => "Error adding tag".to_string(),
                };
                self.show(Toast::error(message));
            }
            Action::CommentSaved {
                transaction_id,
                transaction,
            } => {
                self.store.replace(&transaction_id, transaction);
                self.clamp_selection();
                self.show(Toast::success("Comment updated successfully"));
            }
            Action::CommentSaveFailed(_) => {
                self.show(Toast::error("Failed to update comment"));
            }
            Action::DismissToast => self.toast = None,
        }
        Vec::new()
    }

    /// `PATCH` the category. Local state changes only once it succeeds.
    fn change_category(&self, transaction_id: String, category: Category) -> Vec<Command> {
        vec![Command::UpdateCategory {
            transaction_id,
            category,
        }]
    }

    /// Adds a tag by name. Blank names are dropped without a request; names
    /// already in the vocabulary are associated, never re-created.
    fn add_tag(&self, transaction_id: String, name: &str) -> Vec<Command> {
        let name = name.trim();
        if name.is_empty() {
            return Vec::new();
        }
        match self.store.find_tag(name) {
            Some(tag) => vec![Command::AttachTag {
                transaction_id,
                tag: tag.clone(),
            }],
            None => vec![Command::CreateTag {
                transaction_id,
                name: name.to_string(),
            }],
        }
    }

    fn update_comment(&self, transaction_id: String, comment: String) -> Vec<Command> {
        vec![Command::UpdateComment {
            transaction_id,
            comment,
        }]
    }

    fn show(&mut self, toast: Toast) {
        self.toast = Some(toast);
        self.toasts_shown += 1;
    }

    fn editable_id(&self) -> Option<String> {
        if self.load != LoadState::Ready {
            return None;
        }
        self.selected_transaction().map(|tx| tx.id.clone())
    }

    fn open_category_picker(&mut self) {
        let Some(id) = self.editable_id() else {
            return;
        };
        let cursor = self
            .store
            .get(&id)
            .and_then(|tx| Category::ALL.iter().position(|c| *c == tx.category))
            .unwrap_or(0);
        self.editor = Editor::Category {
            transaction_id: id,
            cursor,
        };
    }

    fn open_comment_editor(&mut self) {
        let Some(id) = self.editable_id() else {
            return;
        };
        let seed = self.store.get(&id).and_then(|tx| tx.comment.as_deref());
        self.editor = Editor::Comment {
            popup: CommentPopup::open(seed),
            transaction_id: id,
        };
    }

    fn editor_input(&mut self, ch: char) {
        match &mut self.editor {
            Editor::Tags { popover, .. } if popover.focus == TagFocus::Input => {
                popover.input.push(ch);
            }
            Editor::Comment { popup, .. } => popup.insert(ch),
            _ => {}
        }
    }

    fn move_editor_cursor(&mut self, down: bool) {
        let vocabulary_len = self.store.vocabulary().len();
        let (cursor, len) = match &mut self.editor {
            Editor::Category { cursor, .. } => (cursor, Category::ALL.len()),
            Editor::Tags { popover, .. } if popover.focus == TagFocus::Vocabulary => {
                (&mut popover.cursor, vocabulary_len)
            }
            _ => return,
        };
        if len == 0 {
            return;
        }
        *cursor = if down {
            (*cursor + 1).min(len - 1)
        } else {
            cursor.saturating_sub(1)
        };
    }

    fn submit_editor(&mut self) -> Vec<Command> {
        match std::mem::take(&mut self.editor) {
            Editor::None => Vec::new(),
            Editor::Category {
                transaction_id,
                cursor,
            } => match Category::ALL.get(cursor) {
                Some(category) => self.change_category(transaction_id, *category),
                None => Vec::new(),
            },
            Editor::Tags {
                transaction_id,
                popover,
            } => {
                let commands = match popover.focus {
                    TagFocus::Input => self.add_tag(transaction_id.clone(), &popover.input),
                    TagFocus::Vocabulary => match self.store.vocabulary().get(popover.cursor) {
                        Some(tag) => vec![Command::AttachTag {
                            transaction_id: transaction_id.clone(),
                            tag: tag.clone(),
                        }],
                        None => Vec::new(),
                    },
                };
                // The popover stays up until the backend confirms.
                self.editor = Editor::Tags {
                    transaction_id,
                    popover,
                };
                commands
            }
            Editor::Comment {
                transaction_id,
                mut popup,
            } => match popup.submit() {
                Some(comment) => self.update_comment(transaction_id, comment),
                None => Vec::new(),
            },
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use api_types::transaction::Category;

    use super::*;
    use crate::store::fixtures::*;

    fn ready() -> LedgerState {
        let mut state = LedgerState::new();
        let mut t2 = tx("t2", (2024, 3, 20), "a2", Category::Income);
        t2.comment = Some("first".to_string());
        state.dispatch(Action::LedgerLoaded {
            transactions: vec![tx("t1", (2024, 3, 15), "a1", Category::Expense), t2],
            accounts: vec![account("a1", "Checking"), account("a2", "Savings")],
        });
        state.dispatch(Action::VocabularyLoaded(vec![tag("g1", "food")]));
        state
    }

    fn snapshot(state: &LedgerState) -> Vec<Transaction> {
        state.store.transactions().cloned().collect()
    }

    #[test]
    fn starts_loading_and_asks_for_both_loads() {
        let state = LedgerState::new();
        assert_eq!(state.load, LoadState::Loading);
        assert!(state.expanded);
        assert_eq!(
            LedgerState::initial_commands(),
            vec![Command::LoadLedger, Command::LoadVocabulary]
        );
    }

    #[test]
    fn empty_load_is_ready_not_failed() {
        let mut state = LedgerState::new();
        state.dispatch(Action::LedgerLoaded {
            transactions: Vec::new(),
            accounts: Vec::new(),
        });
        assert_eq!(state.load, LoadState::Ready);
        assert!(state.filtered().is_empty());
        assert!(state.selected_transaction().is_none());
    }

    #[test]
    fn load_failure_can_be_retried() {
        let mut state = LedgerState::new();
        state.dispatch(Action::LoadFailed("connection refused".to_string()));
        assert_eq!(state.load, LoadState::Failed("connection refused".to_string()));
        assert_eq!(state.dispatch(Action::Retry), vec![Command::LoadLedger]);
        assert_eq!(state.load, LoadState::Loading);
        assert!(state.dispatch(Action::Retry).is_empty());
    }

    #[test]
    fn retry_on_a_loaded_table_does_nothing() {
        let mut state = ready();
        state.dispatch(Action::OpenCommentEditor);
        let editor = state.editor.clone();
        let before = snapshot(&state);

        assert!(state.dispatch(Action::Retry).is_empty());
        assert_eq!(state.load, LoadState::Ready);
        assert_eq!(state.editor, editor);
        assert_eq!(snapshot(&state), before);
    }

    #[test]
    fn repeated_toasts_are_counted() {
        let mut state = ready();
        for _ in 0..2 {
            state.dispatch(Action::CategoryUpdated {
                transaction_id: "t1".to_string(),
                category: Category::Asset,
            });
        }
        assert_eq!(state.toasts_shown, 2);
        state.dispatch(Action::DismissToast);
        assert_eq!(state.toast, None);
        assert_eq!(state.toasts_shown, 2);
    }

    #[test]
    fn blank_tag_is_a_no_op() {
        let mut state = ready();
        state.dispatch(Action::OpenTagPopover);
        for ch in "   ".chars() {
            state.dispatch(Action::EditorInput(ch));
        }
        let before_editor = state.editor.clone();
        let before = snapshot(&state);

        assert!(state.dispatch(Action::SubmitEditor).is_empty());
        assert!(
            state
                .dispatch(Action::AddTag {
                    transaction_id: "t1".to_string(),
                    name: "\t \n".to_string(),
                })
                .is_empty()
        );
        assert_eq!(state.editor, before_editor);
        assert_eq!(snapshot(&state), before);
        assert_eq!(state.toast, None);
    }

    #[test]
    fn new_tag_is_created_and_known_tag_is_only_attached() {
        let mut state = ready();
        let create = state.dispatch(Action::AddTag {
            transaction_id: "t1".to_string(),
            name: "  travel ".to_string(),
        });
        assert_eq!(
            create,
            vec![Command::CreateTag {
                transaction_id: "t1".to_string(),
                name: "travel".to_string(),
            }]
        );

        let attach = state.dispatch(Action::AddTag {
            transaction_id: "t1".to_string(),
            name: "food".to_string(),
        });
        assert_eq!(
            attach,
            vec![Command::AttachTag {
                transaction_id: "t1".to_string(),
                tag: tag("g1", "food"),
            }]
        );
    }

    #[test]
    fn picking_from_vocabulary_attaches_existing_tag() {
        let mut state = ready();
        state.dispatch(Action::OpenTagPopover);
        state.dispatch(Action::EditorToggleFocus);
        state.dispatch(Action::EditorInput('z'));
        let commands = state.dispatch(Action::SubmitEditor);
        assert_eq!(
            commands,
            vec![Command::AttachTag {
                transaction_id: "t1".to_string(),
                tag: tag("g1", "food"),
            }]
        );
        assert!(matches!(state.editor, Editor::Tags { .. }));
    }

    #[test]
    fn tag_added_updates_row_vocabulary_and_closes_popover() {
        let mut state = ready();
        state.dispatch(Action::OpenTagPopover);
        state.dispatch(Action::EditorInput('x'));
        state.dispatch(Action::TagAdded {
            transaction_id: "t1".to_string(),
            tag: tag("g9", "travel"),
        });

        assert_eq!(state.editor, Editor::None);
        assert_eq!(state.store.get("t1").unwrap().tags, vec![tag("g9", "travel")]);
        let names: Vec<_> = state.store.vocabulary().iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, ["food", "travel"]);
        assert_eq!(state.toast.as_ref().unwrap().level, ToastLevel::Success);
    }

    #[test]
    fn tag_failure_reports_server_text_and_changes_nothing() {
        let mut state = ready();
        let before = snapshot(&state);
        state.dispatch(Action::TagAddFailed(TagFailure::Rejected(
            "Tag already exists".to_string(),
        )));
        assert_eq!(
            state.toast,
            Some(Toast::error("Failed to add tag: Tag already exists"))
        );
        state.dispatch(Action::TagAddFailed(TagFailure::Unreachable));
        assert_eq!(state.toast, Some(Toast::error("Error adding tag")));
        assert_eq!(snapshot(&state), before);
        assert_eq!(state.store.vocabulary().len(), 1);
    }

    #[test]
    fn category_update_touches_only_that_field() {
        let mut state = ready();
        let before = snapshot(&state);
        state.dispatch(Action::CategoryUpdated {
            transaction_id: "t1".to_string(),
            category: Category::Asset,
        });
        let after = snapshot(&state);

        let mut expected = before[0].clone();
        expected.category = Category::Asset;
        assert_eq!(after[0], expected);
        assert_eq!(after[1], before[1]);
        assert_eq!(state.toast, Some(Toast::success("Category updated")));
    }

    #[test]
    fn category_failure_leaves_state() {
        let mut state = ready();
        let before = snapshot(&state);
        state.dispatch(Action::CategoryUpdateFailed("500".to_string()));
        assert_eq!(snapshot(&state), before);
        assert_eq!(state.toast, Some(Toast::error("Failed to update category")));
    }

    #[test]
    fn category_picker_starts_on_current_and_submits() {
        let mut state = ready();
        state.dispatch(Action::OpenCategoryPicker);
        assert_eq!(
            state.editor,
            Editor::Category {
                transaction_id: "t1".to_string(),
                cursor: 1,
            }
        );
        state.dispatch(Action::EditorDown);
        let commands = state.dispatch(Action::SubmitEditor);
        assert_eq!(
            commands,
            vec![Command::UpdateCategory {
                transaction_id: "t1".to_string(),
                category: Category::Asset,
            }]
        );
        assert_eq!(state.editor, Editor::None);
        assert_eq!(state.store.get("t1").unwrap().category, Category::Expense);
    }

    #[test]
    fn comment_saved_replaces_whole_record() {
        let mut state = ready();
        let mut server = tx("t1", (2024, 3, 16), "a2", Category::Liability);
        server.comment = Some("Paid in full.".to_string());
        server.description = "normalized".to_string();
        state.dispatch(Action::CommentSaved {
            transaction_id: "t1".to_string(),
            transaction: server.clone(),
        });
        assert_eq!(state.store.get("t1"), Some(&server));
        assert_eq!(state.toast, Some(Toast::success("Comment updated successfully")));
    }

    #[test]
    fn comment_editor_seeds_from_current_comment_and_closes_on_submit() {
        let mut state = ready();
        state.dispatch(Action::SelectNext);
        state.dispatch(Action::OpenCommentEditor);
        match &state.editor {
            Editor::Comment { transaction_id, popup } => {
                assert_eq!(transaction_id, "t2");
                assert_eq!(popup.buffer(), Some("first"));
            }
            other => panic!("unexpected editor {other:?}"),
        }
        state.dispatch(Action::EditorInput('!'));
        let commands = state.dispatch(Action::SubmitEditor);
        assert_eq!(
            commands,
            vec![Command::UpdateComment {
                transaction_id: "t2".to_string(),
                comment: "first!".to_string(),
            }]
        );
        assert_eq!(state.editor, Editor::None);
    }

    #[test]
    fn cancelled_comment_issues_nothing() {
        let mut state = ready();
        state.dispatch(Action::OpenCommentEditor);
        state.dispatch(Action::EditorInput('a'));
        assert!(state.dispatch(Action::CloseEditor).is_empty());
        assert_eq!(state.editor, Editor::None);
        assert!(state.dispatch(Action::SubmitEditor).is_empty());
    }

    #[test]
    fn only_one_editor_is_open_at_a_time() {
        let mut state = ready();
        state.dispatch(Action::OpenCommentEditor);
        state.dispatch(Action::SelectNext);
        state.dispatch(Action::OpenTagPopover);
        assert!(matches!(state.editor, Editor::Tags { .. }));
        assert!(matches!(
            &state.editor,
            Editor::Tags { transaction_id, .. } if transaction_id == "t2"
        ));
    }

    #[test]
    fn editors_need_a_loaded_row() {
        let mut state = LedgerState::new();
        state.dispatch(Action::OpenCommentEditor);
        state.dispatch(Action::OpenTagPopover);
        state.dispatch(Action::OpenCategoryPicker);
        assert_eq!(state.editor, Editor::None);
    }

    #[test]
    fn filter_change_clamps_selection() {
        let mut state = ready();
        state.dispatch(Action::SelectNext);
        assert_eq!(state.selected, 1);
        state.dispatch(Action::FilterChanged(FilterChange::Account(Selection::Only(
            "a1".to_string(),
        ))));
        assert_eq!(state.selected, 0);
        assert_eq!(state.selected_transaction().unwrap().id, "t1");

        state.dispatch(Action::ResetFilters);
        assert_eq!(state.filters, Filters::default());
        assert_eq!(state.filtered().len(), 2);
    }

    #[test]
    fn toggling_collapse_flips_one_flag() {
        let mut state = ready();
        state.dispatch(Action::ToggleExpanded);
        assert!(!state.expanded);
        state.dispatch(Action::ToggleExpanded);
        assert!(state.expanded);
    }
}
