use crate::popup::CommentPopup;

/// Which input of the tag popover has focus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TagFocus {
    #[default]
    Input,
    Vocabulary,
}

/// Free-text entry plus a picker over the existing vocabulary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagPopover {
    pub input: String,
    pub focus: TagFocus,
    pub cursor: usize,
}

/// The single inline editor that may be open.
///
/// Holding every editor in one enum keeps "one editor, one transaction" true
/// without any bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Editor {
    #[default]
    None,
    Category {
        transaction_id: String,
        cursor: usize,
    },
    Tags {
        transaction_id: String,
        popover: TagPopover,
    },
    Comment {
        transaction_id: String,
        popup: CommentPopup,
    },
}

impl Editor {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}
