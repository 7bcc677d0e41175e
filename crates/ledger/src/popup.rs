/// Modal editor for one free-text field.
///
/// Every opening starts from exactly the seed it is handed; nothing carries
/// over from an earlier opening. Submitting closes the popup right away and
/// hands the text to the caller, whose save runs on its own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CommentPopup {
    #[default]
    Closed,
    Editing {
        buffer: String,
    },
}

impl CommentPopup {
    pub fn open(seed: Option<&str>) -> Self {
        Self::Editing {
            buffer: seed.unwrap_or_default().to_string(),
        }
    }

    pub fn buffer(&self) -> Option<&str> {
        match self {
            Self::Closed => None,
            Self::Editing { buffer } => Some(buffer),
        }
    }

    pub fn insert(&mut self, ch: char) {
        if let Self::Editing { buffer } = self {
            buffer.push(ch);
        }
    }

    pub fn newline(&mut self) {
        self.insert('\n');
    }

    pub fn backspace(&mut self) {
        if let Self::Editing { buffer } = self {
            buffer.pop();
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::Closed;
    }

    /// Closes the popup and returns the text to save.
    ///
    /// Returns `None` if the popup was not open.
    pub fn submit(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Closed => None,
            Self::Editing { buffer } => Some(buffer),
        }
    }
}
