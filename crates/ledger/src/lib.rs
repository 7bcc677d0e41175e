//! Client-side core of the transactions table.
//!
//! Everything here is synchronous and free of I/O: the normalized [`Store`],
//! the [`Filters`], display formatting, the [`CommentPopup`] state machine and
//! the [`LedgerState`] reducer that turns [`Action`]s into state changes and
//! backend [`Command`]s.

pub use editor::{Editor, TagFocus, TagPopover};
pub use error::{LedgerError, Result};
pub use filter::{Filters, MonthKey, Selection, filtered};
pub use format::{TagColor, format_amount, format_date, tag_color};
pub use months::{MonthOption, month_options};
pub use popup::CommentPopup;
pub use state::{
    Action, Command, FilterChange, LedgerState, LoadState, TagFailure, Toast, ToastLevel,
};
pub use store::Store;

mod editor;
mod error;
mod filter;
mod format;
mod months;
mod popup;
mod state;
mod store;
