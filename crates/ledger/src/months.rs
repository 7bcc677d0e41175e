use chrono::NaiveDate;

use crate::filter::MonthKey;

pub const MONTH_OPTIONS: usize = 12;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthOption {
    pub key: MonthKey,
    pub label: String,
}

/// The trailing twelve months ending at `today`'s month, newest first.
pub fn month_options(today: NaiveDate) -> Vec<MonthOption> {
    let mut key = MonthKey::of(today);
    let mut options = Vec::with_capacity(MONTH_OPTIONS);
    for _ in 0..MONTH_OPTIONS {
        options.push(MonthOption {
            key,
            label: key.label(),
        });
        key = key.previous();
    }
    options
}
