use std::{fmt, str::FromStr};

use api_types::transaction::{Category, Transaction};
use chrono::{Datelike, Months, NaiveDate};

use crate::{
    error::{LedgerError, Result},
    store::Store,
};

/// One filter dimension: everything, or one concrete value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq + Clone> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }

    /// Steps through `All` followed by `options`, wrapping at both ends.
    ///
    /// A value that is no longer among the options restarts from `All`.
    pub fn cycle(&self, options: &[T], forward: bool) -> Self {
        let slots = options.len() + 1;
        let current = match self {
            Self::All => 0,
            Self::Only(value) => match options.iter().position(|opt| opt == value) {
                Some(pos) => pos + 1,
                None => return Self::All,
            },
        };
        let next = if forward {
            (current + 1) % slots
        } else {
            (current + slots - 1) % slots
        };
        match next {
            0 => Self::All,
            n => Self::Only(options[n - 1].clone()),
        }
    }
}

/// A calendar month. `month0` is zero-indexed (January is 0), which is also
/// how it travels as a filter value: `"2024-2"` is March 2024.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month0: u32,
}

impl MonthKey {
    pub fn new(year: i32, month0: u32) -> Result<Self> {
        let key = Self { year, month0 };
        if month0 > 11 || key.first_day().is_none() {
            return Err(LedgerError::InvalidMonth(format!("{year}-{month0}")));
        }
        Ok(key)
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
    }

    /// First and last day of the month, both inclusive.
    pub fn bounds(self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.first_day()?;
        let end = start.checked_add_months(Months::new(1))?.pred_opt()?;
        Some((start, end))
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        self.bounds()
            .is_some_and(|(start, end)| start <= date && date <= end)
    }

    /// The month before this one.
    pub fn previous(self) -> Self {
        if self.month0 == 0 {
            Self {
                year: self.year - 1,
                month0: 11,
            }
        } else {
            Self {
                year: self.year,
                month0: self.month0 - 1,
            }
        }
    }

    /// Human label, e.g. `March 2024`.
    pub fn label(self) -> String {
        self.first_day()
            .map(|day| day.format("%B %Y").to_string())
            .unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month0)
    }
}

impl FromStr for MonthKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LedgerError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month0 = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month0).map_err(|_| invalid())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filters {
    pub account: Selection<String>,
    pub month: Selection<MonthKey>,
    pub category: Selection<Category>,
}

impl Filters {
    pub fn matches(&self, tx: &Transaction) -> bool {
        let account = self.account.matches(&tx.account_id);
        let month = self
            .month
            .value()
            .is_none_or(|key| key.contains(tx.date));
        let category = self.category.matches(&tx.category);
        account && month && category
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// The visible rows: store order, narrowed by every filter.
pub fn filtered<'a>(store: &'a Store, filters: &Filters) -> Vec<&'a Transaction> {
    store
        .transactions()
        .filter(|tx| filters.matches(tx))
        .collect()
}
