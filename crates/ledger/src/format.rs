use api_types::transaction::TransactionType;
use chrono::NaiveDate;

/// `Mar 5, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Signed display amount: `+$1,234.5` for credits, `-$12` for debits.
///
/// The magnitude is grouped by thousands and keeps at most three fraction
/// digits, without trailing zeros.
pub fn format_amount(amount: f64, kind: TransactionType) -> String {
    let sign = match kind {
        TransactionType::Credit => '+',
        TransactionType::Debit => '-',
    };
    format!("{sign}${}", group_thousands(amount.abs()))
}

fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{value:.3}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(char::from(*digit));
    }
    if !frac_part.is_empty() {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}

/// Palette for tag chips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagColor {
    Red,
    Green,
    Blue,
    Orange,
    Purple,
}

impl TagColor {
    pub const PALETTE: [TagColor; 5] = [
        TagColor::Red,
        TagColor::Green,
        TagColor::Blue,
        TagColor::Orange,
        TagColor::Purple,
    ];
}

/// Picks a chip color from the tag name alone (FNV-1a), so a tag keeps its
/// color across frames and runs.
pub fn tag_color(name: &str) -> TagColor {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in name.as_bytes() {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    TagColor::PALETTE[(hash % TagColor::PALETTE.len() as u32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_use_short_month() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "Mar 5, 2024");
    }

    #[test]
    fn amounts_are_signed_by_type_and_grouped() {
        assert_eq!(format_amount(1234.5, TransactionType::Credit), "+$1,234.5");
        assert_eq!(format_amount(12.0, TransactionType::Debit), "-$12");
        assert_eq!(format_amount(1_000_000.0, TransactionType::Credit), "+$1,000,000");
        assert_eq!(format_amount(999.999, TransactionType::Debit), "-$999.999");
        assert_eq!(format_amount(0.1, TransactionType::Credit), "+$0.1");
        assert_eq!(format_amount(-50.25, TransactionType::Debit), "-$50.25");
    }

    #[test]
    fn tag_colors_are_stable() {
        for name in ["food", "rent", "travel", ""] {
            assert_eq!(tag_color(name), tag_color(name));
        }
        let spread: std::collections::HashSet<_> = ["a", "b", "c", "d", "e", "f", "g", "h"]
            .iter()
            .map(|name| tag_color(name))
            .collect();
        assert!(spread.len() > 1);
    }
}
