use api_types::transaction::{Category, TransactionType};
use ledger::TagColor;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            surface: Color::Rgb(20, 26, 32),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(170, 170, 170),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(70, 80, 90),
            border_focused: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(22, 163, 74),
            negative: Color::Rgb(220, 38, 38),
            error: Color::Rgb(200, 80, 80),
        }
    }
}

impl Theme {
    pub fn category(&self, category: Category) -> Color {
        match category {
            Category::Income => Color::Rgb(22, 163, 74),
            Category::Expense => Color::Rgb(220, 38, 38),
            Category::Asset => Color::Rgb(37, 99, 235),
            Category::Liability => Color::Rgb(234, 88, 12),
        }
    }

    pub fn tag(&self, color: TagColor) -> Color {
        match color {
            TagColor::Red => Color::Rgb(220, 38, 38),
            TagColor::Green => Color::Rgb(22, 163, 74),
            TagColor::Blue => Color::Rgb(37, 99, 235),
            TagColor::Orange => Color::Rgb(234, 88, 12),
            TagColor::Purple => Color::Rgb(147, 51, 234),
        }
    }

    pub fn amount(&self, kind: TransactionType) -> Color {
        match kind {
            TransactionType::Credit => self.positive,
            TransactionType::Debit => self.negative,
        }
    }
}
