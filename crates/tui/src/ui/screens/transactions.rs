use api_types::transaction::Transaction;
use chrono::Local;
use ledger::{
    LedgerState, LoadState, Selection, Store, format_amount, format_date, month_options, tag_color,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::ui::{components::card::Card, theme::Theme};

const COMMENT_PLACEHOLDER: &str = "✎";

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &LedgerState, theme: &Theme) {
    let rows = state.filtered();
    let chevron = if state.expanded { "▲" } else { "▼" };
    let title = Line::from(vec![
        Span::styled(
            format!(" Recent Transactions ({}) ", rows.len()),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{chevron} "), Style::default().fg(theme.dim)),
    ]);
    let card = Card::new(title, theme).focused(!state.editor.is_open());

    if !state.expanded {
        let header = Rect {
            height: area.height.min(2),
            ..area
        };
        card.render_frame(frame, header);
        return;
    }

    let inner = card.inner(area);
    card.render_frame(frame, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    render_filter_bar(frame, layout[0], state, rows.len(), theme);

    match &state.load {
        LoadState::Loading => frame.render_widget(
            Paragraph::new(Span::styled(
                "Loading transactions...",
                Style::default().fg(theme.dim),
            ))
            .alignment(Alignment::Center),
            layout[1],
        ),
        LoadState::Failed(message) => {
            let lines = vec![
                Line::from(Span::styled(
                    format!("Failed to load transactions: {message}"),
                    Style::default().fg(theme.error),
                )),
                Line::from(vec![
                    Span::styled("Press ", Style::default().fg(theme.dim)),
                    Span::styled("r", Style::default().fg(theme.accent)),
                    Span::styled(" to retry", Style::default().fg(theme.dim)),
                ]),
            ];
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                layout[1],
            );
        }
        LoadState::Ready => render_table(frame, layout[1], state, &rows, theme),
    }
}

fn render_filter_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &LedgerState,
    count: usize,
    theme: &Theme,
) {
    let filters = &state.filters;
    let account = match &filters.account {
        Selection::All => "All Accounts".to_string(),
        Selection::Only(id) => state.store.account_name(id).unwrap_or(id).to_string(),
    };
    let month = match &filters.month {
        Selection::All => "All Months".to_string(),
        Selection::Only(key) => month_options(Local::now().date_naive())
            .into_iter()
            .find(|option| option.key == *key)
            .map_or_else(|| key.label(), |option| option.label),
    };
    let category = match filters.category {
        Selection::All => Span::styled("All Categories", Style::default().fg(theme.text)),
        Selection::Only(category) => Span::styled(
            category.as_str(),
            Style::default().fg(theme.category(category)),
        ),
    };

    let separator = Span::styled("  │  ", Style::default().fg(theme.border));
    let line = Line::from(vec![
        Span::styled("Account ", Style::default().fg(theme.text_muted)),
        Span::styled(account, Style::default().fg(theme.text)),
        separator.clone(),
        Span::styled("Month ", Style::default().fg(theme.text_muted)),
        Span::styled(month, Style::default().fg(theme.text)),
        separator.clone(),
        Span::styled("Category ", Style::default().fg(theme.text_muted)),
        category,
        separator,
        Span::styled(format!("{count} transactions"), Style::default().fg(theme.dim)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_table(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &LedgerState,
    rows: &[&Transaction],
    theme: &Theme,
) {
    let header = Row::new([
        "Date",
        "Account",
        "Description",
        "Category",
        "Tags",
        "Comment",
        "Amount",
    ])
    .style(
        Style::default()
            .fg(theme.text_muted)
            .add_modifier(Modifier::BOLD),
    );

    let body = rows
        .iter()
        .map(|tx| transaction_row(tx, &state.store, theme))
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Min(16),
        Constraint::Length(9),
        Constraint::Length(18),
        Constraint::Length(16),
        Constraint::Length(12),
    ];

    let table = Table::new(body, widths)
        .header(header)
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    if !rows.is_empty() {
        table_state.select(Some(state.selected));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn transaction_row<'a>(tx: &'a Transaction, store: &'a Store, theme: &Theme) -> Row<'a> {
    let tags = tx
        .tags
        .iter()
        .flat_map(|tag| {
            [
                Span::styled(
                    format!("#{}", tag.name),
                    Style::default().fg(theme.tag(tag_color(&tag.name))),
                ),
                Span::raw(" "),
            ]
        })
        .collect::<Vec<_>>();

    let comment = match tx.comment.as_deref().filter(|text| !text.is_empty()) {
        Some(text) => {
            let mut lines = text.lines();
            let first = lines.next().unwrap_or_default();
            let more = if lines.next().is_some() { " …" } else { "" };
            Span::styled(format!("{first}{more}"), Style::default().fg(theme.text))
        }
        None => Span::styled(COMMENT_PLACEHOLDER, Style::default().fg(theme.dim)),
    };

    let amount = Line::from(Span::styled(
        format_amount(tx.amount, tx.kind),
        Style::default().fg(theme.amount(tx.kind)),
    ))
    .alignment(Alignment::Right);

    Row::new(vec![
        Cell::from(format_date(tx.date)),
        Cell::from(store.account_name(&tx.account_id).unwrap_or_default()),
        Cell::from(tx.description.as_str()),
        Cell::from(Span::styled(
            tx.category.as_str(),
            Style::default().fg(theme.category(tx.category)),
        )),
        Cell::from(Line::from(tags)),
        Cell::from(comment),
        Cell::from(amount),
    ])
}

#[cfg(test)]
mod tests {
    use api_types::{
        account::Account,
        tag::Tag,
        transaction::{Category, TransactionType},
    };
    use chrono::NaiveDate;
    use ledger::Action;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn draw(state: &LedgerState) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(120, 16)).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn screen_contains(lines: &[String], needle: &str) -> bool {
        lines.iter().any(|line| line.contains(needle))
    }

    fn rent() -> Transaction {
        Transaction {
            id: "t1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            account_id: "a1".to_string(),
            description: "Rent".to_string(),
            category: Category::Expense,
            amount: 1234.5,
            kind: TransactionType::Debit,
            comment: None,
            tags: vec![Tag {
                id: "g1".to_string(),
                name: "home".to_string(),
            }],
        }
    }

    fn loaded(transactions: Vec<Transaction>) -> LedgerState {
        let mut state = LedgerState::new();
        state.dispatch(Action::LedgerLoaded {
            transactions,
            accounts: vec![Account {
                id: "a1".to_string(),
                name: "Checking".to_string(),
            }],
        });
        state
    }

    #[test]
    fn loading_state_shows_message() {
        let lines = draw(&LedgerState::new());
        assert!(screen_contains(&lines, "Loading transactions..."));
    }

    #[test]
    fn empty_ledger_shows_zero_count() {
        let lines = draw(&loaded(Vec::new()));
        assert!(screen_contains(&lines, "Recent Transactions (0)"));
        assert!(screen_contains(&lines, "0 transactions"));
        assert!(screen_contains(&lines, "All Accounts"));
    }

    #[test]
    fn row_shows_formatted_fields() {
        let lines = draw(&loaded(vec![rent()]));
        assert!(screen_contains(&lines, "Recent Transactions (1)"));
        assert!(screen_contains(&lines, "Mar 15, 2024"));
        assert!(screen_contains(&lines, "Checking"));
        assert!(screen_contains(&lines, "#home"));
        assert!(screen_contains(&lines, COMMENT_PLACEHOLDER));
        assert!(screen_contains(&lines, "-$1,234.5"));
    }

    #[test]
    fn failed_load_offers_retry() {
        let mut state = LedgerState::new();
        state.dispatch(Action::LoadFailed("server returned 500".to_string()));
        let lines = draw(&state);
        assert!(screen_contains(&lines, "server returned 500"));
        assert!(screen_contains(&lines, "Press r to retry"));
    }

    #[test]
    fn collapsed_hides_rows() {
        let mut state = loaded(vec![rent()]);
        state.dispatch(Action::ToggleExpanded);
        let lines = draw(&state);
        assert!(screen_contains(&lines, "Recent Transactions (1)"));
        assert!(!screen_contains(&lines, "Mar 15, 2024"));
    }

    #[test]
    fn month_filter_shows_its_label() {
        let today = Local::now().date_naive();
        let current = month_options(today).remove(0);
        let mut state = loaded(vec![rent()]);
        state.dispatch(Action::FilterChanged(ledger::FilterChange::Month(
            Selection::Only(current.key),
        )));
        let lines = draw(&state);
        assert!(screen_contains(&lines, &format!("Month {}", current.label)));
        assert!(!screen_contains(&lines, "All Months"));
    }
}
