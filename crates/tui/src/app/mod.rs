use std::time::{Duration, Instant};

use api_types::transaction::Category;
use chrono::Local;
use client::Client;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ledger::{Action, Command, FilterChange, LedgerState, month_options};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, KeyContext, map_key},
    },
};

pub struct App {
    config: AppConfig,
    client: Client,
    pub state: LedgerState,
    results_tx: UnboundedSender<Vec<Action>>,
    results_rx: UnboundedReceiver<Vec<Action>>,
    toast_timer: ToastTimer,
    should_quit: bool,
}

/// Tracks when the current toast went up so it can be dismissed after `ttl`.
#[derive(Debug)]
struct ToastTimer {
    ttl: Duration,
    seen: u64,
    shown_at: Option<Instant>,
}

impl ToastTimer {
    fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            seen: 0,
            shown_at: None,
        }
    }

    /// Restarts the clock for every newly shown toast, including a repeat of
    /// the one already on screen.
    fn observe(&mut self, state: &LedgerState, now: Instant) {
        if state.toast.is_none() {
            self.shown_at = None;
        } else if state.toasts_shown != self.seen {
            self.shown_at = Some(now);
        }
        self.seen = state.toasts_shown;
    }

    fn expired(&self, now: Instant) -> bool {
        self.shown_at
            .is_some_and(|shown| now.duration_since(shown) >= self.ttl)
    }
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let (results_tx, results_rx) = unbounded_channel();
        let toast_timer = ToastTimer::new(Duration::from_millis(config.toast_ms));
        Ok(Self {
            config,
            client,
            state: LedgerState::new(),
            results_tx,
            results_rx,
            toast_timer,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        for command in LedgerState::initial_commands() {
            self.spawn(command);
        }

        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(self.config.tick_ms);

        while !self.should_quit {
            while let Ok(actions) = self.results_rx.try_recv() {
                for action in actions {
                    self.dispatch(action);
                }
            }
            if self.toast_timer.expired(Instant::now()) {
                self.dispatch(Action::DismissToast);
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key);
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let context = KeyContext::of(&self.state.editor);
        match map_key(key, context) {
            AppAction::Quit => self.should_quit = true,
            AppAction::Dispatch(action) => self.dispatch(action),
            AppAction::CycleAccount { forward } => {
                let ids: Vec<String> = self
                    .state
                    .store
                    .accounts()
                    .iter()
                    .map(|account| account.id.clone())
                    .collect();
                let next = self.state.filters.account.cycle(&ids, forward);
                self.dispatch(Action::FilterChanged(FilterChange::Account(next)));
            }
            AppAction::CycleMonth { forward } => {
                let keys: Vec<_> = month_options(Local::now().date_naive())
                    .into_iter()
                    .map(|option| option.key)
                    .collect();
                let next = self.state.filters.month.cycle(&keys, forward);
                self.dispatch(Action::FilterChanged(FilterChange::Month(next)));
            }
            AppAction::CycleCategory { forward } => {
                let next = self.state.filters.category.cycle(&Category::ALL, forward);
                self.dispatch(Action::FilterChanged(FilterChange::Category(next)));
            }
            AppAction::None => {}
        }
    }

    fn dispatch(&mut self, action: Action) {
        let commands = self.state.dispatch(action);
        self.toast_timer.observe(&self.state, Instant::now());
        for command in commands {
            self.spawn(command);
        }
    }

    fn spawn(&self, command: Command) {
        tracing::debug!(?command, "spawning request");
        let client = self.client.clone();
        let results = self.results_tx.clone();
        tokio::spawn(async move {
            let actions = client::execute(&client, command).await;
            // The receiver only goes away on shutdown.
            let _ = results.send(actions);
        });
    }
}
