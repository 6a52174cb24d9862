//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async completions use an "inbox": spawned exchange tasks send their
//! `UiEvent` directly to `inbox_tx`, and the runtime drains `inbox_rx` each
//! frame. There is one UI thread; exchanges suspend only the task that
//! issued them.

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use qotd_core::api::ApiClient;
use qotd_core::session::SessionController;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::TuiState;
use crate::{render, terminal, update};

/// Tick cadence while an exchange is pending (drives the spinner).
pub const PENDING_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(50);

/// Poll duration when idle. Longer timeout reduces CPU usage when nothing
/// is happening.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(150);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is guaranteed to be restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state.
    pub state: TuiState,
    /// HTTP client shared with spawned exchange tasks.
    api: ApiClient,
    /// Inbox sender - exchange tasks send completion events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    /// Last time a Tick event was emitted.
    last_tick: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    pub fn new(api: ApiClient, session: SessionController) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let state = TuiState::new(session);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            api,
            inbox_tx,
            inbox_rx,
            last_tick: std::time::Instant::now(),
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Only Tick triggers render - this caps frame rate at tick
                // cadence; terminal events batch renders to the next Tick.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from all sources (inbox, terminal, tick).
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Drain inbox - all async completions arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Faster ticks while an exchange is pending (spinner animation)
        let tick_interval = if self.state.pending.any() {
            PENDING_POLL_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Poll terminal events:
        // - If we already have events to process, do a non-blocking poll
        // - Otherwise block until the next tick is due
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async exchange, sending its completion event to the inbox.
    ///
    /// Handlers are pure async functions returning `UiEvent`; the runtime
    /// handles spawning and delivery.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce(ApiClient) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let api = self.api.clone();
        tokio::spawn(async move {
            let _ = tx.send(f(api).await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }

            UiEffect::SpawnLogin {
                generation,
                username,
                password,
            } => {
                self.spawn_effect(move |api| async move {
                    let result = api.login(&username, &password).await;
                    UiEvent::LoginCompleted { generation, result }
                });
            }

            UiEffect::SpawnRegister {
                generation,
                username,
                password,
            } => {
                self.spawn_effect(move |api| async move {
                    let result = api.register(&username, &password).await;
                    UiEvent::RegisterCompleted { generation, result }
                });
            }

            UiEffect::SpawnFetchQuote { generation, token } => {
                self.spawn_effect(move |api| async move {
                    let result = api.fetch_quote(&token).await;
                    UiEvent::QuoteCompleted { generation, result }
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
