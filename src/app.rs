use crate::{
    api::{HttpTransport, Transport},
    config::Config,
    constants::TICK_RATE_MS,
    controller::{Action, ChatController, UiHandles},
    errors::ChatResult,
    status_indicator::StatusIndicator,
    turn::{run_turn, TurnEvent},
    ui,
};
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// UI state plus what is needed to start turns. Owned by the event loop only.
pub struct App {
    pub controller: ChatController,
    pub status: StatusIndicator,
    endpoint: String,
    transport: Arc<dyn Transport>,
    turn_tx: UnboundedSender<TurnEvent>,
}

impl App {
    pub fn new(
        transport: Arc<dyn Transport>,
        endpoint: impl Into<String>,
    ) -> (Self, UnboundedReceiver<TurnEvent>) {
        let (turn_tx, turn_rx) = mpsc::unbounded_channel();
        let app = App {
            controller: ChatController::initialize(UiHandles::default()),
            status: StatusIndicator::new(),
            endpoint: endpoint.into(),
            transport,
            turn_tx,
        };
        (app, turn_rx)
    }

    /// Handles a terminal event. Returns `true` when the app should quit.
    pub fn handle_event(&mut self, event: CEvent) -> bool {
        let action = match event {
            CEvent::Key(key) => self.controller.handle_key(key),
            CEvent::Mouse(mouse) => self.controller.handle_mouse(mouse),
            _ => Action::None,
        };
        self.dispatch(action)
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::None => false,
            Action::Quit => true,
            Action::Submit(turn) => {
                // Each turn gets its own task; there is no single-flight guard.
                tokio::spawn(run_turn(
                    self.transport.clone(),
                    turn,
                    self.turn_tx.clone(),
                ));
                self.status.set_in_flight(self.controller.in_flight());
                false
            }
        }
    }

    pub fn apply(&mut self, event: TurnEvent) {
        self.controller.apply(event);
        self.status.set_in_flight(self.controller.in_flight());
    }

    pub fn tick(&mut self) {
        self.status.update_spinner();
    }
}

/// Runs its restore hook when dropped, so every exit from `run` (early `?`
/// returns and panics included) leaves the terminal usable.
struct TerminalGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        log::warn!("failed to disable raw mode: {}", e);
    }
    if let Err(e) = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    ) {
        log::warn!("failed to restore terminal: {}", e);
    }
}

/// Sets up the terminal, runs the chat until the user quits, and restores it.
pub async fn run(config: &Config) -> ChatResult<()> {
    let transport = Arc::new(HttpTransport::new(config.endpoint.clone()));
    let (app, turn_rx) = App::new(transport, config.endpoint.clone());

    enable_raw_mode()?;
    let _guard = TerminalGuard {
        restore: restore_terminal,
    };
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, turn_rx).await;

    if let Err(e) = &res {
        log::error!("event loop stopped: {}", e);
    }
    res
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut turn_rx: UnboundedReceiver<TurnEvent>,
) -> ChatResult<()> {
    let (input_tx, mut input_rx) = mpsc::channel::<CEvent>(100);

    // crossterm reads block, so poll on a blocking thread and forward events.
    tokio::task::spawn_blocking(move || {
        let timeout = Duration::from_millis(TICK_RATE_MS);
        while !input_tx.is_closed() {
            match event::poll(timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if input_tx.blocking_send(event).is_err() {
                            return;
                        }
                    }
                    Err(e) => log::warn!("failed to read terminal event: {}", e),
                },
                Ok(false) => {}
                Err(e) => {
                    log::error!("failed to poll terminal events: {}", e);
                    return;
                }
            }
        }
    });

    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_RATE_MS));

    loop {
        terminal.draw(|f| ui::draw(f, &mut app.controller, &app.status, &app.endpoint))?;

        tokio::select! {
            event = input_rx.recv() => match event {
                Some(event) => {
                    if app.handle_event(event) {
                        break;
                    }
                }
                None => break,
            },
            Some(event) = turn_rx.recv() => app.apply(event),
            _ = ticker.tick() => app.tick(),
        }
    }

    Ok(())
}
