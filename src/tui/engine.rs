//! TUI event loop
//!
//! - Terminal input arrives on a channel fed by a background polling task
//! - Fetch completions arrive on the search controller's channel
//! - The pending debounced query is delivered when its deadline passes
//!
//! A single `select!` loop multiplexes the three sources and redraws after
//! every event, so all state changes happen on one task.

use crate::config::SearchConfig;
use crate::pagination::PageControl;
use crate::search_controller::{FetchCompletion, SearchController};
use crate::services::{CommentSource, HttpCommentSource};

use super::input::{InputAction, InputHandler};
use super::renderer::{TuiRenderer, ViewState};

use anyhow::{Context, Result};
use crossterm::event::{
    Event as CrosstermEvent, KeyEvent, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

const INPUT_POLL: Duration = Duration::from_millis(16);
const IDLE_POLL: Duration = Duration::from_millis(8);

/// User input delivered to the engine
#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Forward crossterm events to a channel from a background task.
///
/// The task stops once the receiver is dropped.
pub fn create_input_stream() -> mpsc::UnboundedReceiver<InputEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            if crossterm::event::poll(INPUT_POLL).unwrap_or(false) {
                let event = match crossterm::event::read() {
                    Ok(event) => event,
                    Err(e) => {
                        log::error!("Failed to read terminal event: {}", e);
                        break;
                    }
                };
                let input_event = match event {
                    CrosstermEvent::Key(key) => InputEvent::Key(key),
                    CrosstermEvent::Mouse(mouse) => InputEvent::Mouse(mouse),
                    CrosstermEvent::Resize(w, h) => InputEvent::Resize(w, h),
                    _ => continue,
                };
                if tx.send(input_event).is_err() {
                    break;
                }
            }
            tokio::time::sleep(IDLE_POLL).await;
        }
    });

    rx
}

/// Sleep until `deadline`, or forever when there is none
async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Message processing engine for one mounted widget
pub struct TuiEngine {
    controller: SearchController,
    completion_rx: mpsc::UnboundedReceiver<FetchCompletion>,
    view: ViewState,
    initial_query: Option<String>,
    should_quit: bool,
}

impl TuiEngine {
    pub fn new(source: Arc<dyn CommentSource>, debounce: Duration) -> Self {
        let (controller, completion_rx) = SearchController::new(source, debounce);
        Self {
            controller,
            completion_rx,
            view: ViewState::default(),
            initial_query: None,
            should_quit: false,
        }
    }

    /// Pre-fill the input with `query` and submit it right after mounting
    pub fn with_initial_query(mut self, query: Option<String>) -> Self {
        self.initial_query = query.filter(|q| !q.is_empty());
        self
    }

    pub fn controller(&self) -> &SearchController {
        &self.controller
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main event loop. Returns when the user quits or input ends.
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut input_rx: mpsc::UnboundedReceiver<InputEvent>,
    ) -> Result<()> {
        self.controller.mount();
        if let Some(query) = self.initial_query.take() {
            self.controller.on_query_change(query);
            self.controller.on_submit();
        }

        while !self.should_quit {
            self.render(terminal)?;
            let deadline = self.controller.debounce_deadline();

            tokio::select! {
                biased;

                input = input_rx.recv() => match input {
                    Some(input) => self.handle_input(input),
                    None => {
                        log::debug!("Input channel closed");
                        break;
                    }
                },

                Some(completion) = self.completion_rx.recv() => {
                    if self.controller.apply_completion(completion) {
                        self.view.selected_row = 0;
                    }
                }

                _ = wait_until(deadline) => {
                    self.controller.poll_debounce();
                }
            }
        }

        self.render(terminal)?;
        Ok(())
    }

    fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let state = self.controller.state();
        let view = &mut self.view;
        terminal
            .draw(|f| TuiRenderer::render(f, state, view))
            .context("Failed to draw frame")?;
        Ok(())
    }

    pub fn handle_input(&mut self, input: InputEvent) {
        match input {
            InputEvent::Key(key) => {
                if let Some(action) = InputHandler::action_for_key(key) {
                    self.handle_action(action);
                }
            }
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            InputEvent::Resize(w, h) => log::trace!("Terminal resized to {}x{}", w, h),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(area) = self.view.pagination_area else {
            return;
        };
        let pagination = self.controller.state().pagination();
        if let Some(control) =
            TuiRenderer::pagination_control_at(&pagination, area, mouse.column, mouse.row)
        {
            self.request_page(control);
        }
    }

    pub fn handle_action(&mut self, action: InputAction) {
        let state = self.controller.state();

        match action {
            InputAction::Quit => self.should_quit = true,
            _ if action.is_edit() => {
                if !state.input_enabled() {
                    log::trace!("Ignoring edit while loading");
                    return;
                }
                let mut query = state.raw_query.clone();
                if InputHandler::apply_edit(action, &mut query) {
                    self.controller.on_query_change(query);
                }
            }
            InputAction::Submit => {
                if state.input_enabled() {
                    self.controller.on_submit();
                }
            }
            InputAction::SelectPrevious => {
                self.view.selected_row = self.view.selected_row.saturating_sub(1);
            }
            InputAction::SelectNext => {
                let rows = state.page_window().comments.len();
                if self.view.selected_row + 1 < rows {
                    self.view.selected_row += 1;
                }
            }
            InputAction::Page(control) => self.request_page(control),
            InputAction::FirstPage => self.request_page(PageControl::Page(1)),
            InputAction::LastPage => {
                let last = state.pagination().total_pages();
                self.request_page(PageControl::Page(last));
            }
            InputAction::InsertChar(_)
            | InputAction::DeleteCharBackward
            | InputAction::ClearQuery => {}
        }
    }

    fn request_page(&mut self, control: PageControl) {
        let pagination = self.controller.state().pagination();
        if let Some(page) = pagination.request(control) {
            if self.controller.on_page_change(page) {
                self.view.selected_row = 0;
            }
        }
    }
}

/// Run the interactive search widget against the configured endpoint
pub async fn run_tui(config: SearchConfig, initial_query: Option<String>) -> Result<()> {
    use crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::backend::CrosstermBackend;

    let source = HttpCommentSource::new(config.base_url.clone(), config.timeout)
        .context("Failed to build HTTP client")?;
    log::info!("Searching comments at {}", source.base_url());

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut engine =
        TuiEngine::new(Arc::new(source), config.debounce).with_initial_query(initial_query);
    let result = engine.run(&mut terminal, create_input_stream()).await;

    // Unmount before restoring the terminal so no fetch outlives the widget
    drop(engine);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
