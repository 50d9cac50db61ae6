use crate::app::{AppEvent, ChatApp, PendingRequest};
use crate::chat::ChatWidget;
use anyhow::Result;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use shopchat_client::ShopClient;
use shopchat_core::backend::ChatBackend;
use shopchat_core::session::fetch_reply;
use std::io::{self, Stdout};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio::time::{interval, Duration};
use unicode_width::UnicodeWidthStr;

pub struct InteractiveApp {
    app: ChatApp,
    backend: Arc<dyn ChatBackend>,
    client: Option<ShopClient>,
}

impl InteractiveApp {
    /// `client` is used for the health badge and quick-access lists; chat
    /// requests always go through `backend`.
    pub fn new(backend: Arc<dyn ChatBackend>, client: Option<ShopClient>) -> Self {
        Self {
            app: ChatApp::new(),
            backend,
            client,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let (tx, mut rx) = unbounded_channel::<AppEvent>();
        if let Some(client) = self.client.clone() {
            tokio::spawn(load_catalog(client, tx.clone()));
        }

        enable_raw_mode()?;
        let mut terminal = restore_on_error(setup_terminal, restore_terminal)?;

        let result = self.event_loop(&mut terminal, tx, &mut rx).await;

        restore_terminal()?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        tx: UnboundedSender<AppEvent>,
        rx: &mut tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
    ) -> Result<()> {
        let mut events = EventStream::new();
        let mut tick = interval(Duration::from_millis(120));

        while self.app.running {
            terminal.draw(|f| draw(f, &self.app))?;

            tokio::select! {
                _ = tick.tick() => {
                    self.app.tick = self.app.tick.wrapping_add(1);
                }
                Some(event) = rx.recv() => {
                    self.app.handle_event(event);
                }
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            if let Some(request) = self.app.handle_key(key) {
                                self.dispatch(request, tx.clone());
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                        None => self.app.running = false,
                    }
                }
            }
        }
        Ok(())
    }

    fn dispatch(&self, request: PendingRequest, tx: UnboundedSender<AppEvent>) {
        let backend = Arc::clone(&self.backend);
        tracing::info!("turn {} sent", request.index);
        tokio::spawn(async move {
            let text = fetch_reply(backend.as_ref(), &request.question).await;
            let _ = tx.send(AppEvent::Reply { index: request.index, text });
        });
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Run `setup`, calling `restore` before returning if it fails.
fn restore_on_error<T>(
    setup: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    match setup() {
        Ok(value) => Ok(value),
        Err(e) => {
            if let Err(restore_err) = restore() {
                tracing::warn!("failed to restore terminal: {restore_err}");
            }
            Err(e)
        }
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn load_catalog(client: ShopClient, tx: UnboundedSender<AppEvent>) {
    let (health, categories, brands) =
        tokio::join!(client.health(), client.categories(), client.brands());

    let health = health
        .map_err(|e| tracing::warn!("failed to load health: {e}"))
        .ok();
    let categories = categories.unwrap_or_else(|e| {
        tracing::warn!("failed to load categories: {e}");
        Vec::new()
    });
    let brands = brands.unwrap_or_else(|e| {
        tracing::warn!("failed to load brands: {e}");
        Vec::new()
    });
    let _ = tx.send(AppEvent::Catalog { health, categories, brands });
}

fn header_line(app: &ChatApp) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "ShopBot AI Customer Support",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(health) = &app.health {
        let (label, color) = if health.is_connected() {
            ("● Connected", Color::Green)
        } else {
            ("● Disconnected", Color::Red)
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(label, Style::default().fg(color)));
    }
    Line::from(spans)
}

fn draw(f: &mut Frame, app: &ChatApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(f.area());

    let chat_block = Block::default().title(header_line(app)).borders(Borders::ALL);
    let inner = chat_block.inner(chunks[0]);
    f.render_widget(chat_block, chunks[0]);
    f.render_widget(ChatWidget::new(app), inner);

    let title = if app.is_waiting() {
        "Waiting for reply... (Esc to quit)"
    } else {
        "Type your question here (Enter to send, Esc to quit)"
    };
    let input = Paragraph::new(app.input.as_str())
        .block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(input, chunks[1]);

    let width = u16::try_from(app.input.width()).unwrap_or(u16::MAX);
    let max_x = chunks[1].x + chunks[1].width.saturating_sub(2);
    f.set_cursor_position((
        (chunks[1].x + 1).saturating_add(width).min(max_x),
        chunks[1].y + 1,
    ));
}
