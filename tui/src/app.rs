use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use shopchat_common::{Brand, Category, HealthStatus};
use shopchat_core::Conversation;

pub const QUICK_ACCESS_LIMIT: usize = 4;

/// Questions offered on the welcome screen, bound to F1..F4.
pub const SUGGESTED_QUESTIONS: [(&str, &str); 4] = [
    ("🛒", "Do you have iPhone in stock?"),
    ("🏷", "Show me all brands"),
    ("📦", "What categories do you have?"),
    ("★", "Recommend some products"),
];

pub fn category_prompt(name: &str) -> String {
    format!("What products do you have in {name} category?")
}

pub fn brand_prompt(name: &str) -> String {
    format!("What {name} products do you have?")
}

/// Events delivered to the UI loop from background tasks.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Reply { index: usize, text: String },
    Catalog {
        health: Option<HealthStatus>,
        categories: Vec<Category>,
        brands: Vec<Brand>,
    },
}

/// A question that still has to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub index: usize,
    pub question: String,
}

pub struct ChatApp {
    pub running: bool,
    pub input: String,
    pub conversation: Conversation,
    /// Lines scrolled back from the bottom of the transcript
    pub scroll_back: u16,
    pub health: Option<HealthStatus>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub tick: usize,
}

impl Default for ChatApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatApp {
    pub fn new() -> Self {
        Self {
            running: true,
            input: String::new(),
            conversation: Conversation::new(),
            scroll_back: 0,
            health: None,
            categories: Vec::new(),
            brands: Vec::new(),
            tick: 0,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.conversation.is_waiting()
    }

    pub fn show_welcome(&self) -> bool {
        self.conversation.is_empty()
    }

    pub fn quick_categories(&self) -> &[Category] {
        &self.categories[..self.categories.len().min(QUICK_ACCESS_LIMIT)]
    }

    pub fn quick_brands(&self) -> &[Brand] {
        &self.brands[..self.brands.len().min(QUICK_ACCESS_LIMIT)]
    }

    /// Start a turn for `text`. Nothing happens for blank input or while a
    /// reply is still outstanding.
    pub fn submit(&mut self, text: &str) -> Option<PendingRequest> {
        if self.is_waiting() {
            return None;
        }
        let index = self.conversation.begin_turn(text)?;
        self.scroll_back = 0;
        Some(PendingRequest {
            index,
            question: text.to_string(),
        })
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Reply { index, text } => {
                if let Err(e) = self.conversation.complete_turn(index, text) {
                    tracing::warn!("dropping reply: {e}");
                }
                self.scroll_back = 0;
            }
            AppEvent::Catalog { health, categories, brands } => {
                tracing::info!(
                    "catalog loaded: {} categories, {} brands",
                    categories.len(),
                    brands.len()
                );
                self.health = health;
                self.categories = categories;
                self.brands = brands;
            }
        }
    }

    /// Prompt bound to a function key on the welcome screen.
    pub fn shortcut_prompt(&self, n: u8) -> Option<String> {
        if !self.show_welcome() {
            return None;
        }
        let slot = usize::from(n.checked_sub(1)?);
        match slot {
            0..=3 => SUGGESTED_QUESTIONS.get(slot).map(|(_, q)| q.to_string()),
            4..=7 => self.quick_categories().get(slot - 4).map(|c| category_prompt(&c.name)),
            8..=11 => self.quick_brands().get(slot - 8).map(|b| brand_prompt(&b.name)),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PendingRequest> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Enter => {
                if self.is_waiting() {
                    return None;
                }
                let text = std::mem::take(&mut self.input);
                let request = self.submit(&text);
                if request.is_none() {
                    self.input = text;
                }
                return request;
            }
            KeyCode::F(n) => {
                let prompt = self.shortcut_prompt(n)?;
                return self.submit(&prompt);
            }
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.scroll_back = self.scroll_back.saturating_add(1),
            KeyCode::Down => self.scroll_back = self.scroll_back.saturating_sub(1),
            KeyCode::PageUp => self.scroll_back = self.scroll_back.saturating_add(10),
            KeyCode::PageDown => self.scroll_back = self.scroll_back.saturating_sub(10),
            KeyCode::End => self.scroll_back = 0,
            _ => {}
        }
        None
    }
}
