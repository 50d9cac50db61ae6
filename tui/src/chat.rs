use crate::app::{ChatApp, SUGGESTED_QUESTIONS};
use crate::render::LineRenderer;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget, Wrap},
};
use shopchat_core::{BlockRenderer, Turn};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
pub const LOADING_TEXT: &str = "Searching for product information...";

/// Transcript of the conversation, or the welcome screen when it is empty.
pub struct ChatWidget<'a> {
    app: &'a ChatApp,
}

impl<'a> ChatWidget<'a> {
    pub fn new(app: &'a ChatApp) -> Self {
        Self { app }
    }

    pub fn build_lines(&self) -> Vec<Line<'static>> {
        if self.app.show_welcome() {
            self.welcome_lines()
        } else {
            self.transcript_lines()
        }
    }

    fn heading(text: &str) -> Line<'static> {
        Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
        ))
    }

    fn shortcut(key: usize, glyph: &str, label: String) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  [F{key}] "), Style::default().fg(Color::Cyan)),
            Span::raw(format!("{glyph} {label}")),
        ])
    }

    fn welcome_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Welcome to AI Customer Support",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "I'm your AI assistant that can help you find products, check inventory, and answer various questions about our store.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Self::heading("Frequently Asked Questions"),
        ];
        for (i, (glyph, question)) in SUGGESTED_QUESTIONS.iter().enumerate() {
            lines.push(Self::shortcut(i + 1, glyph, question.to_string()));
        }

        let categories = self.app.quick_categories();
        if !categories.is_empty() {
            lines.push(Line::from(""));
            lines.push(Self::heading("Quick Categories"));
            for (i, category) in categories.iter().enumerate() {
                lines.push(Self::shortcut(i + 5, "📦", category.name.clone()));
            }
        }

        let brands = self.app.quick_brands();
        if !brands.is_empty() {
            lines.push(Line::from(""));
            lines.push(Self::heading("Popular Brands"));
            for (i, brand) in brands.iter().enumerate() {
                lines.push(Self::shortcut(i + 9, "🏷", brand.name.clone()));
            }
        }
        lines
    }

    fn speaker(name: &str, color: Color, turn: &Turn) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                name.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" · {}", turn.time_label()), Style::default().fg(Color::DarkGray)),
        ])
    }

    fn transcript_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let turns = self.app.conversation.turns();
        for (i, turn) in turns.iter().enumerate() {
            lines.push(Self::speaker("You", Color::Yellow, turn));
            lines.extend(turn.user_text.lines().map(|l| Line::from(l.to_string())));
            lines.push(Line::from(""));

            lines.push(Self::speaker("ShopBot", Color::Green, turn));
            match turn.blocks() {
                Some(blocks) => lines.extend(LineRenderer.render_blocks(&blocks)),
                None => lines.push(Line::from(vec![
                    Span::styled(
                        format!("{} ", SPINNER[self.app.tick % SPINNER.len()]),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(LOADING_TEXT, Style::default().fg(Color::DarkGray)),
                ])),
            }

            if i + 1 < turns.len() {
                lines.push(Line::from(""));
            }
        }
        lines
    }
}

impl Widget for ChatWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let paragraph = Paragraph::new(Text::from(self.build_lines())).wrap(Wrap { trim: false });
        let total = u16::try_from(paragraph.line_count(area.width)).unwrap_or(u16::MAX);
        let bottom = total.saturating_sub(area.height);
        let top = bottom.saturating_sub(self.app.scroll_back);
        paragraph.scroll((top, 0)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppEvent;
    use crate::render::line_text;
    use shopchat_common::Brand;

    fn texts(app: &ChatApp) -> Vec<String> {
        ChatWidget::new(app).build_lines().iter().map(line_text).collect()
    }

    #[test]
    fn test_welcome_lists_shortcuts() {
        let mut app = ChatApp::new();
        app.handle_event(AppEvent::Catalog {
            health: None,
            categories: vec![],
            brands: vec![Brand {
                id: 1,
                name: "Acme".to_string(),
                description: String::new(),
                product_count: 3,
            }],
        });
        let lines = texts(&app);
        assert_eq!(lines[0], "Welcome to AI Customer Support");
        assert!(lines.contains(&"  [F1] 🛒 Do you have iPhone in stock?".to_string()));
        assert!(!lines.iter().any(|l| l == "Quick Categories"));
        assert!(lines.iter().any(|l| l == "Popular Brands"));
        assert_eq!(lines.last().map(String::as_str), Some("  [F9] 🏷 Acme"));
    }

    #[test]
    fn test_pending_turn_shows_loading() {
        let mut app = ChatApp::new();
        app.submit("Recommend some products").unwrap();
        let lines = texts(&app);
        assert!(lines[0].starts_with("You · "));
        assert_eq!(lines[1], "Recommend some products");
        assert!(lines[3].starts_with("ShopBot · "));
        assert!(lines[4].ends_with(LOADING_TEXT));
    }

    #[test]
    fn test_completed_turn_renders_blocks() {
        let mut app = ChatApp::new();
        let request = app.submit("Show me all brands").unwrap();
        app.handle_event(AppEvent::Reply {
            index: request.index,
            text: "=== Brands ===\n• Acme (4 products) - Tools".to_string(),
        });
        let lines = texts(&app);
        assert_eq!(lines[4], "🏷 Brands");
        assert_eq!(lines[5], "📦 Acme  4 products ");
        assert_eq!(lines[6], "   Tools");
        assert!(!lines.iter().any(|l| l.contains(LOADING_TEXT)));
    }

    #[test]
    fn test_render_into_buffer_shows_latest_lines() {
        let mut app = ChatApp::new();
        for i in 0..5 {
            let request = app.submit(&format!("question {i}")).unwrap();
            app.handle_event(AppEvent::Reply { index: request.index, text: format!("answer {i}") });
        }
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        ChatWidget::new(&app).render(area, &mut buf);
        let last_row: String = (0..area.width)
            .map(|x| buf[(x, area.height - 1)].symbol().to_string())
            .collect();
        assert_eq!(last_row.trim_end(), "answer 4");
    }
}
