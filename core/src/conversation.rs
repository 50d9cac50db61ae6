use crate::blocks::DisplayBlock;
use crate::error::ConversationError;
use crate::formatter::format_reply;
use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One user message and its reply. `bot_text` is `None` while pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user_text: String,
    pub bot_text: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Turn {
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            bot_text: None,
            timestamp: Some(Utc::now()),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.bot_text.is_none()
    }

    /// Formatted reply; `None` until the reply has arrived.
    pub fn blocks(&self) -> Option<Vec<DisplayBlock>> {
        self.bot_text.as_deref().map(format_reply)
    }

    /// Local wall-clock time of the turn, e.g. `3:07 PM`.
    pub fn time_label(&self) -> String {
        let ts = self.timestamp.unwrap_or_else(Utc::now);
        format_clock(&ts.with_timezone(&Local))
    }
}

pub fn format_clock<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.format("%-I:%M %p").to_string()
}

/// Append-only list of turns for one session.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Appends a pending turn and returns its index. Blank input is ignored.
    pub fn begin_turn(&mut self, user_text: &str) -> Option<usize> {
        if user_text.trim().is_empty() {
            return None;
        }
        self.turns.push(Turn::new(user_text));
        Some(self.turns.len() - 1)
    }

    pub fn complete_turn(
        &mut self,
        index: usize,
        bot_text: impl Into<String>,
    ) -> Result<(), ConversationError> {
        let turn = self
            .turns
            .get_mut(index)
            .ok_or(ConversationError::UnknownTurn { index })?;
        if !turn.is_pending() {
            return Err(ConversationError::AlreadyAnswered { index });
        }
        turn.bot_text = Some(bot_text.into());
        Ok(())
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn get(&self, index: usize) -> Option<&Turn> {
        self.turns.get(index)
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// True while any turn still waits for its reply.
    pub fn is_waiting(&self) -> bool {
        self.turns.iter().any(Turn::is_pending)
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_and_complete() {
        let mut conversation = Conversation::new();
        assert!(conversation.is_empty());

        let idx = conversation.begin_turn("Show me all brands").unwrap();
        assert_eq!(idx, 0);
        assert!(conversation.is_waiting());
        assert!(conversation.turns()[0].blocks().is_none());
        assert!(conversation.turns()[0].timestamp.is_some());

        conversation.complete_turn(idx, "• Just a note").unwrap();
        assert!(!conversation.is_waiting());
        assert_eq!(
            conversation.last().unwrap().blocks(),
            Some(vec![DisplayBlock::bullet("Just a note")])
        );
    }

    #[test]
    fn test_blank_input_ignored() {
        let mut conversation = Conversation::new();
        assert_eq!(conversation.begin_turn("   "), None);
        assert_eq!(conversation.begin_turn(""), None);
        assert!(conversation.is_empty());
    }

    #[test]
    fn test_complete_errors() {
        let mut conversation = Conversation::new();
        assert_eq!(
            conversation.complete_turn(3, "x"),
            Err(ConversationError::UnknownTurn { index: 3 })
        );

        let idx = conversation.begin_turn("hi").unwrap();
        conversation.complete_turn(idx, "hello").unwrap();
        assert_eq!(
            conversation.complete_turn(idx, "again"),
            Err(ConversationError::AlreadyAnswered { index: idx })
        );
        assert_eq!(conversation.get(idx).unwrap().bot_text.as_deref(), Some("hello"));
    }

    #[test]
    fn test_turns_keep_order() {
        let mut conversation = Conversation::new();
        let a = conversation.begin_turn("first").unwrap();
        let b = conversation.begin_turn("second").unwrap();
        conversation.complete_turn(b, "two").unwrap();
        conversation.complete_turn(a, "one").unwrap();
        let users: Vec<&str> = conversation.turns().iter().map(|t| t.user_text.as_str()).collect();
        assert_eq!(users, vec!["first", "second"]);
        assert_eq!(conversation.len(), 2);
    }

    #[test]
    fn test_format_clock() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 15, 7, 0).unwrap();
        assert_eq!(format_clock(&ts), "3:07 PM");
        let morning = Utc.with_ymd_and_hms(2024, 5, 1, 0, 30, 0).unwrap();
        assert_eq!(format_clock(&morning), "12:30 AM");
    }
}
