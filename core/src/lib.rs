//! Core library: reply formatting, conversation state, and the backend seam.

pub mod backend;
pub mod blocks;
pub mod conversation;
pub mod error;
pub mod formatter;
pub mod render;
pub mod session;

pub use blocks::{Availability, DisplayBlock, SectionIcon};
pub use conversation::{Conversation, Turn};
pub use formatter::format_reply;
pub use render::{BlockRenderer, PlainRenderer};
pub use session::{ChatSession, FALLBACK_REPLY};
