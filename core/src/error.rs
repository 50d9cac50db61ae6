use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConversationError {
    #[error("no turn at index {index}")]
    UnknownTurn { index: usize },

    #[error("turn {index} already has a reply")]
    AlreadyAnswered { index: usize },
}
