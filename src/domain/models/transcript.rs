use serde::{Deserialize, Serialize};

use super::Message;

pub const WELCOME_MESSAGE: &str =
    "Welcome to LegalAssist. How may I help you with legal information today?";

/// Ordered conversation turns shown to the user.
///
/// Always holds at least the seeded welcome message. Messages are only ever
/// appended; [`Transcript::reset`] is the single way to drop them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::assistant(WELCOME_MESSAGE)],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn reset(&mut self) {
        self.messages = vec![Message::assistant(WELCOME_MESSAGE)];
    }

    pub fn is_fresh(&self) -> bool {
        self.messages.len() == 1
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
