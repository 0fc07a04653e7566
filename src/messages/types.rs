use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

/// One entry in the conversation log. Messages are created by the submit
/// handler (user) or the reply handler (assistant) and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    /// Whether the text arrived through speech recognition rather than typing
    pub from_voice: bool,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
            from_voice: false,
        }
    }

    pub fn from_voice(mut self) -> Self {
        self.from_voice = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_construction() {
        let msg = Message::new(Sender::User, "hola");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "hola");
        assert!(!msg.from_voice);

        let spoken = Message::new(Sender::User, "hola").from_voice();
        assert!(spoken.from_voice);
    }
}
