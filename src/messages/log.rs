use super::types::Message;
use parking_lot::RwLock;
use std::sync::Arc;

/// Append-only, ordered conversation log. Shared between the engine and
/// the view; entries are never mutated or removed, the whole log is simply
/// dropped with the widget.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn append(&self, message: Message) {
        self.messages.write().push(message);
    }

    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    pub fn last(&self) -> Option<Message> {
        self.messages.read().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Sender;

    #[test]
    fn test_append_preserves_order() {
        let log = MessageLog::new();
        log.append(Message::new(Sender::User, "hola"));
        log.append(Message::new(Sender::Assistant, "buenas"));

        let all = log.snapshot();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].text, "hola");
        assert_eq!(all[1].text, "buenas");
        assert_eq!(log.last().unwrap().text, "buenas");
    }
}
