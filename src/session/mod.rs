//! Chat session state: the append-only conversation and its invariants.

use crate::agent::AgentRunner;
use crate::error::AbacusError;
use crate::types::ChatMessage;

/// Greeting seeding every fresh chat session.
pub const GREETING: &str = "Hi, I am a math chatbot who can answer all your math questions.";

/// A conversation's message history. Append-only for the session lifetime.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user message.
    pub fn add_user_message(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::user(text));
    }

    /// Add an assistant message.
    pub fn add_assistant_message(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(text));
    }

    /// Get all messages.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// One user's chat session: a conversation plus the runner answering into it.
///
/// A successful submission appends exactly two turns (user, assistant); a
/// failed one leaves the conversation untouched.
pub struct ChatSession {
    conversation: Conversation,
    runner: AgentRunner,
}

impl ChatSession {
    /// Create a session seeded with the assistant greeting.
    pub fn new(runner: AgentRunner) -> Self {
        let mut conversation = Conversation::new();
        conversation.add_assistant_message(GREETING);
        Self {
            conversation,
            runner,
        }
    }

    /// Create a session with an empty history.
    pub fn without_greeting(runner: AgentRunner) -> Self {
        Self {
            conversation: Conversation::new(),
            runner,
        }
    }

    /// Answer one question and record the exchange.
    pub async fn submit(&mut self, question: &str) -> Result<String, AbacusError> {
        let answer = self.runner.answer(question).await?;
        self.conversation.add_user_message(question.trim());
        self.conversation.add_assistant_message(answer.clone());
        Ok(answer)
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("turns", &self.conversation.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn conversation_appends_in_order() {
        let mut conversation = Conversation::new();
        conversation.add_user_message("What is 2 + 2?");
        conversation.add_assistant_message("4");

        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation.messages()[0].role, Role::User);
        assert_eq!(conversation.messages()[1].role, Role::Assistant);
        assert_eq!(conversation.messages()[1].content, "4");
    }
}
