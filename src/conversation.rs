use crate::api::Transport;
use crate::app::App;
use crate::error::{RestavoError, Result};

pub const GREETING: &str = "Hi! I'm your Restavo assistant. Ask me about the best destinations, \
                            your bookings, or where to travel next!";
pub const UNREACHABLE_REPLY: &str =
    "Sorry, the server can't be reached right now. Please check your connection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingResponse,
}

/// Ordered chat transcript plus the send guard. Only one request may be in flight;
/// a send while awaiting is rejected, not queued. Roles are not forced to alternate.
#[derive(Debug, Clone)]
pub struct ChatHistory {
    entries: Vec<ChatEntry>,
    state: ChatState,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self {
            entries: vec![ChatEntry {
                role: Role::Model,
                text: GREETING.to_string(),
            }],
            state: ChatState::Idle,
        }
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn can_send(&self) -> bool {
        self.state == ChatState::Idle
    }

    /// Record the user's turn and enter `AwaitingResponse`. Returns the prompt to relay,
    /// which is the latest user entry only.
    pub fn begin_send(&mut self, text: &str) -> Result<String> {
        if self.state == ChatState::AwaitingResponse {
            return Err(RestavoError::Busy(
                "still waiting for the assistant's reply".to_string(),
            ));
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(RestavoError::Validation(
                "Type a message before sending.".to_string(),
            ));
        }

        self.entries.push(ChatEntry {
            role: Role::User,
            text: text.to_string(),
        });
        self.state = ChatState::AwaitingResponse;

        self.last_user_text()
            .map(String::from)
            .ok_or_else(|| RestavoError::Validation("No user message to send.".to_string()))
    }

    /// Append the model's turn and return to `Idle`.
    pub fn finish(&mut self, reply: String) -> &ChatEntry {
        self.state = ChatState::Idle;
        self.entries.push(ChatEntry {
            role: Role::Model,
            text: reply,
        });
        &self.entries[self.entries.len() - 1]
    }

    fn last_user_text(&self) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.role == Role::User)
            .map(|e| e.text.as_str())
    }
}

impl Default for ChatHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> App<T> {
    /// Send one chat message. Failures never escape past validation and the busy guard:
    /// they become the model's reply text.
    pub async fn send_chat(&mut self, text: &str) -> Result<&ChatEntry> {
        let prompt = self.chat.begin_send(text)?;

        let reply = match self.client.chat(&prompt, &mut self.rng).await {
            Ok(reply) => reply,
            Err(RestavoError::ServerRejected { status, message }) => {
                tracing::warn!(status, "Assistant returned an error");
                message
            }
            Err(e) => {
                tracing::warn!(error = %e, "Assistant unreachable");
                UNREACHABLE_REPLY.to_string()
            }
        };

        Ok(self.chat.finish(reply))
    }
}
