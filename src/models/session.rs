use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

impl MessageLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageLevel::Info => "info",
            MessageLevel::Warning => "warning",
            MessageLevel::Error => "error",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "info" => Some(MessageLevel::Info),
            "warning" => Some(MessageLevel::Warning),
            "error" => Some(MessageLevel::Error),
            _ => None,
        }
    }
}

/// A one-shot message shown to the user on the next rendered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: MessageLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: MessageLevel::Error, message: message.into() }
    }
}

/// Per-request view of the caller's login session.
///
/// Loaded by the `SessionContext` extractor and written back with
/// `db::sessions::save_session`.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    pub user_id: i64,
    pub username: String,
    /// The exercise whose edit form was opened last
    pub edit_exercise_id: Option<i64>,
    pending_messages: Vec<FlashMessage>,
}

impl SessionContext {
    pub fn new(session_id: String, user_id: i64, username: String, edit_exercise_id: Option<i64>) -> Self {
        Self {
            session_id,
            user_id,
            username,
            edit_exercise_id,
            pending_messages: Vec::new(),
        }
    }

    /// Queue a message for the next view the user gets to see.
    pub fn flash(&mut self, message: FlashMessage) {
        self.pending_messages.push(message);
    }

    pub fn take_pending_messages(&mut self) -> Vec<FlashMessage> {
        std::mem::take(&mut self.pending_messages)
    }
}
