use serde::{Deserialize, Serialize};

/// Generic API response wrapper used for non-view answers and errors
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response without data
    pub fn success_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        let msg = message.into();
        Self {
            success: false,
            message: msg.clone(),
            data: None,
            error: Some(msg),
        }
    }
}

/// A rendered view: the name of the page and the context it is rendered with.
#[derive(Debug, Serialize)]
pub struct View<T> {
    pub view: &'static str,
    pub context: T,
}

impl<T: Serialize> View<T> {
    pub fn new(view: &'static str, context: T) -> Self {
        Self { view, context }
    }
}
