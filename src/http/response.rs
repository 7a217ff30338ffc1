use serde_json::Value;

/// Raw outcome of one transport call: status plus decoded payload.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub data: Value,
}

impl Response {
    /// Keeps the payload as parsed JSON when it is JSON, as a plain string
    /// otherwise.
    pub fn from_text(status: u16, text: String) -> Self {
        let data = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Self { status, data }
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}
