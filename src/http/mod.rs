pub mod client;
pub mod response;

// Re-export commonly used types
pub use client::{Client, DEFAULT_TIMEOUT};
pub use response::Response;
