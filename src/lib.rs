pub mod error;
pub mod executor;
pub mod http;
pub mod logger;
pub mod parser;
pub mod server;

// Re-export commonly used types
pub use error::{ReqlineError, Result};
