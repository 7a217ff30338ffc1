pub mod reqline;
pub mod types;

// Re-export commonly used types
pub use reqline::parse;
pub use types::{JsonMap, Method, ParseError, ParseResult, RequestDescriptor, Section};
