use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// JSON object used for the HEADERS / QUERY / BODY sections.
pub type JsonMap = Map<String, Value>;

/// The two HTTP methods a reqline statement may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Method {
    #[serde(rename = "GET")]
    Get,
    #[serde(rename = "POST")]
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated reqline statement, ready for execution.
///
/// `method` and `url` are always present; the three maps default to empty
/// when their section is absent from the statement.
#[derive(Debug, Clone, Serialize)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: String,
    pub headers: JsonMap,
    pub query: JsonMap,
    pub body: JsonMap,
}

/// The JSON-carrying keyword sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Headers,
    Query,
    Body,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Headers => "HEADERS",
            Section::Query => "QUERY",
            Section::Body => "BODY",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syntax errors for reqline statements.
///
/// The `Display` text of each variant is part of the public contract: the
/// service layer sends it to clients verbatim, so the wording is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid input format")]
    EmptyInput,

    #[error("Invalid spacing around pipe delimiter")]
    InvalidPipeSpacing,

    #[error("Missing required HTTP keyword")]
    MissingHttpKeyword,

    #[error("Missing required URL keyword")]
    MissingUrlKeyword,

    #[error("Invalid HTTP method. Only GET and POST are supported")]
    InvalidHttpMethod,

    #[error("HTTP method must be uppercase")]
    HttpMethodMustBeUppercase,

    #[error("HTTP keyword must be first")]
    HttpMustBeFirst,

    #[error("URL keyword must be second")]
    UrlMustBeSecond,

    #[error("Missing HTTP method")]
    MissingHttpMethod,

    #[error("Missing URL value")]
    MissingUrlValue,

    #[error("Invalid URL format")]
    InvalidUrlFormat,

    #[error("Multiple spaces found where single space expected")]
    MultipleSpaces,

    #[error("Keywords must be uppercase")]
    KeywordsMustBeUppercase,

    #[error("Missing space after keyword")]
    MissingSpaceAfterKeyword,

    #[error("Missing value for {0}")]
    MissingKeywordValue(&'static str),

    #[error("Invalid JSON format in {0} section")]
    InvalidJson(Section),
}

/// Result type alias for the statement parser.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_as_str() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Post.as_str(), "POST");
    }

    #[test]
    fn test_method_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Method::Get).unwrap(), "\"GET\"");
        assert_eq!(serde_json::to_string(&Method::Post).unwrap(), "\"POST\"");
    }

    #[test]
    fn test_error_messages_are_fixed() {
        assert_eq!(
            ParseError::InvalidPipeSpacing.to_string(),
            "Invalid spacing around pipe delimiter"
        );
        assert_eq!(
            ParseError::InvalidHttpMethod.to_string(),
            "Invalid HTTP method. Only GET and POST are supported"
        );
        assert_eq!(
            ParseError::MissingKeywordValue("HEADERS").to_string(),
            "Missing value for HEADERS"
        );
        assert_eq!(
            ParseError::InvalidJson(Section::Body).to_string(),
            "Invalid JSON format in BODY section"
        );
    }
}
