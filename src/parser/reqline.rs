//! The reqline statement parser.
//!
//! A reqline is a single line of ` | `-separated keyword sections:
//!
//! ```text
//! HTTP GET | URL https://api.example.com/data | QUERY {"page": 2}
//! ```
//!
//! `HTTP` and `URL` are required and positional (first and second); the
//! `HEADERS`, `QUERY` and `BODY` sections are optional and carry JSON
//! objects. Validation is strict and fails fast: the first rule violation
//! wins, and check order is deliberate (pipe spacing is validated on the
//! raw string before any section is inspected, so a spacing fault is always
//! reported as a spacing fault).

use serde_json::Value;

use crate::parser::types::{JsonMap, Method, ParseError, ParseResult, RequestDescriptor, Section};

/// Keywords in scan order. HTTP and URL are required, the rest optional.
const KEYWORDS: [&str; 5] = ["HTTP", "URL", "HEADERS", "QUERY", "BODY"];

/// Fields accumulated while walking the statement's sections.
///
/// A later section writes over an earlier one for the same keyword; the
/// grammar has no duplicate-section rule.
#[derive(Default)]
struct Accumulator {
    method: Option<String>,
    url: Option<String>,
    headers: Option<JsonMap>,
    query: Option<JsonMap>,
    body: Option<JsonMap>,
}

/// Parses a raw reqline statement into a [`RequestDescriptor`].
pub fn parse(reqline: &str) -> ParseResult<RequestDescriptor> {
    if reqline.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    validate_pipe_spacing(reqline)?;

    let parts: Vec<&str> = reqline.split('|').collect();
    if parts.len() < 2 {
        return Err(ParseError::MissingHttpKeyword);
    }

    let mut acc = Accumulator::default();
    for (index, part) in parts.iter().enumerate() {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        parse_part(part, index, &mut acc)?;
    }

    let method = acc.method.ok_or(ParseError::MissingHttpKeyword)?;
    let url = acc.url.ok_or(ParseError::MissingUrlKeyword)?;

    let method = match method.as_str() {
        "GET" => Method::Get,
        "POST" => Method::Post,
        _ => return Err(ParseError::InvalidHttpMethod),
    };

    Ok(RequestDescriptor {
        method,
        url,
        headers: acc.headers.unwrap_or_default(),
        query: acc.query.unwrap_or_default(),
        body: acc.body.unwrap_or_default(),
    })
}

/// Every `|` that is not at a string edge must be surrounded by exactly one
/// space on each side. Runs over the raw, unsplit statement, so multi-space
/// runs next to a pipe are caught here and never reach the section checks.
fn validate_pipe_spacing(reqline: &str) -> ParseResult<()> {
    let bytes = reqline.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'|' {
            continue;
        }
        if i > 0 && bytes[i - 1] != b' ' {
            return Err(ParseError::InvalidPipeSpacing);
        }
        if i + 1 < bytes.len() && bytes[i + 1] != b' ' {
            return Err(ParseError::InvalidPipeSpacing);
        }
        // One space exactly: a second space on either side is a violation.
        if i > 1 && bytes[i - 2] == b' ' {
            return Err(ParseError::InvalidPipeSpacing);
        }
        if i + 2 < bytes.len() && bytes[i + 2] == b' ' {
            return Err(ParseError::InvalidPipeSpacing);
        }
    }
    Ok(())
}

/// Parses one `|`-delimited section. `index` is the section's position among
/// all split parts and drives the HTTP-first / URL-second ordering rules.
fn parse_part(part: &str, index: usize, acc: &mut Accumulator) -> ParseResult<()> {
    for keyword in KEYWORDS {
        if let Some(rest) = part.strip_prefix(keyword)
            && let Some(rest) = rest.strip_prefix(' ')
        {
            return parse_keyword_section(keyword, rest, index, acc);
        }
    }

    // No uppercase keyword matched. A doubled space is the more specific
    // diagnosis; otherwise the part starts with a lower/mixed-case keyword
    // (or something unrecognizable) and the case rule is reported.
    if part.contains("  ") {
        return Err(ParseError::MultipleSpaces);
    }
    Err(ParseError::KeywordsMustBeUppercase)
}

fn parse_keyword_section(
    keyword: &'static str,
    rest: &str,
    index: usize,
    acc: &mut Accumulator,
) -> ParseResult<()> {
    // `rest` begins right after `keyword + " "`; another leading space means
    // the keyword was not followed by exactly one space.
    if rest.starts_with(' ') {
        return Err(ParseError::MissingSpaceAfterKeyword);
    }

    let value = rest.trim();
    if value.is_empty() {
        return Err(missing_value_error(keyword));
    }

    match keyword {
        "HTTP" => parse_http_section(value, index, acc),
        "URL" => parse_url_section(value, index, acc),
        "HEADERS" => parse_json_section(value, Section::Headers, acc),
        "QUERY" => parse_json_section(value, Section::Query, acc),
        "BODY" => parse_json_section(value, Section::Body, acc),
        _ => unreachable!("keyword not in KEYWORDS: {keyword}"),
    }
}

fn missing_value_error(keyword: &'static str) -> ParseError {
    match keyword {
        "HTTP" => ParseError::MissingHttpMethod,
        "URL" => ParseError::MissingUrlValue,
        _ => ParseError::MissingKeywordValue(keyword),
    }
}

/// HTTP section: positional (first), method must be uppercase. The case rule
/// fires before membership in {GET, POST}, which is only checked once the
/// whole statement has been walked.
fn parse_http_section(value: &str, index: usize, acc: &mut Accumulator) -> ParseResult<()> {
    if index != 0 {
        return Err(ParseError::HttpMustBeFirst);
    }
    if value != value.to_uppercase() {
        return Err(ParseError::HttpMethodMustBeUppercase);
    }
    acc.method = Some(value.to_string());
    Ok(())
}

/// URL section: positional (second), absolute http(s) URLs only.
fn parse_url_section(value: &str, index: usize, acc: &mut Accumulator) -> ParseResult<()> {
    if index != 1 {
        return Err(ParseError::UrlMustBeSecond);
    }
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return Err(ParseError::InvalidUrlFormat);
    }
    acc.url = Some(value.to_string());
    Ok(())
}

/// HEADERS / QUERY / BODY sections: the value must decode to a JSON object.
/// Arrays, scalars and `null` are rejected.
fn parse_json_section(value: &str, section: Section, acc: &mut Accumulator) -> ParseResult<()> {
    let parsed: Value =
        serde_json::from_str(value).map_err(|_| ParseError::InvalidJson(section))?;
    let Value::Object(map) = parsed else {
        return Err(ParseError::InvalidJson(section));
    };
    match section {
        Section::Headers => acc.headers = Some(map),
        Section::Query => acc.query = Some(map),
        Section::Body => acc.body = Some(map),
    }
    Ok(())
}
