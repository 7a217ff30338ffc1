use thiserror::Error;

/// Crate-level error.
///
/// Parser and executor failures carry their own typed errors
/// ([`crate::parser::ParseError`], [`crate::executor::ExecuteError`]) and
/// are handled where they occur; what remains at this level is the
/// infrastructure that can fail underneath the service itself.
#[derive(Error, Debug)]
pub enum ReqlineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the reqline crate
pub type Result<T> = std::result::Result<T, ReqlineError>;
