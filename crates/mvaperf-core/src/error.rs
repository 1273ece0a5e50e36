//! Error types for mvaperf

use thiserror::Error;

/// mvaperf error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A line of a classifier output file does not match its declared layout.
    ///
    /// Always fatal: the run aborts before the line touches any histogram.
    #[error("Malformed line {line} in {path}: {reason} (tokens: {tokens:?})")]
    MalformedLine {
        /// File the line was read from
        path: String,
        /// 1-based line number
        line: usize,
        /// What was wrong with it
        reason: String,
        /// The offending tokens, as split by the reader
        tokens: Vec<String>,
    },

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),
}

impl Error {
    /// Build a [`Error::MalformedLine`] from borrowed tokens.
    pub fn malformed(path: &str, line: usize, reason: impl Into<String>, tokens: &[&str]) -> Self {
        Error::MalformedLine {
            path: path.to_string(),
            line,
            reason: reason.into(),
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_lists_tokens() {
        let e = Error::malformed("scores.txt", 7, "expected 1 token, found 2", &["0.3", "x"]);
        let msg = e.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("scores.txt"));
        assert!(msg.contains("\"0.3\""));
        assert!(msg.contains("\"x\""));
    }
}
