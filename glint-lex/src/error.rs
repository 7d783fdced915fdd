use glint_util::Line;

/// A malformed token: an unexpected character, an unterminated string, or
/// a malformed number. Always attributed to the line it was found on.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("scan error at line {line}: {message}")]
pub struct ScanError {
    pub line: Line,
    pub message: String,
}

impl ScanError {
    pub fn new(line: Line, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}
