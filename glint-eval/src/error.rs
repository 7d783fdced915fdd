use glint_util::Line;

/// A failure raised while walking the AST. Grounded on the original
/// `RuntimeError{Message, Line}`: `line == 0` means "no source position
/// applies" (e.g. a host-level I/O failure), in which case `Display`
/// omits the "at line N" clause rather than printing a nonsensical one.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub struct RuntimeError {
    pub message: String,
    pub line: Line,
}

impl RuntimeError {
    pub fn new(line: Line, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }

    /// A runtime error with no particular source position.
    pub fn without_line(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: 0,
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line != 0 {
            write!(f, "runtime error at line {}: {}", self.line, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}
