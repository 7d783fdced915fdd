use glint_util::Line;

/// A single parse failure, attributed to the line it was found on.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("parse error at line {line}: {message}")]
pub struct ParseErrorEntry {
    pub line: Line,
    pub message: String,
}

impl ParseErrorEntry {
    pub fn new(line: Line, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// A composite of every error the parser collected while synchronizing
/// past bad declarations, in source order. Printed the way the original
/// implementation's `ParsingErr` does: a 1-based, numbered list.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub struct ParseError(pub Vec<ParseErrorEntry>);

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            writeln!(f, "error #{}: {}", i + 1, err)?;
        }
        Ok(())
    }
}
