use glint_util::Line;

/// A statically detectable scoping or control-flow violation. Unlike the
/// parser, the resolver fails fast on the first error — grounded on the
/// original resolver's `Resolve` loop, which returns as soon as any
/// statement's `Accept` yields an error rather than collecting a batch.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("resolve error at line {line}: {message}")]
pub struct ResolveError {
    pub line: Line,
    pub message: String,
}

impl ResolveError {
    pub fn new(line: Line, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}
