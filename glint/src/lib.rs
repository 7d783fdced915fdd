//! glint - the core scan -> parse -> resolve -> evaluate pipeline.
//!
//! This crate is the library the file runner, HTTP endpoint, and host
//! binding each wrap (none of which live here — see `faxc-drv`'s own
//! split between its library and its binary for the same division of
//! labor). [`run`] takes source text and a sink and returns the unified
//! [`Error`]; [`run_to_string`] is the buffered convenience form.

use std::io::Write;

use tracing::{debug, instrument};

pub use glint_eval::{Callable, EnvRef, Environment, RuntimeError, UserFunction, Value};
pub use glint_lex::ScanError;
pub use glint_par::{ParseError, ParseErrorEntry};
pub use glint_sem::ResolveError;

/// Every way a `Run` call can fail, composed from the four pipeline
/// stages. `Display` always surfaces a line number somewhere in its
/// text, per the user-visible requirement that a failure is
/// attributable to a place in the source.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error("failed to write interpreter output to the sink: {0}")]
    Sink(#[source] std::io::Error),
}

/// Knobs a host can set for one `run`/`run_to_string` call. Empty today —
/// the pipeline otherwise takes its behavior entirely from `source` — but
/// kept as a struct rather than a bare `()` parameter so a host-visible
/// option (a source size limit, say) has somewhere to land without
/// breaking every caller's signature.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    _private: (),
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Runs a program through the full pipeline, writing any `print` output
/// to `sink`. Output already produced before a runtime failure is still
/// written: a program that prints three lines and then divides by zero
/// leaves those three lines in `sink` alongside the returned `Error`.
#[instrument(skip_all, fields(source_len = source.len()))]
pub fn run(source: &str, sink: &mut dyn Write) -> Result<(), Error> {
    run_with_options(source, sink, &RunOptions::new())
}

/// [`run`], with explicit [`RunOptions`].
#[instrument(skip_all, fields(source_len = source.len()))]
pub fn run_with_options(source: &str, sink: &mut dyn Write, _options: &RunOptions) -> Result<(), Error> {
    let stmts = parse_stage(source)?;
    let map = resolve_stage(&stmts)?;

    let (output, result) = evaluate_stage(&stmts, map);
    sink.write_all(&output).map_err(Error::Sink)?;
    result?;

    Ok(())
}

/// [`run`], buffering the sink and returning its accumulated text
/// instead of threading one through. On failure, whatever `print` output
/// preceded the failure is discarded along with the buffer — a caller
/// that needs the partial text on error should call [`run`] with its own
/// sink instead.
#[instrument(skip_all, fields(source_len = source.len()))]
pub fn run_to_string(source: &str) -> Result<String, Error> {
    let mut buffer = Vec::new();
    run(source, &mut buffer)?;
    Ok(String::from_utf8(buffer).expect("print output is always valid UTF-8"))
}

#[instrument(skip_all)]
fn parse_stage(source: &str) -> Result<Vec<glint_par::Stmt>, Error> {
    let tokens = glint_lex::scan(source)?;
    debug!(token_count = tokens.len(), "scan complete");

    let stmts = glint_par::parse(tokens)?;
    debug!(statement_count = stmts.len(), "parse complete");

    Ok(stmts)
}

#[instrument(skip_all)]
fn resolve_stage(stmts: &[glint_par::Stmt]) -> Result<glint_sem::ResolutionMap, Error> {
    let map = glint_sem::resolve(stmts)?;
    debug!(resolved_bindings = map.len(), "resolve complete");
    Ok(map)
}

#[instrument(skip_all)]
fn evaluate_stage(stmts: &[glint_par::Stmt], map: glint_sem::ResolutionMap) -> (Vec<u8>, Result<(), RuntimeError>) {
    let (output, result) = glint_eval::evaluate(stmts, map);
    debug!(output_bytes = output.len(), ok = result.is_ok(), "evaluate complete");
    (output, result)
}
