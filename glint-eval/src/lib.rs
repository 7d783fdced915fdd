//! glint-eval - Value, Environment, and the tree-walking Evaluator.
//!
//! The final pipeline stage (§4.4): walks an already-parsed, already-
//! resolved program, producing `print` output through a caller-supplied
//! sink and mutating a tree of [`Environment`]s as it goes.

mod builtins;
mod environment;
mod error;
mod interpreter;
mod value;

pub use environment::{EnvRef, Environment};
pub use error::RuntimeError;
pub use interpreter::Interpreter;
pub use value::{Callable, UserFunction, Value};

use glint_par::Stmt;
use glint_sem::ResolutionMap;

/// Evaluates an already-resolved program, returning everything written
/// by `print` statements alongside the outcome. This is the evaluator's
/// half of the core pipeline API (§6); the umbrella `glint` crate wires
/// scan → parse → resolve → evaluate together behind a single
/// `run`/`run_to_string` and copies the returned buffer into the
/// caller's sink.
pub fn evaluate(statements: &[Stmt], map: ResolutionMap) -> (Vec<u8>, Result<(), RuntimeError>) {
    let mut interpreter = Interpreter::new(map);
    let result = interpreter.interpret(statements);
    (interpreter.into_output(), result)
}
