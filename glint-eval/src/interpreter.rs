//! The tree-walking Evaluator.
//!
//! Grounded on the original `Interpreter` (`interpreter.go`): one
//! `Visit*` method per AST node, binary/unary dispatch split out by
//! operator, `executeBlock` swapping `self.env` around a statement
//! list. The one structural departure is control-flow transfer: the
//! original panics a `*ReturnObj` and returns sentinel `Break`/
//! `Continue` error values recovered with `errors.Is`; here each
//! statement evaluator returns a [`Flow`], per Design Note "Control-flow
//! transfer" — `while` intercepts `Break`/`Continue`, a function call
//! intercepts `Return`, and only a `Flow::Return`/`Break`/`Continue`
//! that survives all the way to `run` is a bug.

use std::io::Write;
use std::rc::Rc;

use glint_lex::TokenKind;
use glint_par::{Expr, FunctionDecl, Literal, Stmt};
use glint_sem::ResolutionMap;
use glint_util::Symbol;

use crate::builtins;
use crate::environment::{self, EnvRef, Environment};
use crate::error::RuntimeError;
use crate::value::{Callable, UserFunction, Value};

/// The result of executing a statement: either nothing noteworthy
/// happened (`Normal`), or control is transferring out of the
/// statements that follow, up to whatever frame is equipped to catch it.
pub(crate) enum Flow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

/// Holds the environment tree, the resolver's depth map, and the
/// accumulated `print` output for one `Interpret` call.
///
/// The output sink is an owned `Vec<u8>` rather than a borrowed
/// `dyn Write`: a trait object sink would force a lifetime parameter
/// onto `Interpreter` that then has to thread through every `Callable`
/// implementation (built-ins and user functions alike), for no benefit
/// a single-call interpreter actually needs. The umbrella `glint::run`
/// copies this buffer into the caller's sink once `Interpret` returns —
/// including the partial output already produced when it returns an
/// error, per §7's "output produced up to that point is retained".
pub struct Interpreter {
    globals: EnvRef,
    env: EnvRef,
    map: ResolutionMap,
    output: Vec<u8>,
}

impl Interpreter {
    pub fn new(map: ResolutionMap) -> Self {
        let globals = Environment::global();
        builtins::install(&globals);
        Self {
            env: Rc::clone(&globals),
            globals,
            map,
            output: Vec::new(),
        }
    }

    /// Consumes the interpreter, returning everything written by `print`
    /// statements so far, regardless of whether execution finished
    /// cleanly.
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }

    /// Executes a whole program in source order. The only `Flow` a
    /// top-level statement list may legally produce is `Normal` — the
    /// resolver rejects `return`/`break`/`continue` outside their legal
    /// contexts before this ever runs, so anything else here is an
    /// interpreter bug, not a user error.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        for statement in statements {
            match self.exec_stmt(statement)? {
                Flow::Normal => {}
                _ => return Err(RuntimeError::without_line("control-flow transfer escaped the program")),
            }
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(Flow::Normal)
            }
            Stmt::Print(expr) => {
                let value = self.eval_expr(expr)?;
                writeln!(self.output, "{}", value.printable()).expect("writing to an in-memory Vec<u8> cannot fail");
                Ok(Flow::Normal)
            }
            Stmt::Var(name, initializer) => {
                let value = match initializer {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Null,
                };
                self.env.define(Symbol::intern(&name.lexeme), value);
                Ok(Flow::Normal)
            }
            Stmt::Block(stmts) => {
                let child = Environment::child(&self.env);
                self.execute_block(stmts, child)
            }
            Stmt::If(condition, then_branch, else_branch) => {
                if self.eval_expr(condition)?.is_truthy() {
                    self.exec_stmt(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While(condition, body) => self.exec_while(condition, body),
            Stmt::Function(decl) => {
                self.define_function(decl);
                Ok(Flow::Normal)
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            }
            Stmt::Break { .. } => Ok(Flow::Break),
            Stmt::Continue { .. } => Ok(Flow::Continue),
        }
    }

    /// Runs `stmts` in `env`, restoring the previously-current
    /// environment on every exit path — normal completion, a
    /// `break`/`continue`/`return` transfer, or an error.
    pub(crate) fn execute_block(&mut self, stmts: &[Stmt], env: EnvRef) -> Result<Flow, RuntimeError> {
        let previous = std::mem::replace(&mut self.env, env);

        let mut result = Ok(Flow::Normal);
        for stmt in stmts {
            match self.exec_stmt(stmt) {
                Ok(Flow::Normal) => continue,
                other => {
                    result = other;
                    break;
                }
            }
        }

        self.env = previous;
        tracing::trace!("pop environment");
        result
    }

    fn exec_while(&mut self, condition: &Expr, body: &Stmt) -> Result<Flow, RuntimeError> {
        while self.eval_expr(condition)?.is_truthy() {
            match self.exec_stmt(body)? {
                Flow::Normal | Flow::Continue => {}
                Flow::Break => break,
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }
        Ok(Flow::Normal)
    }

    fn define_function(&mut self, decl: &Rc<FunctionDecl>) {
        let function = UserFunction {
            declaration: Rc::clone(decl),
            closure: Rc::clone(&self.env),
        };
        let callable: Rc<dyn Callable> = Rc::new(function);
        self.env.define(Symbol::intern(&decl.name.lexeme), Value::Callable(callable));
    }

    /// Invoked by [`UserFunction::call`][crate::value::Callable::call].
    /// Allocates a child of the function's *closure*, not of the
    /// caller's current environment — this is what makes recursion and
    /// nested closures see the declaration-time scope rather than the
    /// call site's.
    pub(crate) fn call_user_function(&mut self, function: &UserFunction, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let call_env = Environment::child(&function.closure);
        for (param, arg) in function.declaration.params.iter().zip(args) {
            call_env.define(Symbol::intern(&param.lexeme), arg);
        }

        match self.execute_block(&function.declaration.body, call_env)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Null),
            Flow::Break | Flow::Continue => Err(RuntimeError::without_line("break/continue escaped a function call")),
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(literal_value(literal)),
            Expr::Grouping(inner) => self.eval_expr(inner),
            Expr::Variable(id, name) => self.eval_variable(*id, name),
            Expr::Assignment(id, name, value) => self.eval_assignment(*id, name, value),
            Expr::Unary(op, operand) => self.eval_unary(op, operand),
            Expr::Binary(lhs, op, rhs) => self.eval_binary(lhs, op, rhs),
            Expr::Logical(lhs, op, rhs) => self.eval_logical(lhs, op, rhs),
            Expr::Call { line, callee, args } => self.eval_call(*line, callee, args),
        }
    }

    fn eval_variable(&mut self, id: glint_util::NodeId, name: &glint_lex::Token) -> Result<Value, RuntimeError> {
        let symbol = Symbol::intern(&name.lexeme);
        let found = match self.map.depth(id) {
            Some(depth) => environment::get_at(&self.env, depth, symbol),
            None => self.globals.get(symbol),
        };
        found.ok_or_else(|| RuntimeError::new(name.line, format!("variable '{}' is not defined", name.lexeme)))
    }

    fn eval_assignment(&mut self, id: glint_util::NodeId, name: &glint_lex::Token, value: &Expr) -> Result<Value, RuntimeError> {
        let value = self.eval_expr(value)?;
        let symbol = Symbol::intern(&name.lexeme);

        match self.map.depth(id) {
            Some(depth) => environment::assign_at(&self.env, depth, symbol, value.clone()),
            None => {
                if !self.globals.assign(symbol, value.clone()) {
                    return Err(RuntimeError::new(name.line, format!("variable '{}' is not defined", name.lexeme)));
                }
            }
        }

        Ok(value)
    }

    fn eval_unary(&mut self, op: &glint_lex::Token, operand: &Expr) -> Result<Value, RuntimeError> {
        let operand = self.eval_expr(operand)?;
        match op.kind {
            TokenKind::Bang => Ok(Value::Bool(!operand.is_truthy())),
            TokenKind::Minus => match operand {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => Err(RuntimeError::new(
                    op.line,
                    format!("unary '-' requires a number, found {}", other.type_name()),
                )),
            },
            other => unreachable!("parser never produces a unary operator of kind {other:?}"),
        }
    }

    fn eval_binary(&mut self, lhs: &Expr, op: &glint_lex::Token, rhs: &Expr) -> Result<Value, RuntimeError> {
        let lhs = self.eval_expr(lhs)?;
        let rhs = self.eval_expr(rhs)?;

        match op.kind {
            TokenKind::EqualEqual => Ok(Value::Bool(lhs.values_equal(&rhs))),
            TokenKind::NotEqual => Ok(Value::Bool(!lhs.values_equal(&rhs))),

            TokenKind::Plus => match (&lhs, &rhs) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}").into())),
                _ => Err(type_error(op.line, "+", &lhs, &rhs)),
            },
            TokenKind::Minus => numeric_binary(op.line, "-", &lhs, &rhs, |a, b| Ok(a - b)),
            TokenKind::Star => numeric_binary(op.line, "*", &lhs, &rhs, |a, b| Ok(a * b)),
            TokenKind::Slash => numeric_binary(op.line, "/", &lhs, &rhs, |a, b| {
                if b == 0.0 {
                    Err(RuntimeError::new(op.line, "division by zero"))
                } else {
                    Ok(a / b)
                }
            }),
            TokenKind::Modulus => numeric_binary(op.line, "%", &lhs, &rhs, |a, b| {
                if b == 0.0 {
                    Err(RuntimeError::new(op.line, "division by zero"))
                } else {
                    Ok(a % b)
                }
            }),

            TokenKind::Lower => numeric_compare(op.line, "<", &lhs, &rhs, |a, b| a < b),
            TokenKind::LowerOrEqual => numeric_compare(op.line, "<=", &lhs, &rhs, |a, b| a <= b),
            TokenKind::Greater => numeric_compare(op.line, ">", &lhs, &rhs, |a, b| a > b),
            TokenKind::GreaterOrEqual => numeric_compare(op.line, ">=", &lhs, &rhs, |a, b| a >= b),

            other => unreachable!("parser never produces a binary operator of kind {other:?}"),
        }
    }

    fn eval_logical(&mut self, lhs: &Expr, op: &glint_lex::Token, rhs: &Expr) -> Result<Value, RuntimeError> {
        let lhs = self.eval_expr(lhs)?;

        match op.kind {
            TokenKind::Or if lhs.is_truthy() => Ok(lhs),
            TokenKind::And if !lhs.is_truthy() => Ok(lhs),
            TokenKind::Or | TokenKind::And => self.eval_expr(rhs),
            other => unreachable!("parser never produces a logical operator of kind {other:?}"),
        }
    }

    fn eval_call(&mut self, line: glint_util::Line, callee: &Expr, args: &[Expr]) -> Result<Value, RuntimeError> {
        let callee = self.eval_expr(callee)?;

        let mut evaluated = Vec::with_capacity(args.len());
        for arg in args {
            evaluated.push(self.eval_expr(arg)?);
        }

        let Value::Callable(callable) = callee else {
            return Err(RuntimeError::new(line, format!("'{}' is not callable", callee.type_name())));
        };

        if callable.arity() != evaluated.len() {
            return Err(RuntimeError::new(
                line,
                format!(
                    "'{}' expects {} argument(s) but got {}",
                    callable.name(),
                    callable.arity(),
                    evaluated.len()
                ),
            ));
        }

        callable.call(self, evaluated).map_err(|e| {
            if e.line == 0 {
                RuntimeError::new(line, e.message)
            } else {
                e
            }
        })
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::String(Rc::clone(s)),
    }
}

fn numeric_binary(
    line: glint_util::Line,
    op: &str,
    lhs: &Value,
    rhs: &Value,
    f: impl FnOnce(f64, f64) -> Result<f64, RuntimeError>,
) -> Result<Value, RuntimeError> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => f(*a, *b).map(Value::Number),
        _ => Err(type_error(line, op, lhs, rhs)),
    }
}

fn numeric_compare(line: glint_util::Line, op: &str, lhs: &Value, rhs: &Value, f: impl FnOnce(f64, f64) -> bool) -> Result<Value, RuntimeError> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(f(*a, *b))),
        _ => Err(type_error(line, op, lhs, rhs)),
    }
}

fn type_error(line: glint_util::Line, op: &str, lhs: &Value, rhs: &Value) -> RuntimeError {
    RuntimeError::new(
        line,
        format!("'{op}' is not defined for {} and {}", lhs.type_name(), rhs.type_name()),
    )
}
