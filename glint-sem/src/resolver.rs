//! The static resolver: a pre-pass over the already-parsed AST that
//! annotates every `Variable`/`Assignment` node with a lexical-scope
//! depth and rejects statically detectable misuse of `return`/`break`/
//! `continue` and of a variable's own initializer.
//!
//! Grounded directly on the original `govetryx` `Resolver` type
//! (`resolver.go`): the scope stack, the `declared`/`defined`
//! two-state map, `beginScope`/`endScope`, and the `insideFunction`/
//! `insideLoop` flags are all carried over unchanged in shape. The one
//! deliberate deviation is fail-fast propagation via `?` instead of
//! accumulating — matched here, not the parser's composite-error style,
//! because that is what the original resolver itself does.

use glint_lex::Token;
use glint_par::{Expr, FunctionDecl, Stmt};
use glint_util::{NodeId, Symbol};
use rustc_hash::FxHashMap;

use crate::error::ResolveError;
use crate::ResolutionMap;

#[derive(Clone, Copy, PartialEq)]
enum State {
    Declared,
    Defined,
}

struct Resolver {
    scopes: Vec<FxHashMap<Symbol, State>>,
    inside_function: bool,
    inside_loop: bool,
    map: ResolutionMap,
}

impl Resolver {
    fn new() -> Self {
        Self {
            scopes: Vec::new(),
            inside_function: false,
            inside_loop: false,
            map: ResolutionMap::default(),
        }
    }

    fn resolve_all(&mut self, stmts: &[Stmt]) -> Result<(), ResolveError> {
        for stmt in stmts {
            self.resolve_stmt(stmt)?;
        }
        Ok(())
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) -> Result<(), ResolveError> {
        match stmt {
            Stmt::Expr(expr) | Stmt::Print(expr) => self.resolve_expr(expr),
            Stmt::Var(name, initializer) => self.resolve_var_decl(name, initializer.as_ref()),
            Stmt::Block(stmts) => {
                self.begin_scope();
                let result = self.resolve_all(stmts);
                self.end_scope();
                result
            }
            Stmt::If(condition, then_branch, else_branch) => {
                self.resolve_expr(condition)?;
                self.resolve_stmt(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch)?;
                }
                Ok(())
            }
            Stmt::While(condition, body) => {
                self.resolve_expr(condition)?;
                let was_inside_loop = self.inside_loop;
                self.inside_loop = true;
                let result = self.resolve_stmt(body);
                self.inside_loop = was_inside_loop;
                result
            }
            Stmt::Function(decl) => self.resolve_function_decl(decl),
            Stmt::Return { line, value } => {
                if !self.inside_function {
                    return Err(ResolveError::new(*line, "cannot return from outside a function"));
                }
                if let Some(value) = value {
                    self.resolve_expr(value)?;
                }
                Ok(())
            }
            Stmt::Break { line } => {
                if !self.inside_loop {
                    return Err(ResolveError::new(*line, "cannot break outside a loop"));
                }
                Ok(())
            }
            Stmt::Continue { line } => {
                if !self.inside_loop {
                    return Err(ResolveError::new(*line, "cannot continue outside a loop"));
                }
                Ok(())
            }
        }
    }

    fn resolve_var_decl(&mut self, name: &Token, initializer: Option<&Expr>) -> Result<(), ResolveError> {
        self.declare(name)?;
        if let Some(initializer) = initializer {
            self.resolve_expr(initializer)?;
        }
        self.define(name);
        Ok(())
    }

    fn resolve_function_decl(&mut self, decl: &std::rc::Rc<FunctionDecl>) -> Result<(), ResolveError> {
        self.declare(&decl.name)?;
        self.define(&decl.name);

        let was_inside_function = self.inside_function;
        self.inside_function = true;
        self.begin_scope();

        for param in &decl.params {
            self.declare(param)?;
            self.define(param);
        }
        let result = self.resolve_all(&decl.body);

        self.end_scope();
        self.inside_function = was_inside_function;
        result
    }

    fn resolve_expr(&mut self, expr: &Expr) -> Result<(), ResolveError> {
        match expr {
            Expr::Literal(_) => Ok(()),
            Expr::Grouping(inner) | Expr::Unary(_, inner) => self.resolve_expr(inner),
            Expr::Binary(lhs, _, rhs) | Expr::Logical(lhs, _, rhs) => {
                self.resolve_expr(lhs)?;
                self.resolve_expr(rhs)
            }
            Expr::Call { callee, args, .. } => {
                self.resolve_expr(callee)?;
                for arg in args {
                    self.resolve_expr(arg)?;
                }
                Ok(())
            }
            Expr::Variable(id, name) => self.resolve_variable_expr(*id, name),
            Expr::Assignment(id, name, value) => {
                self.resolve_expr(value)?;
                self.resolve_local(*id, name);
                Ok(())
            }
        }
    }

    fn resolve_variable_expr(&mut self, id: NodeId, name: &Token) -> Result<(), ResolveError> {
        let symbol = Symbol::intern(&name.lexeme);
        if let Some(scope) = self.scopes.last() {
            if scope.get(&symbol) == Some(&State::Declared) {
                return Err(ResolveError::new(
                    name.line,
                    format!("cannot read variable '{}' in its own initializer", name.lexeme),
                ));
            }
        }
        self.resolve_local(id, name);
        Ok(())
    }

    /// Scans the scope stack innermost-to-outermost; on a hit, records
    /// `depth = distance from the top of the stack`. No hit means the
    /// name resolves as global at runtime — recorded nowhere.
    fn resolve_local(&mut self, id: NodeId, name: &Token) {
        let symbol = Symbol::intern(&name.lexeme);
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&symbol) {
                self.map.insert(id, depth as u32);
                return;
            }
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) -> Result<(), ResolveError> {
        let Some(scope) = self.scopes.last_mut() else {
            return Ok(());
        };
        let symbol = Symbol::intern(&name.lexeme);
        if scope.contains_key(&symbol) {
            return Err(ResolveError::new(
                name.line,
                format!("'{}' is already declared in this scope", name.lexeme),
            ));
        }
        scope.insert(symbol, State::Declared);
        Ok(())
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(Symbol::intern(&name.lexeme), State::Defined);
        }
    }
}

/// Resolves a parsed program, returning the `node -> depth` map the
/// evaluator consults to find a variable's environment ancestor. The
/// global scope is never pushed onto the stack, so a name unresolved
/// here is a global reference, resolved at runtime instead.
pub fn resolve(stmts: &[Stmt]) -> Result<ResolutionMap, ResolveError> {
    let mut resolver = Resolver::new();
    resolver.resolve_all(stmts)?;
    tracing::debug!(entries = resolver.map.len(), "resolved program");
    Ok(resolver.map)
}
