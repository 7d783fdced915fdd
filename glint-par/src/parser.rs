//! Parser core: token cursor, error recovery, and the top-level entry
//! point. Precedence-level expression parsing lives in `expr.rs`,
//! statement-level parsing in `stmt.rs` — the same three-way split the
//! teacher crate uses (`lib.rs`/`expr.rs`/`stmt.rs`).

use glint_lex::{Token, TokenKind};
use glint_util::NodeIdGen;

use crate::ast::Stmt;
use crate::error::{ParseError, ParseErrorEntry};

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    pub(crate) node_ids: NodeIdGen,
    errors: Vec<ParseErrorEntry>,
}

/// Tokens that may legally open a new declaration or statement; used by
/// `synchronize` to decide where it is safe to resume parsing.
const SYNC_STARTS: &[TokenKind] = &[
    TokenKind::Fn,
    TokenKind::VarDeclarator,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Return,
    TokenKind::Print,
];

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            current: 0,
            node_ids: NodeIdGen::new(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// True when the current token is an identifier and the *next* token
    /// is `:=` — the short-declaration lookahead from §4.2.
    pub(crate) fn at_short_declaration(&self) -> bool {
        self.check(TokenKind::Identifier)
            && self
                .tokens
                .get(self.current + 1)
                .is_some_and(|t| t.kind == TokenKind::VarShortDeclarator)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, message: &str) -> Result<&Token, ParseErrorEntry> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let line = self.peek().line;
            Err(ParseErrorEntry::new(line, message))
        }
    }

    /// Advances past the offending declaration: tokens until after the
    /// next `;`, or until the next token opens a new declaration/statement.
    pub(crate) fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if SYNC_STARTS.contains(&self.peek().kind) {
                return;
            }
            self.advance();
        }
    }

    pub(crate) fn declaration(&mut self) -> Result<Stmt, ParseErrorEntry> {
        if self.check(TokenKind::Fn) {
            self.function_decl()
        } else if self.check(TokenKind::VarDeclarator) {
            self.var_decl()
        } else if self.at_short_declaration() {
            self.short_decl()
        } else {
            self.statement()
        }
    }

    fn declaration_recovering(&mut self) -> Option<Stmt> {
        match self.declaration() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                self.errors.push(err);
                self.synchronize();
                None
            }
        }
    }

    /// Parses the body of a block, having already consumed the closing
    /// brace check is left to the caller — this returns once `}` or EOF
    /// is reached.
    pub(crate) fn block_body(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration_recovering() {
                stmts.push(stmt);
            }
        }
        stmts
    }
}

/// Parses a full token stream into an ordered statement list, or a
/// composite [`ParseError`] carrying every error collected while
/// recovering from bad declarations, in source order.
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Stmt>, ParseError> {
    let mut parser = Parser::new(tokens);
    let mut stmts = Vec::new();

    while !parser.is_at_end() {
        if let Some(stmt) = parser.declaration_recovering() {
            stmts.push(stmt);
        }
    }

    if parser.errors.is_empty() {
        tracing::debug!(statements = stmts.len(), "parsed source");
        Ok(stmts)
    } else {
        Err(ParseError(std::mem::take(&mut parser.errors)))
    }
}
