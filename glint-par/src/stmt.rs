//! Declaration- and statement-level parsing: function/var declarations
//! and the statement forms (`if`, `while`, `return`, `print`, `break`,
//! `continue`, blocks, and bare expression statements).

use std::rc::Rc;

use glint_lex::TokenKind;

use crate::ast::{FunctionDecl, Stmt};
use crate::error::ParseErrorEntry;
use crate::parser::Parser;

impl Parser {
    /// `functionDecl -> "fn" IDENTIFIER "(" parameters? ")" block`
    pub(crate) fn function_decl(&mut self) -> Result<Stmt, ParseErrorEntry> {
        self.advance(); // `fn`
        let name = self.expect(TokenKind::Identifier, "expected function name")?.clone();
        self.expect(TokenKind::LeftParentheses, "expected '(' after function name")?;
        let params = self.parameters()?;
        self.expect(TokenKind::RightParentheses, "expected ')' after parameters")?;
        self.expect(TokenKind::LeftBrace, "expected '{' before function body")?;
        let body = self.block_body();
        self.expect(TokenKind::RightBrace, "expected '}' after function body")?;

        Ok(Stmt::Function(Rc::new(FunctionDecl { name, params, body })))
    }

    fn parameters(&mut self) -> Result<Vec<glint_lex::Token>, ParseErrorEntry> {
        let mut params = Vec::new();
        if !self.check(TokenKind::RightParentheses) {
            loop {
                params.push(self.expect(TokenKind::Identifier, "expected parameter name")?.clone());
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(params)
    }

    /// `varDecl -> "dec" IDENTIFIER ( "=" expression )? ";"`
    pub(crate) fn var_decl(&mut self) -> Result<Stmt, ParseErrorEntry> {
        self.advance(); // `dec`
        let name = self.expect(TokenKind::Identifier, "expected variable name")?.clone();
        let initializer = if self.match_token(TokenKind::Equal) {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "expected ';' after variable declaration")?;
        Ok(Stmt::Var(name, initializer))
    }

    /// `shortDecl -> IDENTIFIER ":=" expression ";"`
    ///
    /// Sugar for a `dec` with a mandatory initializer — the lookahead in
    /// `Parser::at_short_declaration` is what routes here instead of
    /// `statement`/`expression_statement`.
    pub(crate) fn short_decl(&mut self) -> Result<Stmt, ParseErrorEntry> {
        let name = self.advance().clone();
        self.advance(); // `:=`
        let initializer = self.expression()?;
        self.expect(TokenKind::Semicolon, "expected ';' after variable declaration")?;
        Ok(Stmt::Var(name, Some(initializer)))
    }

    pub(crate) fn statement(&mut self) -> Result<Stmt, ParseErrorEntry> {
        if self.check(TokenKind::If) {
            return self.if_stmt();
        }
        if self.check(TokenKind::While) {
            return self.while_stmt();
        }
        if self.check(TokenKind::Return) {
            return self.return_stmt();
        }
        if self.check(TokenKind::Print) {
            return self.print_stmt();
        }
        if self.check(TokenKind::Break) {
            return self.break_stmt();
        }
        if self.check(TokenKind::Continue) {
            return self.continue_stmt();
        }
        if self.check(TokenKind::LeftBrace) {
            return self.block();
        }
        self.expr_stmt()
    }

    /// `ifStmt -> "if" expression statement ( "else" statement )?`
    fn if_stmt(&mut self) -> Result<Stmt, ParseErrorEntry> {
        self.advance(); // `if`
        let condition = self.expression()?;
        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };
        Ok(Stmt::If(condition, then_branch, else_branch))
    }

    /// `whileStmt -> "while" expression statement`
    fn while_stmt(&mut self) -> Result<Stmt, ParseErrorEntry> {
        self.advance(); // `while`
        let condition = self.expression()?;
        let body = Box::new(self.statement()?);
        Ok(Stmt::While(condition, body))
    }

    /// `returnStmt -> "return" expression? ";"`
    fn return_stmt(&mut self) -> Result<Stmt, ParseErrorEntry> {
        let line = self.advance().line; // `return`
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(TokenKind::Semicolon, "expected ';' after return value")?;
        Ok(Stmt::Return { line, value })
    }

    /// `printStmt -> "print" expression ";"`
    fn print_stmt(&mut self) -> Result<Stmt, ParseErrorEntry> {
        self.advance(); // `print`
        let value = self.expression()?;
        self.expect(TokenKind::Semicolon, "expected ';' after value")?;
        Ok(Stmt::Print(value))
    }

    /// `breakStmt -> "break" ";"`
    fn break_stmt(&mut self) -> Result<Stmt, ParseErrorEntry> {
        let line = self.advance().line; // `break`
        self.expect(TokenKind::Semicolon, "expected ';' after 'break'")?;
        Ok(Stmt::Break { line })
    }

    /// `continueStmt -> "continue" ";"`
    fn continue_stmt(&mut self) -> Result<Stmt, ParseErrorEntry> {
        let line = self.advance().line; // `continue`
        self.expect(TokenKind::Semicolon, "expected ';' after 'continue'")?;
        Ok(Stmt::Continue { line })
    }

    /// `block -> "{" declaration* "}"`
    fn block(&mut self) -> Result<Stmt, ParseErrorEntry> {
        self.expect(TokenKind::LeftBrace, "expected '{'")?;
        let stmts = self.block_body();
        self.expect(TokenKind::RightBrace, "expected '}' after block")?;
        Ok(Stmt::Block(stmts))
    }

    /// `exprStmt -> expression ";"`
    fn expr_stmt(&mut self) -> Result<Stmt, ParseErrorEntry> {
        let expr = self.expression()?;
        self.expect(TokenKind::Semicolon, "expected ';' after expression")?;
        Ok(Stmt::Expr(expr))
    }
}
