//! Expression parsing: the precedence chain from `assignment` down to
//! `primary`, one method per level, each calling the next tighter level
//! for its operands — the standard recursive-descent shape `faxc-par`
//! uses in its own `expr.rs`.

use glint_lex::TokenKind;

use crate::ast::{Expr, Literal};
use crate::error::ParseErrorEntry;
use crate::parser::Parser;

impl Parser {
    pub(crate) fn expression(&mut self) -> Result<Expr, ParseErrorEntry> {
        self.assignment()
    }

    /// `assignment -> IDENTIFIER ( "=" | ":=" ) assignment | logic_or`
    ///
    /// Parses the left side as an ordinary expression first, then — if
    /// an `=` or `:=` follows — reinterprets it as an assignment target.
    /// A `Variable` on the left becomes the assigned name; anything else
    /// is an invalid target. `:=` is accepted here as well as at the
    /// statement level, per the grammar's assignment rule.
    fn assignment(&mut self) -> Result<Expr, ParseErrorEntry> {
        let expr = self.logic_or()?;

        if self.match_token(TokenKind::Equal) || self.match_token(TokenKind::VarShortDeclarator) {
            let equals_line = self.previous().line;
            let value = self.assignment()?;

            return match expr {
                Expr::Variable(_, name) => {
                    let id = self.node_ids.next_id();
                    Ok(Expr::Assignment(id, name, Box::new(value)))
                }
                _ => Err(ParseErrorEntry::new(equals_line, "invalid assignment target")),
            };
        }

        Ok(expr)
    }

    /// `logic_or -> logic_and ( "||" logic_and )*`
    fn logic_or(&mut self) -> Result<Expr, ParseErrorEntry> {
        let mut expr = self.logic_and()?;
        while self.check(TokenKind::Or) {
            let op = self.advance().clone();
            let rhs = self.logic_and()?;
            expr = Expr::Logical(Box::new(expr), op, Box::new(rhs));
        }
        Ok(expr)
    }

    /// `logic_and -> equality ( "&&" equality )*`
    fn logic_and(&mut self) -> Result<Expr, ParseErrorEntry> {
        let mut expr = self.equality()?;
        while self.check(TokenKind::And) {
            let op = self.advance().clone();
            let rhs = self.equality()?;
            expr = Expr::Logical(Box::new(expr), op, Box::new(rhs));
        }
        Ok(expr)
    }

    /// `equality -> comparison ( ( "==" | "<>" ) comparison )*`
    fn equality(&mut self) -> Result<Expr, ParseErrorEntry> {
        let mut expr = self.comparison()?;
        while self.check(TokenKind::EqualEqual) || self.check(TokenKind::NotEqual) {
            let op = self.advance().clone();
            let rhs = self.comparison()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(rhs));
        }
        Ok(expr)
    }

    /// `comparison -> term ( ( "<" | "<=" | ">" | ">=" ) term )*`
    fn comparison(&mut self) -> Result<Expr, ParseErrorEntry> {
        let mut expr = self.term()?;
        while matches!(
            self.peek().kind,
            TokenKind::Lower | TokenKind::LowerOrEqual | TokenKind::Greater | TokenKind::GreaterOrEqual
        ) {
            let op = self.advance().clone();
            let rhs = self.term()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(rhs));
        }
        Ok(expr)
    }

    /// `term -> factor ( ( "+" | "-" ) factor )*`
    fn term(&mut self) -> Result<Expr, ParseErrorEntry> {
        let mut expr = self.factor()?;
        while self.check(TokenKind::Plus) || self.check(TokenKind::Minus) {
            let op = self.advance().clone();
            let rhs = self.factor()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(rhs));
        }
        Ok(expr)
    }

    /// `factor -> unary ( ( "*" | "/" | "%" ) unary )*`
    fn factor(&mut self) -> Result<Expr, ParseErrorEntry> {
        let mut expr = self.unary()?;
        while matches!(self.peek().kind, TokenKind::Star | TokenKind::Slash | TokenKind::Modulus) {
            let op = self.advance().clone();
            let rhs = self.unary()?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(rhs));
        }
        Ok(expr)
    }

    /// `unary -> ( "!" | "-" ) unary | call`
    fn unary(&mut self) -> Result<Expr, ParseErrorEntry> {
        if self.check(TokenKind::Bang) || self.check(TokenKind::Minus) {
            let op = self.advance().clone();
            let rhs = self.unary()?;
            return Ok(Expr::Unary(op, Box::new(rhs)));
        }
        self.call()
    }

    /// `call -> primary ( "(" arguments? ")" )*`
    fn call(&mut self) -> Result<Expr, ParseErrorEntry> {
        let mut expr = self.primary()?;

        while self.check(TokenKind::LeftParentheses) {
            self.advance();
            let args = self.arguments()?;
            let line = self.expect(TokenKind::RightParentheses, "expected ')' after arguments")?.line;
            expr = Expr::Call {
                line,
                callee: Box::new(expr),
                args,
            };
        }

        Ok(expr)
    }

    fn arguments(&mut self) -> Result<Vec<Expr>, ParseErrorEntry> {
        let mut args = Vec::new();
        if !self.check(TokenKind::RightParentheses) {
            loop {
                args.push(self.expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        Ok(args)
    }

    /// `primary -> NUMBER | STRING | "true" | "false" | "null"
    ///           | IDENTIFIER | "(" expression ")"`
    fn primary(&mut self) -> Result<Expr, ParseErrorEntry> {
        if self.check(TokenKind::Number) {
            let tok = self.advance();
            let glint_lex::TokenLiteral::Number(n) = tok.literal else {
                unreachable!("scanner guarantees Number tokens carry a Number literal")
            };
            return Ok(Expr::Literal(Literal::Number(n)));
        }

        if self.check(TokenKind::String) {
            let tok = self.advance();
            let glint_lex::TokenLiteral::String(ref s) = tok.literal else {
                unreachable!("scanner guarantees String tokens carry a String literal")
            };
            return Ok(Expr::Literal(Literal::String(s.as_str().into())));
        }

        if self.match_token(TokenKind::True) {
            return Ok(Expr::Literal(Literal::Bool(true)));
        }
        if self.match_token(TokenKind::False) {
            return Ok(Expr::Literal(Literal::Bool(false)));
        }
        if self.match_token(TokenKind::Null) {
            return Ok(Expr::Literal(Literal::Null));
        }

        if self.check(TokenKind::Identifier) {
            let tok = self.advance().clone();
            let id = self.node_ids.next_id();
            return Ok(Expr::Variable(id, tok));
        }

        if self.match_token(TokenKind::LeftParentheses) {
            let expr = self.expression()?;
            self.expect(TokenKind::RightParentheses, "expected ')' after expression")?;
            return Ok(Expr::Grouping(Box::new(expr)));
        }

        let line = self.peek().line;
        Err(ParseErrorEntry::new(line, format!("expected expression, found '{}'", self.peek().lexeme)))
    }
}
