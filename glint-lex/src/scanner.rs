//! The Scanner: one pass over Unicode code points, emitting a token stream.
//!
//! Mirrors `faxc-lex`'s `Cursor`/`Lexer` split but walks a `Vec<char>`
//! rather than a byte cursor, since this language's grammar is stated in
//! terms of code points, not UTF-8 bytes.

use glint_util::Line;

use crate::error::ScanError;
use crate::token::{keyword, Token, TokenKind, TokenLiteral};

pub struct Scanner {
    source: Vec<char>,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: Line,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Scans the whole source, returning the token stream terminated by a
    /// single `Eof` token, or the first error encountered.
    pub fn scan_tokens(mut self) -> Result<Vec<Token>, ScanError> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token()?;
        }

        self.tokens.push(Token::new(TokenKind::Eof, "", TokenLiteral::None, self.line));
        Ok(self.tokens)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        *self.source.get(self.current).unwrap_or(&'\0')
    }

    fn peek_next(&self) -> char {
        *self.source.get(self.current + 1).unwrap_or(&'\0')
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn add(&mut self, kind: TokenKind) {
        self.add_with_literal(kind, TokenLiteral::None);
    }

    fn add_with_literal(&mut self, kind: TokenKind, literal: TokenLiteral) {
        let lexeme = self.lexeme();
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }

    fn scan_token(&mut self) -> Result<(), ScanError> {
        let c = self.advance();
        match c {
            '(' => self.add(TokenKind::LeftParentheses),
            ')' => self.add(TokenKind::RightParentheses),
            '{' => self.add(TokenKind::LeftBrace),
            '}' => self.add(TokenKind::RightBrace),
            ',' => self.add(TokenKind::Comma),
            '+' => self.add(TokenKind::Plus),
            '-' => self.add(TokenKind::Minus),
            '*' => self.add(TokenKind::Star),
            '/' => self.add(TokenKind::Slash),
            '%' => self.add(TokenKind::Modulus),
            '!' => self.add(TokenKind::Bang),
            ';' => self.add(TokenKind::Semicolon),
            '#' => {
                while self.peek() != '\n' && !self.is_at_end() {
                    self.advance();
                }
            }

            '=' => {
                let kind = if self.matches('=') { TokenKind::EqualEqual } else { TokenKind::Equal };
                self.add(kind);
            }
            '<' => {
                let kind = if self.matches('=') {
                    TokenKind::LowerOrEqual
                } else if self.matches('>') {
                    TokenKind::NotEqual
                } else {
                    TokenKind::Lower
                };
                self.add(kind);
            }
            '>' => {
                let kind = if self.matches('=') { TokenKind::GreaterOrEqual } else { TokenKind::Greater };
                self.add(kind);
            }
            '&' => {
                if self.matches('&') {
                    self.add(TokenKind::And);
                } else {
                    return Err(ScanError::new(self.line, "unexpected character '&'"));
                }
            }
            '|' => {
                if self.matches('|') {
                    self.add(TokenKind::Or);
                } else {
                    return Err(ScanError::new(self.line, "unexpected character '|'"));
                }
            }
            ':' => {
                if self.matches('=') {
                    self.add(TokenKind::VarShortDeclarator);
                } else {
                    return Err(ScanError::new(self.line, "unexpected character ':'"));
                }
            }

            ' ' | '\t' | '\r' => {}
            '\n' => self.line += 1,

            '"' => self.scan_string()?,

            c if c.is_ascii_digit() => self.scan_number()?,
            c if c.is_ascii_alphabetic() => self.scan_identifier(),

            c => return Err(ScanError::new(self.line, format!("unexpected character '{c}'"))),
        }

        Ok(())
    }

    fn scan_string(&mut self) -> Result<(), ScanError> {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return Err(ScanError::new(self.line, "unterminated string"));
        }

        // Consume the closing quote.
        self.advance();

        // The lexeme keeps the quotes; the literal strips them.
        let value: String = self.source[self.start + 1..self.current - 1].iter().collect();
        self.add_with_literal(TokenKind::String, TokenLiteral::String(value));
        Ok(())
    }

    fn scan_number(&mut self) -> Result<(), ScanError> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' {
            if !self.peek_next().is_ascii_digit() {
                return Err(ScanError::new(self.line, "malformed number: '.' must be followed by a digit"));
            }
            // Consume the '.'.
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let lexeme = self.lexeme();
        let value: f64 = lexeme
            .parse()
            .map_err(|_| ScanError::new(self.line, format!("malformed number literal '{lexeme}'")))?;
        self.add_with_literal(TokenKind::Number, TokenLiteral::Number(value));
        Ok(())
    }

    fn scan_identifier(&mut self) {
        while self.peek().is_ascii_alphanumeric() {
            self.advance();
        }

        let lexeme = self.lexeme();
        match keyword(&lexeme) {
            Some(kind) => self.add(kind),
            None => self.add(TokenKind::Identifier),
        }
    }
}

/// Convenience entry point: scans `source` in full.
pub fn scan(source: &str) -> Result<Vec<Token>, ScanError> {
    tracing::debug!(len = source.len(), "scanning source");
    Scanner::new(source).scan_tokens()
}
