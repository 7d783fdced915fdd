//! glint-lex - the Scanner.
//!
//! Turns a source string into an ordered token stream terminated by a
//! single `Eof` token, or fails with the line of the first malformed
//! token.

mod error;
mod scanner;
mod token;

pub use error::ScanError;
pub use scanner::{scan, Scanner};
pub use token::{keyword, Token, TokenKind, TokenLiteral};
