//! Lexer
//!
//! Tokenization of CIL policy source. CIL is a fully parenthesized,
//! Lisp-like syntax, so the token set is small: parens, bare symbols,
//! quoted strings (used by path-valued statements such as `filecon` and
//! `genfscon`), and `;` line comments, which are dropped here.
//!
//! Tokens carry byte spans. The [`LineIndex`] maps a span back to a 1-based
//! line number so later stages can attach diagnostics without holding on to
//! the source text itself.

use logos::Logos;
use std::fmt;
use std::ops::Range;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r";[^\n]*")]
pub enum Token {
    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    /// A double-quoted string; the quotes are stripped here.
    #[regex(r#""[^"\n]*""#, |lex| lex.slice().trim_matches('"').to_string())]
    QuotedString(String),

    /// Any run of characters that is not whitespace, a paren, a quote, or
    /// the start of a comment.
    #[regex(r#"[^ \t\r\n\f()";]+"#, |lex| lex.slice().to_string())]
    Symbol(String),
}

/// A token paired with its byte span in the source.
pub type SpannedToken = (Token, Range<usize>);

/// Raised when the lexer hits a character it cannot start a token with
/// (in practice: a stray `"` that never closes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub line: u32,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: unrecognized token", self.line)
    }
}

impl std::error::Error for LexError {}

/// Maps byte offsets to 1-based line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { starts }
    }

    pub fn line(&self, offset: usize) -> u32 {
        self.starts.partition_point(|start| *start <= offset) as u32
    }
}

/// Tokenize a whole source file.
pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, LexError> {
    let index = LineIndex::new(source);
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(LexError {
                    line: index.line(lexer.span().start),
                })
            }
        }
    }
    Ok(tokens)
}
