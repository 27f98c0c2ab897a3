//! Reader
//!
//! Builds the generic parenthesized parse tree that the AST builder
//! consumes. The tree is untyped: every node is either an atomic token or a
//! list of further nodes, and every meaningful statement is a list whose
//! first element is the statement keyword. Giving the keywords meaning is
//! the build stage's job, not the reader's.
//!
//! Quoted strings arrive from the lexer with the quotes already stripped,
//! so the reader treats them exactly like bare symbols.

use crate::cil::lexing::{tokenize, LexError, LineIndex, Token};
use serde::Serialize;
use std::fmt;

/// A node in the parse tree: an atomic token or a list of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseNode {
    pub value: ParseValue,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseValue {
    Token(String),
    List(Vec<ParseNode>),
}

impl ParseNode {
    pub fn token(value: impl Into<String>, line: u32) -> Self {
        Self {
            value: ParseValue::Token(value.into()),
            line,
        }
    }

    pub fn list(items: Vec<ParseNode>, line: u32) -> Self {
        Self {
            value: ParseValue::List(items),
            line,
        }
    }

    /// The atom text, if this node is an atom.
    pub fn as_token(&self) -> Option<&str> {
        match &self.value {
            ParseValue::Token(s) => Some(s),
            ParseValue::List(_) => None,
        }
    }

    /// The child nodes, if this node is a list.
    pub fn as_list(&self) -> Option<&[ParseNode]> {
        match &self.value {
            ParseValue::Token(_) => None,
            ParseValue::List(items) => Some(items),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self.value, ParseValue::List(_))
    }
}

/// A whole parsed source file: the top-level statement list plus the path
/// it was read from (diagnostics only, never semantically interpreted).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseTree {
    pub path: String,
    pub root: Vec<ParseNode>,
}

/// Errors raised while reading the token stream into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    Lex(LexError),
    /// A `)` with no matching `(`.
    UnmatchedClose { line: u32 },
    /// End of input with at least one `(` still open.
    UnclosedParen { line: u32 },
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Lex(err) => write!(f, "{}", err),
            ReadError::UnmatchedClose { line } => {
                write!(f, "line {}: unmatched ')'", line)
            }
            ReadError::UnclosedParen { line } => {
                write!(f, "line {}: unclosed '(' at end of input", line)
            }
        }
    }
}

impl std::error::Error for ReadError {}

impl From<LexError> for ReadError {
    fn from(err: LexError) -> Self {
        ReadError::Lex(err)
    }
}

/// Tokenize and read a source file into a [`ParseTree`].
pub fn read_tree(source: &str, path: &str) -> Result<ParseTree, ReadError> {
    let index = LineIndex::new(source);
    let tokens = tokenize(source)?;

    // One frame per open paren: the children collected so far plus the line
    // the paren was opened on.
    let mut stack: Vec<(Vec<ParseNode>, u32)> = Vec::new();
    let mut top: Vec<ParseNode> = Vec::new();

    for (token, span) in tokens {
        let line = index.line(span.start);
        match token {
            Token::OpenParen => stack.push((Vec::new(), line)),
            Token::CloseParen => {
                let (items, open_line) = stack
                    .pop()
                    .ok_or(ReadError::UnmatchedClose { line })?;
                let node = ParseNode::list(items, open_line);
                match stack.last_mut() {
                    Some((parent, _)) => parent.push(node),
                    None => top.push(node),
                }
            }
            Token::Symbol(text) | Token::QuotedString(text) => {
                let node = ParseNode::token(text, line);
                match stack.last_mut() {
                    Some((parent, _)) => parent.push(node),
                    None => top.push(node),
                }
            }
        }
    }

    if let Some((_, open_line)) = stack.last() {
        return Err(ReadError::UnclosedParen { line: *open_line });
    }

    Ok(ParseTree {
        path: path.to_string(),
        root: top,
    })
}
