//! metafn Java - Source Discovery
//!
//! Finds marker-annotated methods in Java source text and describes them
//! as [`MethodElement`]s for the generator. Only declarations are parsed:
//! method bodies, field initializers and initializer blocks are skipped by
//! balanced delimiter matching, so any file a Java compiler accepts is
//! expected to get through, and most it rejects do too.
//!
//! # Pipeline
//!
//! 1. [`lex`] turns source text into a [`TokenList`] (logos).
//! 2. [`parse`] builds a [`CompilationUnit`] of type and method headers.
//! 3. [`elements`] resolves type names against the file's declarations and
//!    imports and keeps the methods carrying the marker annotation.
//!
//! [`discover`] runs all three.

mod lexer;
mod parser;
mod resolve;

use std::fmt;
use std::ops::Range;

use metafn_ir::{GeneratorConfig, MethodElement};
use tracing::debug;

pub use lexer::{lex, LineIndex, Token, TokenKind, TokenList};
pub use parser::{
    parse, Bound, CompilationUnit, FormalParam, MethodHeader, TypeArg, TypeDecl, TypeKind,
    TypeParam, TypeRef, TypeSegment,
};
pub use resolve::{elements, TypeScope};

/// Byte range into a source file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn from_range(range: Range<usize>) -> Self {
        Span {
            start: range.start,
            end: range.end,
        }
    }

    /// Empty span at `offset`.
    pub fn point(offset: usize) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }

    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Source text the lexer or parser could not make sense of.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        SyntaxError {
            message: message.into(),
            span,
        }
    }
}

/// Lex, parse and resolve one source file.
///
/// `file` is only used for the [`Location`](metafn_ir::Location) of each
/// element.
pub fn discover(
    file: &str,
    source: &str,
    config: &GeneratorConfig,
) -> Result<Vec<MethodElement>, SyntaxError> {
    let tokens = lex(source)?;
    let unit = parse(&tokens)?;
    let found = elements(&unit, file, config);
    debug!(file, methods = found.len(), "discovered annotated methods");
    Ok(found)
}
