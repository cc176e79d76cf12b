//! Java lexer using logos.
//!
//! Produces only what the declaration parser needs. Comments and
//! whitespace are skipped, literal contents are not decoded, and every
//! operator the parser never inspects collapses into [`TokenKind::Op`].
//! `<` and `>` are always single tokens so `Map<K, List<V>>` closes both
//! argument lists.

use logos::Logos;

use crate::{Span, SyntaxError};

#[derive(Logos, Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum TokenKind {
    // === Words and literals ===
    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*")]
    Ident,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,
    #[token("\"\"\"", text_block)]
    TextBlock,
    #[regex(r"'([^'\\\n]|\\.)*'")]
    Char,
    #[regex(r"[0-9][0-9a-zA-Z_.]*")]
    Number,

    // === Punctuation ===
    #[token("@")]
    At,
    #[token("...")]
    Ellipsis,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("::")]
    DoubleColon,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("?")]
    Question,
    #[token("&")]
    Amp,
    #[token("=")]
    Eq,
    #[token("->")]
    Arrow,
    #[regex(r"[-+*/%!~|^]")]
    Op,

    /// End of input; never produced by logos.
    Eof,
}

/// Consume a text block body up to and including the closing `"""`.
fn text_block(lex: &mut logos::Lexer<TokenKind>) -> bool {
    let rest = lex.remainder().as_bytes();
    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'\\' => i += 2,
            b'"' if rest[i..].starts_with(b"\"\"\"") => {
                lex.bump(i + 3);
                return true;
            }
            _ => i += 1,
        }
    }
    false
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Tokens of one source file, terminated by [`TokenKind::Eof`].
#[derive(Clone, Debug)]
pub struct TokenList<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    lines: LineIndex,
}

impl<'src> TokenList<'src> {
    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Source text of `token`.
    pub fn text(&self, token: &Token) -> &'src str {
        self.source.get(token.span.range()).unwrap_or("")
    }

    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Number of tokens, `Eof` included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Maps byte offsets to 1-based line numbers.
#[derive(Clone, Eq, PartialEq, Debug)]
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
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        LineIndex { starts }
    }

    pub fn line(&self, offset: usize) -> u32 {
        let line = self.starts.partition_point(|&start| start <= offset);
        u32::try_from(line).unwrap_or(u32::MAX)
    }
}

/// Lex a whole source file.
///
/// # Errors
///
/// Returns a [`SyntaxError`] at the first byte no token matches, such as
/// an unterminated string literal.
pub fn lex(source: &str) -> Result<TokenList<'_>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        match result {
            Ok(kind) => tokens.push(Token::new(kind, span)),
            Err(()) => return Err(unexpected(lexer.slice(), span)),
        }
    }

    tokens.push(Token::new(TokenKind::Eof, Span::point(source.len())));
    Ok(TokenList {
        source,
        tokens,
        lines: LineIndex::new(source),
    })
}

fn unexpected(slice: &str, span: Span) -> SyntaxError {
    let message = match slice.chars().next() {
        Some('"') => "unterminated string literal".to_string(),
        Some('\'') => "unterminated character literal".to_string(),
        Some(c) => format!("unexpected character `{}`", c.escape_debug()),
        None => "unexpected end of input".to_string(),
    };
    SyntaxError::new(message, span)
}

#[cfg(test)]
mod tests;
