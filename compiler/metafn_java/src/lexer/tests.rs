use pretty_assertions::assert_eq;

use super::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    let Ok(tokens) = lex(source) else {
        panic!("lexing failed: {source}");
    };
    tokens.tokens().iter().map(|t| t.kind).collect()
}

fn texts(source: &str) -> Vec<String> {
    let Ok(tokens) = lex(source) else {
        panic!("lexing failed: {source}");
    };
    tokens
        .tokens()
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| tokens.text(t).to_string())
        .collect()
}

#[test]
fn nested_generics_close_one_at_a_time() {
    assert_eq!(
        kinds("Map<K, List<V>>"),
        vec![
            TokenKind::Ident,
            TokenKind::Lt,
            TokenKind::Ident,
            TokenKind::Comma,
            TokenKind::Ident,
            TokenKind::Lt,
            TokenKind::Ident,
            TokenKind::Gt,
            TokenKind::Gt,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_are_skipped() {
    let source = "/** doc */ int /* inline */ x; // trailing\n";
    assert_eq!(texts(source), vec!["int", "x", ";"]);
}

#[test]
fn varargs_and_annotations() {
    assert_eq!(
        kinds("@MetaMethod Object... args"),
        vec![
            TokenKind::At,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ellipsis,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn literals_keep_their_text() {
    let source = r#"x = "a \" b" + 'c' + 1_000L + 0x1F;"#;
    assert_eq!(
        texts(source),
        vec!["x", "=", r#""a \" b""#, "+", "'c'", "+", "1_000L", "+", "0x1F", ";"]
    );
}

#[test]
fn text_block_is_one_token() {
    let source = "s = \"\"\"\n  he said \"hi\" \\\"\"\"\n  \"\"\";";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Ident,
            TokenKind::Eq,
            TokenKind::TextBlock,
            TokenKind::Semi,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn braces_inside_strings_are_not_tokens() {
    let kinds = kinds(r#"{ "}" '{' }"#);
    assert_eq!(
        kinds,
        vec![
            TokenKind::LBrace,
            TokenKind::Str,
            TokenKind::Char,
            TokenKind::RBrace,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unicode_identifiers() {
    assert_eq!(texts("café $x _y"), vec!["café", "$x", "_y"]);
}

#[test]
fn unterminated_string_is_an_error() {
    let Err(err) = lex("String s = \"open;\n") else {
        panic!("expected a syntax error");
    };
    assert_eq!(err.message, "unterminated string literal");
    assert_eq!(err.span.start, 11);
}

#[test]
fn unterminated_text_block_is_an_error() {
    let Err(err) = lex("s = \"\"\"\nnever closed") else {
        panic!("expected a syntax error");
    };
    assert_eq!(err.message, "unterminated string literal");
}

#[test]
fn stray_character_is_an_error() {
    let Err(err) = lex("int x = 1 # 2;") else {
        panic!("expected a syntax error");
    };
    assert_eq!(err.message, "unexpected character `#`");
    assert_eq!(err.span, Span::new(10, 11));
}

#[test]
fn eof_closes_every_list() {
    let Ok(tokens) = lex("") else {
        panic!("lexing failed");
    };
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens.tokens()[0].kind, TokenKind::Eof);
}

#[test]
fn line_index_is_one_based() {
    let index = LineIndex::new("a\nbc\n\nd");
    assert_eq!(index.line(0), 1);
    assert_eq!(index.line(1), 1);
    assert_eq!(index.line(2), 2);
    assert_eq!(index.line(5), 3);
    assert_eq!(index.line(6), 4);
}
