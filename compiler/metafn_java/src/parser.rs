//! Declaration parser.
//!
//! Recursive descent over a [`TokenList`], keeping only what discovery
//! needs: the package, imports, type declarations and their method
//! headers. Everything with a body is skipped by balanced delimiter
//! matching, so expressions and statements are never parsed.

use std::fmt;

use metafn_ir::{Import, Modifiers};

use crate::lexer::{Token, TokenKind, TokenList};
use crate::{Span, SyntaxError};

/// Declarations of one source file.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct CompilationUnit {
    /// Dotted package name, empty for the default package.
    pub package: String,
    /// Non-static imports in source order.
    pub imports: Vec<Import>,
    pub types: Vec<TypeDecl>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub methods: Vec<MethodHeader>,
    /// Member types, in source order.
    pub members: Vec<TypeDecl>,
    pub line: u32,
}

/// A method declaration without its body.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MethodHeader {
    pub name: String,
    /// Annotation names as written (`MetaMethod`, `a.b.Marker`).
    pub annotations: Vec<String>,
    pub modifiers: Modifiers,
    pub type_params: Vec<TypeParam>,
    pub return_type: TypeRef,
    pub params: Vec<FormalParam>,
    pub throws: Vec<TypeRef>,
    /// Line of the method name.
    pub line: u32,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FormalParam {
    pub name: String,
    /// Element type for varargs.
    pub ty: TypeRef,
    pub is_vararg: bool,
}

/// `T extends A & B`
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TypeParam {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

/// A type as written: `a.b.Outer.Inner<X, ? extends Y>[]`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeRef {
    pub segments: Vec<TypeSegment>,
    /// Trailing `[]` pairs.
    pub dims: usize,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeSegment {
    pub name: String,
    /// Empty when the segment has no type arguments.
    pub args: Vec<TypeArg>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeArg {
    Type(TypeRef),
    Wildcard(Option<(Bound, TypeRef)>),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Bound {
    Extends,
    Super,
}

impl TypeRef {
    /// A single unparameterized segment.
    pub fn simple(name: impl Into<String>) -> Self {
        TypeRef {
            segments: vec![TypeSegment {
                name: name.into(),
                args: Vec::new(),
            }],
            dims: 0,
        }
    }

    /// Segment names joined by `.`, without arguments or dimensions.
    pub fn raw_name(&self) -> String {
        let names: Vec<&str> = self.segments.iter().map(|s| s.name.as_str()).collect();
        names.join(".")
    }

    pub fn first(&self) -> &str {
        self.segments.first().map_or("", |s| s.name.as_str())
    }
}

fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_joined(f, &self.segments, ".")?;
        for _ in 0..self.dims {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            write_joined(f, &self.args, ", ")?;
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeArg::Type(ty) => write!(f, "{ty}"),
            TypeArg::Wildcard(None) => f.write_str("?"),
            TypeArg::Wildcard(Some((Bound::Extends, ty))) => write!(f, "? extends {ty}"),
            TypeArg::Wildcard(Some((Bound::Super, ty))) => write!(f, "? super {ty}"),
        }
    }
}

impl fmt::Display for TypeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.bounds.is_empty() {
            f.write_str(" extends ")?;
            write_joined(f, &self.bounds, " & ")?;
        }
        Ok(())
    }
}

/// Parse the declarations of one lexed source file.
///
/// # Errors
///
/// Returns the first [`SyntaxError`]; there is no recovery.
pub fn parse(tokens: &TokenList<'_>) -> Result<CompilationUnit, SyntaxError> {
    Parser::new(tokens).compilation_unit()
}

/// Words that modify a declaration but that the model does not track.
const IGNORED_MODIFIERS: [&str; 2] = ["transient", "volatile"];

struct Parser<'t, 'src> {
    tokens: &'t TokenList<'src>,
    pos: usize,
}

impl<'t, 'src> Parser<'t, 'src> {
    fn new(tokens: &'t TokenList<'src>) -> Self {
        Parser { tokens, pos: 0 }
    }

    // ===== Token access =====

    fn token_at(&self, pos: usize) -> Token {
        let tokens = self.tokens.tokens();
        match tokens.get(pos).or_else(|| tokens.last()) {
            Some(token) => *token,
            None => Token::new(TokenKind::Eof, Span::default()),
        }
    }

    fn current(&self) -> Token {
        self.token_at(self.pos)
    }

    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    fn peek(&self, offset: usize) -> TokenKind {
        self.token_at(self.pos + offset).kind
    }

    fn peek_text(&self, offset: usize) -> &'src str {
        self.tokens.text(&self.token_at(self.pos + offset))
    }

    fn at_end(&self) -> bool {
        self.kind() == TokenKind::Eof
    }

    fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.at_end() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    fn check_word(&self, word: &str) -> bool {
        self.peek_is_word(0, word)
    }

    fn peek_is_word(&self, offset: usize, word: &str) -> bool {
        self.peek(offset) == TokenKind::Ident && self.peek_text(offset) == word
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if self.check_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(what))
        }
    }

    fn ident(&mut self, what: &str) -> Result<String, SyntaxError> {
        let token = self.expect(TokenKind::Ident, what)?;
        Ok(self.tokens.text(&token).to_string())
    }

    fn error(&self, what: &str) -> SyntaxError {
        let found = match self.kind() {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("`{}`", self.peek_text(0)),
        };
        SyntaxError::new(format!("expected {what}, found {found}"), self.current().span)
    }

    fn line(&self, token: &Token) -> u32 {
        self.tokens.lines().line(token.span.start)
    }

    // ===== Skipping =====

    /// Skip from an opening delimiter past its matching close.
    fn skip_balanced(&mut self) -> Result<(), SyntaxError> {
        let open = self.advance();
        let mut depth = 1usize;
        while depth > 0 {
            match self.kind() {
                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => depth -= 1,
                TokenKind::Eof => {
                    let text = self.tokens.text(&open);
                    return Err(SyntaxError::new(format!("unclosed `{text}`"), open.span));
                }
                _ => {}
            }
            self.advance();
        }
        Ok(())
    }

    /// Skip a field declarator or annotation default through its `;`.
    fn skip_to_semi(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.kind() {
                TokenKind::Semi => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::LParen | TokenKind::LBrace | TokenKind::LBracket => self.skip_balanced()?,
                TokenKind::RBrace | TokenKind::Eof => return Err(self.error("`;`")),
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skip a constructor's `throws` clause and body.
    fn skip_to_body_end(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.kind() {
                TokenKind::LBrace => return self.skip_balanced(),
                TokenKind::Semi => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::LParen | TokenKind::LBracket => self.skip_balanced()?,
                TokenKind::RBrace | TokenKind::Eof => return Err(self.error("constructor body")),
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn skip_enum_constants(&mut self) -> Result<(), SyntaxError> {
        loop {
            match self.kind() {
                TokenKind::Semi => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::RBrace => return Ok(()),
                TokenKind::LParen | TokenKind::LBrace => self.skip_balanced()?,
                TokenKind::Eof => return Err(self.error("`}`")),
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ===== Compilation unit =====

    fn compilation_unit(mut self) -> Result<CompilationUnit, SyntaxError> {
        let mut unit = CompilationUnit::default();

        while !self.at_end() {
            if self.eat(TokenKind::Semi) {
                continue;
            }
            if self.eat_word("package") {
                unit.package = self.qualified_name("package name")?;
                self.expect(TokenKind::Semi, "`;`")?;
                continue;
            }
            if self.check_word("import") {
                if let Some(import) = self.import()? {
                    unit.imports.push(import);
                }
                continue;
            }
            if self.at_module_decl() {
                self.skip_module()?;
                continue;
            }

            // Annotations on a `package` clause parse like modifiers.
            let _ = self.modifiers()?;
            if self.check_word("package") {
                continue;
            }
            if !self.at_type_decl() {
                return Err(self.error("type declaration"));
            }
            unit.types.push(self.type_decl()?);
        }

        Ok(unit)
    }

    fn qualified_name(&mut self, what: &str) -> Result<String, SyntaxError> {
        let mut name = self.ident(what)?;
        while self.check(TokenKind::Dot) && self.peek(1) == TokenKind::Ident {
            self.advance();
            name.push('.');
            name.push_str(&self.ident(what)?);
        }
        Ok(name)
    }

    /// `import [static] a.b.C;` or `import a.b.*;`. Static imports yield `None`.
    fn import(&mut self) -> Result<Option<Import>, SyntaxError> {
        self.advance();
        let is_static = self.eat_word("static");
        let mut path = self.ident("import path")?;
        let mut on_demand = false;
        while self.eat(TokenKind::Dot) {
            if self.check(TokenKind::Op) && self.peek_text(0) == "*" {
                self.advance();
                on_demand = true;
                break;
            }
            path.push('.');
            path.push_str(&self.ident("import path")?);
        }
        self.expect(TokenKind::Semi, "`;`")?;

        if is_static {
            return Ok(None);
        }
        Ok(Some(if on_demand {
            Import::on_demand(path)
        } else {
            Import::single(path)
        }))
    }

    fn at_module_decl(&self) -> bool {
        (self.check_word("module") && self.peek(1) == TokenKind::Ident)
            || (self.check_word("open") && self.peek_is_word(1, "module"))
    }

    fn skip_module(&mut self) -> Result<(), SyntaxError> {
        while !self.check(TokenKind::LBrace) {
            if self.at_end() {
                return Err(self.error("module body"));
            }
            self.advance();
        }
        self.skip_balanced()
    }

    // ===== Modifiers and annotations =====

    fn modifiers(&mut self) -> Result<(Vec<String>, Modifiers), SyntaxError> {
        let mut annotations = Vec::new();
        let mut modifiers = Modifiers::empty();

        loop {
            if self.check(TokenKind::At) && !self.peek_is_word(1, "interface") {
                annotations.push(self.annotation()?);
                continue;
            }
            if self.kind() != TokenKind::Ident {
                break;
            }
            let word = self.peek_text(0);
            if let Some(flag) = Modifiers::from_keyword(word) {
                modifiers |= flag;
                self.advance();
            } else if IGNORED_MODIFIERS.contains(&word)
                || (word == "sealed" && self.peek(1) == TokenKind::Ident)
            {
                self.advance();
            } else if word == "non"
                && self.peek(1) == TokenKind::Op
                && self.peek_text(1) == "-"
                && self.peek_is_word(2, "sealed")
            {
                self.pos += 3;
            } else {
                break;
            }
        }

        Ok((annotations, modifiers))
    }

    /// `@Name` or `@a.b.Name(...)`; returns the name as written.
    fn annotation(&mut self) -> Result<String, SyntaxError> {
        self.expect(TokenKind::At, "`@`")?;
        let name = self.qualified_name("annotation name")?;
        if self.check(TokenKind::LParen) {
            self.skip_balanced()?;
        }
        Ok(name)
    }

    fn skip_annotations(&mut self) -> Result<(), SyntaxError> {
        while self.check(TokenKind::At) {
            self.annotation()?;
        }
        Ok(())
    }

    // ===== Types =====

    fn at_type_decl(&self) -> bool {
        if self.check(TokenKind::At) {
            return self.peek_is_word(1, "interface");
        }
        if self.check_word("class") || self.check_word("interface") || self.check_word("enum") {
            return true;
        }
        self.check_word("record")
            && self.peek(1) == TokenKind::Ident
            && matches!(self.peek(2), TokenKind::LParen | TokenKind::Lt)
    }

    fn type_decl(&mut self) -> Result<TypeDecl, SyntaxError> {
        let kind = if self.eat(TokenKind::At) {
            self.advance();
            TypeKind::Annotation
        } else {
            let kind = match self.peek_text(0) {
                "class" => TypeKind::Class,
                "interface" => TypeKind::Interface,
                "enum" => TypeKind::Enum,
                "record" => TypeKind::Record,
                _ => return Err(self.error("type declaration")),
            };
            self.advance();
            kind
        };

        let name_token = self.current();
        let name = self.ident("type name")?;
        let type_params = if self.check(TokenKind::Lt) {
            self.type_params()?
        } else {
            Vec::new()
        };

        // Record header, `extends`, `implements` and `permits` clauses.
        while !self.check(TokenKind::LBrace) {
            match self.kind() {
                TokenKind::LParen => self.skip_balanced()?,
                TokenKind::Eof => return Err(self.error("type body")),
                _ => {
                    self.advance();
                }
            }
        }

        let mut decl = TypeDecl {
            kind,
            name,
            type_params,
            methods: Vec::new(),
            members: Vec::new(),
            line: self.line(&name_token),
        };
        self.type_body(&mut decl)?;
        Ok(decl)
    }

    fn type_body(&mut self, decl: &mut TypeDecl) -> Result<(), SyntaxError> {
        self.expect(TokenKind::LBrace, "`{`")?;
        if decl.kind == TypeKind::Enum {
            self.skip_enum_constants()?;
        }

        loop {
            match self.kind() {
                TokenKind::RBrace => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::Eof => return Err(self.error("`}`")),
                TokenKind::Semi => {
                    self.advance();
                }
                // Instance initializer.
                TokenKind::LBrace => self.skip_balanced()?,
                _ => self.member(decl)?,
            }
        }
    }

    fn member(&mut self, decl: &mut TypeDecl) -> Result<(), SyntaxError> {
        let start = self.current().span;
        let (annotations, modifiers) = self.modifiers()?;

        // Static initializer.
        if self.check(TokenKind::LBrace) {
            return self.skip_balanced();
        }
        if self.at_type_decl() {
            decl.members.push(self.type_decl()?);
            return Ok(());
        }

        let type_params = if self.check(TokenKind::Lt) {
            self.type_params()?
        } else {
            Vec::new()
        };

        // Constructor, or a record's compact canonical constructor.
        if self.check(TokenKind::Ident) && matches!(self.peek(1), TokenKind::LParen | TokenKind::LBrace) {
            self.advance();
            if self.check(TokenKind::LParen) {
                self.skip_balanced()?;
            }
            return self.skip_to_body_end();
        }

        let mut return_type = self.type_ref()?;
        let name_token = self.current();
        let name = self.ident("member name")?;

        if !self.check(TokenKind::LParen) {
            return self.skip_to_semi();
        }

        let params = self.formal_params()?;
        while self.check(TokenKind::LBracket) {
            self.advance();
            self.expect(TokenKind::RBracket, "`]`")?;
            return_type.dims += 1;
        }

        let mut throws = Vec::new();
        if self.eat_word("throws") {
            throws.push(self.type_ref()?);
            while self.eat(TokenKind::Comma) {
                throws.push(self.type_ref()?);
            }
        }

        let end = self.current().span;
        if self.check(TokenKind::LBrace) {
            self.skip_balanced()?;
        } else if self.eat_word("default") {
            self.skip_to_semi()?;
        } else {
            self.expect(TokenKind::Semi, "method body or `;`")?;
        }

        decl.methods.push(MethodHeader {
            name,
            annotations,
            modifiers,
            type_params,
            return_type,
            params,
            throws,
            line: self.line(&name_token),
            span: start.merge(end),
        });
        Ok(())
    }

    fn formal_params(&mut self) -> Result<Vec<FormalParam>, SyntaxError> {
        self.expect(TokenKind::LParen, "`(`")?;
        let mut params = Vec::new();
        if self.eat(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            if let Some(param) = self.formal_param()? {
                params.push(param);
            }
            if self.eat(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RParen, "`,` or `)`")?;
            return Ok(params);
        }
    }

    /// One parameter; `None` for a receiver parameter (`Foo this`).
    fn formal_param(&mut self) -> Result<Option<FormalParam>, SyntaxError> {
        // Annotations and `final`.
        let _ = self.modifiers()?;
        let mut ty = self.type_ref()?;
        self.skip_annotations()?;
        let is_vararg = self.eat(TokenKind::Ellipsis);

        if self.eat_word("this") {
            return Ok(None);
        }
        let name = self.ident("parameter name")?;
        if self.check(TokenKind::Dot) && self.peek_is_word(1, "this") {
            self.pos += 2;
            return Ok(None);
        }

        // Legacy `String args[]`.
        while self.eat(TokenKind::LBracket) {
            self.expect(TokenKind::RBracket, "`]`")?;
            ty.dims += 1;
        }

        Ok(Some(FormalParam {
            name,
            ty,
            is_vararg,
        }))
    }

    fn type_ref(&mut self) -> Result<TypeRef, SyntaxError> {
        self.skip_annotations()?;
        let mut segments = Vec::new();

        loop {
            let name = self.ident("type")?;
            let args = if self.check(TokenKind::Lt) {
                self.type_args()?
            } else {
                Vec::new()
            };
            segments.push(TypeSegment { name, args });

            if self.check(TokenKind::Dot) && matches!(self.peek(1), TokenKind::Ident | TokenKind::At) {
                self.advance();
                self.skip_annotations()?;
                continue;
            }
            break;
        }

        let mut dims = 0;
        while self.check(TokenKind::LBracket) && self.peek(1) == TokenKind::RBracket {
            self.pos += 2;
            dims += 1;
        }

        Ok(TypeRef { segments, dims })
    }

    fn type_args(&mut self) -> Result<Vec<TypeArg>, SyntaxError> {
        self.expect(TokenKind::Lt, "`<`")?;
        let mut args = Vec::new();
        if self.eat(TokenKind::Gt) {
            return Ok(args);
        }

        loop {
            self.skip_annotations()?;
            let arg = if self.eat(TokenKind::Question) {
                if self.eat_word("extends") {
                    TypeArg::Wildcard(Some((Bound::Extends, self.type_ref()?)))
                } else if self.eat_word("super") {
                    TypeArg::Wildcard(Some((Bound::Super, self.type_ref()?)))
                } else {
                    TypeArg::Wildcard(None)
                }
            } else {
                TypeArg::Type(self.type_ref()?)
            };
            args.push(arg);

            if self.eat(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::Gt, "`,` or `>`")?;
            return Ok(args);
        }
    }

    fn type_params(&mut self) -> Result<Vec<TypeParam>, SyntaxError> {
        self.expect(TokenKind::Lt, "`<`")?;
        let mut params = Vec::new();

        loop {
            self.skip_annotations()?;
            let name = self.ident("type parameter")?;
            let mut bounds = Vec::new();
            if self.eat_word("extends") {
                bounds.push(self.type_ref()?);
                while self.eat(TokenKind::Amp) {
                    bounds.push(self.type_ref()?);
                }
            }
            params.push(TypeParam { name, bounds });

            if self.eat(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::Gt, "`,` or `>`")?;
            return Ok(params);
        }
    }
}
