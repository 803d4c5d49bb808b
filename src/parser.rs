//! The recursive-descent parser/evaluator.
//!
//! A `Parser` is created per file; child parsers spawned for `@import`
//! share the same [`ImportCache`] pointer, the way the data model
//! describes the parser's lifecycle.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use num_bigint::BigInt;
use ordered_float::NotNan;

use crate::cache::{CacheEntry, ImportCache};
use crate::location::{Diagnostic, Location, Stage, pretty_file_label};
use crate::printer::value_to_string;
use crate::token::{StringParts, Token, TokenKind};
use crate::value::{Constants, Object, Value};

enum Selector {
    Constant(String),
    Path(Vec<String>),
}

pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    root_dir: PathBuf,
    relative_dir: String,
    current_file: String,
    cache: Rc<ImportCache>,
}

impl Parser {
    pub fn new(
        tokens: Vec<Token>,
        root_dir: impl Into<PathBuf>,
        current_file: impl Into<String>,
        relative_dir: impl Into<String>,
        cache: Rc<ImportCache>,
    ) -> Self {
        Parser {
            tokens,
            cursor: 0,
            root_dir: root_dir.into(),
            relative_dir: relative_dir.into(),
            current_file: current_file.into(),
            cache,
        }
    }

    /// Parses the whole token stream, returning the top-level values and
    /// constants maps.
    pub fn parse(&mut self) -> Result<(Object, Constants), Diagnostic> {
        let mut values = Object::new();
        let mut constants = Constants::new();
        while self.peek().kind != TokenKind::Eof {
            self.parse_entry(&mut values, &mut constants)?;
        }
        Ok((values, constants))
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.cursor]
    }

    fn loc(&self) -> Location {
        self.peek().location
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.cursor].clone();
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
        tok
    }

    fn error(&self, loc: Location, message: impl Into<String>) -> Diagnostic {
        Diagnostic::new(Stage::Parser, pretty_file_label(&self.relative_dir, &self.current_file), loc, message)
    }

    fn expect_assign(&mut self) -> Result<(), Diagnostic> {
        let tok = self.advance();
        if tok.kind == TokenKind::Assign { Ok(()) } else { Err(self.error(tok.location, "expected '='")) }
    }

    fn parse_entry(&mut self, values: &mut Object, constants: &mut Constants) -> Result<(), Diagnostic> {
        match self.peek().kind.clone() {
            TokenKind::Key(_) | TokenKind::String(_) => {
                let key = self.parse_key(constants)?;
                self.expect_assign()?;
                let value = self.parse_value(constants)?;
                values.insert(key, value);
            }
            TokenKind::Constant(name) => {
                self.advance();
                self.expect_assign()?;
                let value = self.parse_value(constants)?;
                constants.insert(name, value);
            }
            TokenKind::OpenObj => {
                self.advance();
                self.parse_block(values, constants)?;
            }
            TokenKind::Directive(name) => {
                let loc = self.loc();
                self.advance();
                match name.as_str() {
                    "import" => self.parse_import(loc, values, constants)?,
                    other => return Err(self.error(loc, format!("unknown directive: `@{other}`"))),
                }
            }
            other => {
                let loc = self.loc();
                return Err(self.error(loc, format!("unexpected token: {other:?}")));
            }
        }
        Ok(())
    }

    /// An anonymous top-level block: its entries flatten into the parent's
    /// `values`/`constants`, so it shares `parse_entry` rather than
    /// the stricter `key '=' value` grammar of an object *value*.
    fn parse_block(&mut self, values: &mut Object, constants: &mut Constants) -> Result<(), Diagnostic> {
        loop {
            if self.peek().kind == TokenKind::CloseObj {
                self.advance();
                return Ok(());
            }
            self.parse_entry(values, constants)?;
        }
    }

    fn parse_key(&mut self, constants: &Constants) -> Result<String, Diagnostic> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Key(k) => Ok(k),
            TokenKind::String(parts) => self.evaluate_string(parts, tok.location, constants),
            _ => Err(self.error(tok.location, "expected a key")),
        }
    }

    fn evaluate_string(&self, parts: StringParts, loc: Location, constants: &Constants) -> Result<String, Diagnostic> {
        debug_assert!(parts.invariant_holds());
        let mut out = String::new();
        for (i, part) in parts.parts.iter().enumerate() {
            out.push_str(part);
            if let Some(name) = parts.subs.get(i) {
                let value = self.resolve_name(name, loc, constants)?;
                match &value {
                    Value::String(s) => out.push_str(s),
                    other => out.push_str(&value_to_string(other, 0)),
                }
            }
        }
        Ok(out)
    }

    fn resolve_name(&self, name: &str, loc: Location, constants: &Constants) -> Result<Value, Diagnostic> {
        self.try_resolve(name, constants)
            .ok_or_else(|| self.error(loc, format!("unresolved constant: `${name}`")))
    }

    fn try_resolve(&self, name: &str, constants: &Constants) -> Option<Value> {
        if let Some(v) = constants.get(name) {
            return Some(v.clone());
        }
        std::env::var(name).ok().map(Value::String)
    }

    fn parse_value(&mut self, constants: &Constants) -> Result<Value, Diagnostic> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::String(parts) => Ok(Value::String(self.evaluate_string(parts, tok.location, constants)?)),
            TokenKind::NumberDecimal(lexeme) => self.parse_number_decimal(&lexeme, tok.location),
            TokenKind::NumberHex(lexeme) => self.parse_number_radix(&lexeme, 16, tok.location),
            TokenKind::NumberBinary(lexeme) => self.parse_number_radix(&lexeme, 2, tok.location),
            TokenKind::Bool(b) => {
                let cond = Value::Bool(b);
                if self.peek().kind == TokenKind::Tilde {
                    self.advance();
                    self.parse_ternary(cond, tok.location, constants)
                } else {
                    Ok(cond)
                }
            }
            TokenKind::Null => Ok(Value::Null),
            TokenKind::Constant(name) => self.parse_constant_value(name, tok.location, constants),
            TokenKind::OpenList => Ok(Value::List(self.parse_list_literal(constants)?)),
            TokenKind::OpenObj => Ok(Value::Object(self.parse_object_literal(constants)?)),
            other => Err(self.error(tok.location, format!("unexpected token in value position: {other:?}"))),
        }
    }

    fn parse_number_decimal(&self, lexeme: &str, loc: Location) -> Result<Value, Diagnostic> {
        if lexeme.contains('.') {
            let f: f64 = lexeme.parse().map_err(|_| self.error(loc, "invalid decimal literal"))?;
            let nn = NotNan::new(f).map_err(|_| self.error(loc, "decimal literal is NaN"))?;
            Ok(Value::Float(nn))
        } else {
            let i: BigInt = lexeme.parse().map_err(|_| self.error(loc, "invalid integer literal"))?;
            Ok(Value::Int(i))
        }
    }

    fn parse_number_radix(&self, lexeme: &str, radix: u32, loc: Location) -> Result<Value, Diagnostic> {
        let (negative, digits) = match lexeme.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, lexeme),
        };
        let magnitude =
            BigInt::parse_bytes(digits.as_bytes(), radix).ok_or_else(|| self.error(loc, "invalid numeric literal"))?;
        Ok(Value::Int(if negative { -magnitude } else { magnitude }))
    }

    /// Resolves a `$name` backup chain and optional trailing ternary
    /// (constant resolution and the mixed-chain behavior documented in
    /// SPEC_FULL.md: the right-hand side of a `?` is always parsed exactly
    /// once, and a non-constant term always ends the chain).
    fn parse_constant_value(&mut self, first_name: String, first_loc: Location, constants: &Constants) -> Result<Value, Diagnostic> {
        let mut selected = self.try_resolve(&first_name, constants);

        while self.peek().kind == TokenKind::Question {
            self.advance();
            if let TokenKind::Constant(name) = self.peek().kind.clone() {
                self.advance();
                let candidate = self.try_resolve(&name, constants);
                if selected.is_none() {
                    selected = candidate;
                }
            } else {
                let value = self.parse_value(constants)?;
                if selected.is_none() {
                    selected = Some(value);
                }
                break;
            }
        }

        let mut result =
            selected.ok_or_else(|| self.error(first_loc, format!("unresolved constant: `${first_name}`")))?;

        if self.peek().kind == TokenKind::Tilde {
            self.advance();
            result = self.parse_ternary(result, first_loc, constants)?;
        }
        Ok(result)
    }

    /// `cond '~' then '|' else`. Both branches are always parsed, even the
    /// one discarded by selection.
    fn parse_ternary(&mut self, cond: Value, cond_loc: Location, constants: &Constants) -> Result<Value, Diagnostic> {
        let cond_bool = match cond {
            Value::Bool(b) => b,
            other => return Err(self.error(cond_loc, format!("ternary condition must be boolean, found {}", other.kind()))),
        };
        let then_value = self.parse_value(constants)?;
        let pipe = self.advance();
        if pipe.kind != TokenKind::Pipe {
            return Err(self.error(pipe.location, "expected '|' in ternary"));
        }
        let else_value = self.parse_value(constants)?;
        Ok(if cond_bool { then_value } else { else_value })
    }

    fn parse_list_literal(&mut self, constants: &Constants) -> Result<Vec<Value>, Diagnostic> {
        let mut items = Vec::new();
        loop {
            if self.peek().kind == TokenKind::CloseList {
                self.advance();
                return Ok(items);
            }
            items.push(self.parse_value(constants)?);
            match self.peek().kind.clone() {
                TokenKind::Comma => {
                    self.advance();
                    if self.peek().kind == TokenKind::CloseList {
                        self.advance();
                        return Ok(items);
                    }
                }
                TokenKind::CloseList => {
                    self.advance();
                    return Ok(items);
                }
                _ => {
                    let loc = self.loc();
                    return Err(self.error(loc, "expected ',' or ']'"));
                }
            }
        }
    }

    fn parse_object_literal(&mut self, constants: &Constants) -> Result<Object, Diagnostic> {
        let mut obj = Object::new();
        loop {
            if self.peek().kind == TokenKind::CloseObj {
                self.advance();
                return Ok(obj);
            }
            let key = self.parse_key(constants)?;
            self.expect_assign()?;
            let value = self.parse_value(constants)?;
            obj.insert(key, value);
            match self.peek().kind.clone() {
                TokenKind::Comma => {
                    self.advance();
                    if self.peek().kind == TokenKind::CloseObj {
                        self.advance();
                        return Ok(obj);
                    }
                }
                TokenKind::CloseObj => {
                    self.advance();
                    return Ok(obj);
                }
                _ => {
                    let loc = self.loc();
                    return Err(self.error(loc, "expected ',' or '}'"));
                }
            }
        }
    }

    fn parse_deep_key(&mut self, constants: &Constants) -> Result<Vec<String>, Diagnostic> {
        let mut segments = vec![self.parse_key(constants)?];
        while self.peek().kind == TokenKind::Dot {
            self.advance();
            segments.push(self.parse_key(constants)?);
        }
        Ok(segments)
    }

    fn parse_selectors(&mut self, constants: &Constants) -> Result<Vec<Selector>, Diagnostic> {
        let mut out = Vec::new();
        loop {
            if self.peek().kind == TokenKind::CloseObj {
                self.advance();
                return Ok(out);
            }
            let selector = if let TokenKind::Constant(name) = self.peek().kind.clone() {
                self.advance();
                Selector::Constant(name)
            } else {
                Selector::Path(self.parse_deep_key(constants)?)
            };
            out.push(selector);
            match self.peek().kind.clone() {
                TokenKind::Comma => {
                    self.advance();
                    if self.peek().kind == TokenKind::CloseObj {
                        self.advance();
                        return Ok(out);
                    }
                }
                TokenKind::CloseObj => {
                    self.advance();
                    return Ok(out);
                }
                _ => {
                    let loc = self.loc();
                    return Err(self.error(loc, "expected ',' or '}' in import selector list"));
                }
            }
        }
    }

    fn resolve_deep_key<'a>(&self, root: &'a Object, segments: &[String], loc: Location) -> Result<&'a Value, Diagnostic> {
        let mut current = root;
        for (i, segment) in segments.iter().enumerate() {
            let value = current
                .get(segment)
                .ok_or_else(|| self.error(loc, format!("import: path `{}` not found", segments.join("."))))?;
            if i + 1 == segments.len() {
                return Ok(value);
            }
            match value {
                Value::Object(obj) => current = obj,
                _ => {
                    return Err(self.error(loc, format!("import: `{}` is not an object", segments[..=i].join("."))));
                }
            }
        }
        unreachable!("parse_deep_key never returns an empty path")
    }

    fn parse_import(&mut self, directive_loc: Location, values: &mut Object, constants: &mut Constants) -> Result<(), Diagnostic> {
        let selectors = if self.peek().kind == TokenKind::OpenObj {
            self.advance();
            Some(self.parse_selectors(constants)?)
        } else {
            None
        };

        let tok = self.advance();
        let path_parts = match tok.kind {
            TokenKind::String(parts) => parts,
            _ => return Err(self.error(tok.location, "expected a string path after '@import'")),
        };
        let path_str = self.evaluate_string(path_parts, tok.location, constants)?;

        let absolute_path = normalize_path(&self.root_dir.join(&path_str));
        if !self.current_file.is_empty() {
            let current_absolute = normalize_path(&self.root_dir.join(&self.current_file));
            if absolute_path == current_absolute {
                return Err(self.error(directive_loc, "cannot import the same file"));
            }
        }

        if self.cache.is_in_progress(&absolute_path) {
            return Err(self.error(directive_loc, "import cycle detected"));
        }

        let entry = match self.cache.get(&absolute_path) {
            Some(entry) => entry,
            None => self.load_import(&absolute_path, &path_str, directive_loc)?,
        };

        match selectors {
            None => {
                for (k, v) in entry.values.iter() {
                    values.insert(k.clone(), v.clone());
                }
                for (k, v) in entry.constants.iter() {
                    constants.insert(k.clone(), v.clone());
                }
            }
            Some(selectors) => {
                for selector in selectors {
                    match selector {
                        Selector::Constant(name) => {
                            let value = entry.constants.get(&name).ok_or_else(|| {
                                self.error(directive_loc, format!("import: constant `${name}` not found in `{path_str}`"))
                            })?;
                            constants.insert(name, value.clone());
                        }
                        Selector::Path(segments) => {
                            let value = self.resolve_deep_key(&entry.values, &segments, directive_loc)?.clone();
                            let last = segments.into_iter().next_back().expect("non-empty path");
                            values.insert(last, value);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn load_import(&self, absolute_path: &Path, relative_label: &str, directive_loc: Location) -> Result<Rc<CacheEntry>, Diagnostic> {
        self.cache.begin(absolute_path.to_path_buf());

        let text = match std::fs::read_to_string(absolute_path) {
            Ok(text) => text,
            Err(e) => {
                self.cache.abandon(absolute_path);
                return Err(self.error(directive_loc, format!("could not read `{relative_label}`: {e}")));
            }
        };

        let (tokens, diag) = crate::lexer::tokenise(&text, relative_label, &self.relative_dir);
        if let Some(diag) = diag {
            self.cache.abandon(absolute_path);
            return Err(diag);
        }

        let mut child =
            Parser::new(tokens, self.root_dir.clone(), relative_label.to_string(), self.relative_dir.clone(), self.cache.clone());
        match child.parse() {
            Ok((values, constants)) => Ok(self.cache.finish(absolute_path.to_path_buf(), CacheEntry { values, constants })),
            Err(diag) => {
                self.cache.abandon(absolute_path);
                Err(diag)
            }
        }
    }
}

/// Lexically collapses `.`/`..` components without touching the filesystem,
/// so self-import/cycle checks work even for sources that were not read
/// from disk (e.g. `relative_dir` pointing at a nonexistent root in tests).
/// `pub(crate)` so `lib.rs` can register the root file under the same key
/// import cycle detection uses.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            std::path::Component::CurDir => {}
            std::path::Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
