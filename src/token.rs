//! Lexical token types and the word-rule shared by the lexer and the
//! mconf-form key printer.

use crate::location::Location;

/// A lexically typed token with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    pub fn new(kind: TokenKind, location: Location) -> Self {
        Token { kind, location }
    }
}

/// An interpolated string literal: concatenating `parts[0] + subs[0] +
/// parts[1] + ... + parts[n]` yields the fully-substituted text.
///
/// Invariant: `parts.len() == subs.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct StringParts {
    pub parts: Vec<String>,
    pub subs: Vec<String>,
}

impl StringParts {
    pub fn plain(text: impl Into<String>) -> Self {
        StringParts { parts: vec![text.into()], subs: Vec::new() }
    }

    pub fn invariant_holds(&self) -> bool {
        self.parts.len() == self.subs.len() + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Key(String),
    Constant(String),
    Assign,
    Dot,
    Comma,
    Question,
    Tilde,
    Pipe,
    OpenList,
    CloseList,
    OpenObj,
    CloseObj,
    Directive(String),
    Bool(bool),
    Null,
    NumberDecimal(String),
    NumberHex(String),
    NumberBinary(String),
    String(StringParts),
    Eof,
}

/// A word starts with a Latin letter or `_` and continues with
/// Latin letters, `_`, or ASCII digits.
pub fn is_legal_word_start(c: char) -> bool {
    c == '_' || (c.is_alphabetic() && c.is_ascii() || is_latin_letter(c))
}

fn is_latin_letter(c: char) -> bool {
    // Unicode "Latin" script, approximated via the alphabetic Unicode
    // general category restricted to the scalar ranges the reference
    // tokeniser accepts for identifiers; ASCII letters are the common case.
    c.is_ascii_alphabetic() || matches!(c, '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}')
}

pub fn is_legal_word_continue(c: char) -> bool {
    is_legal_word_start(c) || c.is_ascii_digit()
}

/// Whether `s` is a legal bare word per the tokeniser's word rule, used by
/// the mconf-form printer to decide whether an object key needs quoting.
pub fn is_legal_word(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_legal_word_start(c) => {}
        _ => return false,
    }
    chars.all(is_legal_word_continue)
}

/// Words the tokeniser maps to `TokenKind::Bool`/`TokenKind::Null` rather
/// than a bare `Key`. A key equal to one of these can't round-trip unquoted.
const RESERVED_WORDS: &[&str] = &["true", "yes", "on", "false", "no", "off", "null"];

/// Whether `s` would tokenise as a bare key if printed unquoted: a legal
/// word that isn't one of the reserved `Bool`/`Null` literals.
pub fn is_bare_key(s: &str) -> bool {
    is_legal_word(s) && !RESERVED_WORDS.contains(&s)
}
