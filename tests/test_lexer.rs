use mconf::{Location, TokenKind, tokenise};

fn kinds(src: &str) -> Vec<TokenKind> {
    let (tokens, diag) = tokenise(src, "", "");
    assert!(diag.is_none(), "unexpected tokeniser error: {diag:?}");
    tokens.into_iter().map(|t| t.kind).collect()
}

#[rstest::rstest]
#[case("true", TokenKind::Bool(true))]
#[case("yes", TokenKind::Bool(true))]
#[case("on", TokenKind::Bool(true))]
#[case("false", TokenKind::Bool(false))]
#[case("no", TokenKind::Bool(false))]
#[case("off", TokenKind::Bool(false))]
#[case("null", TokenKind::Null)]
fn keyword_words(#[case] input: &str, #[case] expected: TokenKind) {
    let mut ks = kinds(input);
    assert_eq!(ks.remove(0), expected);
}

#[rstest::rstest]
#[case("a_key", "a_key")]
#[case("_leading", "_leading")]
#[case("camelCase123", "camelCase123")]
fn plain_word_is_key(#[case] input: &str, #[case] expected: &str) {
    let mut ks = kinds(input);
    assert_eq!(ks.remove(0), TokenKind::Key(expected.to_string()));
}

#[test]
fn key_followed_by_dot_emits_dot_token() {
    let ks = kinds("server.host");
    assert_eq!(
        ks,
        vec![
            TokenKind::Key("server".to_string()),
            TokenKind::Dot,
            TokenKind::Key("host".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[rstest::rstest]
#[case("0xFF", TokenKind::NumberHex("FF".to_string()))]
#[case("0b1010", TokenKind::NumberBinary("1010".to_string()))]
#[case("1_000.5", TokenKind::NumberDecimal("1000.5".to_string()))]
#[case("2.5e3", TokenKind::NumberDecimal("2.5e3".to_string()))]
#[case(".5", TokenKind::NumberDecimal("0.5".to_string()))]
#[case("-3", TokenKind::NumberDecimal("-3".to_string()))]
fn number_lexemes(#[case] input: &str, #[case] expected: TokenKind) {
    let mut ks = kinds(input);
    assert_eq!(ks.remove(0), expected);
}

#[test]
fn hex_prefix_without_digits_is_an_error() {
    let (tokens, diag) = tokenise("0x", "f.mconf", "");
    assert!(tokens.is_empty());
    assert!(diag.is_some());
}

#[test]
fn unterminated_string_is_an_error() {
    let (_, diag) = tokenise("\"abc", "f.mconf", "");
    let diag = diag.expect("expected a diagnostic");
    assert!(diag.message.contains("unterminated string"));
}

#[test]
fn unknown_escape_is_an_error() {
    let (_, diag) = tokenise(r#""\q""#, "f.mconf", "");
    assert!(diag.is_some());
}

fn assert_plain_string(kind: &TokenKind, expected: &str) {
    match kind {
        TokenKind::String(parts) => {
            assert_eq!(parts.subs.len(), 0);
            assert_eq!(parts.parts[0], expected);
        }
        other => panic!("expected a plain string token, got {other:?}"),
    }
}

#[test]
fn simple_escapes_decode() {
    let ks = kinds(r#""\n\t\r\\\"""#);
    assert_plain_string(&ks[0], "\n\t\r\\\"");
}

#[test]
fn dollar_escape_prevents_interpolation() {
    let ks = kinds(r#""\${not_a_sub}""#);
    assert_plain_string(&ks[0], "${not_a_sub}");
}

#[test]
fn interpolation_splits_parts_and_subs() {
    let ks = kinds(r#""hello ${name}!""#);
    match &ks[0] {
        TokenKind::String(parts) => {
            assert!(parts.invariant_holds());
            assert_eq!(parts.parts, vec!["hello ".to_string(), "!".to_string()]);
            assert_eq!(parts.subs, vec!["name".to_string()]);
        }
        other => panic!("expected a string token, got {other:?}"),
    }
}

#[test]
fn surrogate_pair_combines_to_a_single_scalar() {
    let ks = kinds("\"\\uD834\\uDD1E\"");
    assert_plain_string(&ks[0], "\u{1D11E}");
}

#[test]
fn lone_high_surrogate_becomes_replacement_character() {
    let ks = kinds(r#""\uD834x""#);
    assert_plain_string(&ks[0], "\u{FFFD}x");
}

#[rstest::rstest]
#[case("=", TokenKind::Assign)]
#[case(":", TokenKind::Assign)]
#[case("~", TokenKind::Tilde)]
#[case("|", TokenKind::Pipe)]
#[case("[", TokenKind::OpenList)]
#[case("]", TokenKind::CloseList)]
#[case("{", TokenKind::OpenObj)]
#[case("}", TokenKind::CloseObj)]
#[case(",", TokenKind::Comma)]
#[case("?", TokenKind::Question)]
fn single_char_tokens(#[case] input: &str, #[case] expected: TokenKind) {
    let mut ks = kinds(input);
    assert_eq!(ks.remove(0), expected);
}

#[test]
fn constant_and_directive_tokens() {
    let ks = kinds("$name @import");
    assert_eq!(
        ks,
        vec![
            TokenKind::Constant("name".to_string()),
            TokenKind::Directive("import".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_are_discarded() {
    let ks = kinds("a = 1 # trailing comment\nb = 2");
    assert!(!ks.iter().any(|k| matches!(k, TokenKind::String(_))));
}

#[test]
fn empty_input_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
    let (tokens, diag) = tokenise("", "", "");
    assert!(diag.is_none());
    assert_eq!(tokens[0].location, Location::EOF);
}

#[test]
fn unexpected_character_is_an_error() {
    let (_, diag) = tokenise("^", "f.mconf", "");
    assert!(diag.is_some());
}
