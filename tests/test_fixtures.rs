use rstest::rstest;
use std::path::PathBuf;

#[rstest]
fn fixture_parses_cleanly(#[files("tests/test-cases/**/*.mconf")] path: PathBuf) {
    let (values, _constants) =
        mconf::parse_file(&path).unwrap_or_else(|e| panic!("{} failed to parse: {e}", path.display()));
    // Fixtures exist to exercise the tokeniser/parser over realistic
    // programs, not to assert specific content: every one of them is
    // expected to produce at least one top-level entry.
    assert!(!values.is_empty(), "{} produced no values", path.display());
}
