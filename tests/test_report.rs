#![cfg(feature = "report")]

use mconf::{Diagnostic, Location, Stage};

#[test]
fn builds_a_report_without_panicking() {
    let diag = Diagnostic::new(Stage::Parser, "demo.mconf".to_string(), Location::new(1, 1), "boom");
    let _ = diag.to_report("a = 1");
}

#[test]
fn eof_diagnostics_point_past_the_end_of_source() {
    let diag = Diagnostic::new(Stage::Tokeniser, "demo.mconf".to_string(), Location::EOF, "unterminated string");
    let _ = diag.to_report("a = \"unterminated");
}
