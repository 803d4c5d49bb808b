//! Optional `ariadne`-backed pretty rendering of a [`Diagnostic`], gated by
//! the `report` feature so consumers who don't want the dependency can
//! skip it.

#[cfg(feature = "report")]
use crate::location::Diagnostic;

#[cfg(feature = "report")]
impl Diagnostic {
    /// Builds an `ariadne` report pointing at this diagnostic's location
    /// within `source`. The plain [`std::fmt::Display`] impl on
    /// [`Diagnostic`] remains the canonical, dependency-free rendering;
    /// this is an additive convenience for terminal front-ends.
    pub fn to_report(&self, source: &str) -> ariadne::Report<'static, (String, std::ops::Range<usize>)> {
        let offset = byte_offset_of(source, self.location);
        let span = (self.file_label.clone(), offset..offset + 1);
        ariadne::Report::build(ariadne::ReportKind::Error, span.clone())
            .with_message(format!("{} error", self.stage))
            .with_label(ariadne::Label::new(span).with_message(self.message.clone()))
            .finish()
    }
}

#[cfg(feature = "report")]
fn byte_offset_of(source: &str, location: crate::location::Location) -> usize {
    if location.is_eof() {
        return source.len();
    }
    let mut line = 1u32;
    let mut col = 1u32;
    for (offset, ch) in source.char_indices() {
        if line == location.line && col == location.col {
            return offset;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    source.len()
}
