//! `mconf`: a configuration language's tokeniser, parser/evaluator, and
//! value printers.
//!
//! ```
//! let (values, _constants) = mconf::parse_str("a = 1\nb = \"two\"", ".").unwrap();
//! assert_eq!(mconf::to_json_string(&values["a"]), "1");
//! ```

pub mod cache;
pub mod location;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod report;
pub mod token;
pub mod value;

use std::path::Path;
use std::rc::Rc;

pub use cache::{CacheEntry, ImportCache};
pub use location::{Diagnostic, Location, Stage};
pub use parser::Parser;
pub use printer::{to_json_string, value_to_string};
pub use token::{Token, TokenKind};
pub use value::{Constants, Kind, Object, Value};

pub use lexer::tokenise;

/// Parses `text` as a standalone source (no file, `root_dir` only used if
/// the source contains an `@import`), mirroring the core `parse` API with
/// a freshly created [`ImportCache`].
pub fn parse_str(text: &str, root_dir: impl AsRef<Path>) -> Result<(Object, Constants), Diagnostic> {
    let (tokens, diag) = tokenise(text, "", "");
    if let Some(diag) = diag {
        return Err(diag);
    }
    let cache = Rc::new(ImportCache::new());
    let mut parser = Parser::new(tokens, root_dir.as_ref(), "", "", cache);
    parser.parse()
}

/// Reads and parses `path`, using its parent directory as `root_dir` so
/// sibling `@import` paths resolve naturally.
///
/// The root file is registered in a fresh [`ImportCache`] under its own
/// absolute path before parsing begins, the same way an `@import`ed file
/// is registered: this lets an indirect cycle that loops back through the
/// root (`root -> a -> root`) be caught by the same in-progress check that
/// catches cycles among imported files.
pub fn parse_file(path: impl AsRef<Path>) -> Result<(Object, Constants), Diagnostic> {
    let path = path.as_ref();
    let root_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_label = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let absolute_path = parser::normalize_path(&root_dir.join(&file_label));

    let text = std::fs::read_to_string(path).map_err(|e| {
        Diagnostic::new(Stage::Parser, file_label.clone(), Location::EOF, format!("could not read `{file_label}`: {e}"))
    })?;

    let (tokens, diag) = tokenise(&text, &file_label, "");
    if let Some(diag) = diag {
        return Err(diag);
    }

    let cache = Rc::new(ImportCache::new());
    cache.begin(absolute_path.clone());
    let mut parser = Parser::new(tokens, root_dir, file_label, "", cache.clone());
    match parser.parse() {
        Ok((values, constants)) => {
            cache.finish(absolute_path, CacheEntry { values: values.clone(), constants: constants.clone() });
            Ok((values, constants))
        }
        Err(diag) => {
            cache.abandon(&absolute_path);
            Err(diag)
        }
    }
}
