use std::process::ExitCode;

/// Illustrates the public contract end-to-end: parse one file, print its
/// top-level values in mconf form. Argument parsing, property indexing,
/// `.env` loading, and output-format selection are a front-end's job, not
/// the core's — see SPEC_FULL.md.
fn main() -> ExitCode {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: mconf-dump <file>");
        return ExitCode::FAILURE;
    };

    match mconf::parse_file(&path) {
        Ok((values, _constants)) => {
            println!("{}", mconf::value_to_string(&mconf::Value::Object(values), 2));
            ExitCode::SUCCESS
        }
        Err(diag) => {
            eprintln!("{diag}");
            ExitCode::FAILURE
        }
    }
}
