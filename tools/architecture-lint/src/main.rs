//! `cargo run -p architecture-lint [BACKEND_DIR]`
//!
//! Defaults to the `backend/` crate next to this tool.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let backend = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("../../backend"));

    match architecture_lint::lint_backend(&backend) {
        Ok(checked) => {
            let _ = writeln!(
                io::stdout().lock(),
                "{checked} files under {} respect the module boundaries",
                backend.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "{err}");
            ExitCode::FAILURE
        }
    }
}
