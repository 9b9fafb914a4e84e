//! Module-boundary lint for the Folio backend.
//!
//! The library splits into `domain`, `inbound`, `outbound` and `middleware`.
//! The binary adds `server`, the one place where Payload adapters are wired
//! to handlers. Every `.rs` file under `backend/src` is parsed with `syn`,
//! assigned a [`Layer`] from its location and checked for:
//!
//! - names of Folio modules the layer may not reach, including the
//!   binary-only `server` module from anywhere in the library;
//! - external crates confined to other layers (`reqwest` and `url` to the
//!   Payload adapters, `actix_session` to the HTTP adapter, Swagger UI to
//!   the binary);
//! - direct reads of the process environment outside the binary.

mod paths;
mod rules;

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use rules::Layer;

/// One rule broken by one file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Violation {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    pub layer: Layer,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.file.display(), self.layer, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot parse {}: {message}", .file.display())]
    Parse { file: PathBuf, message: String },
    #[error("{} module boundary violation(s):\n{}", .0.len(), render(.0))]
    Violations(Vec<Violation>),
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| format!("  {violation}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A source file and its path relative to `backend/src`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    pub file: PathBuf,
    pub contents: String,
}

impl LintSource {
    pub fn new(file: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            contents: contents.into(),
        }
    }
}

/// Lint every `.rs` file under `backend_dir/src`, returning how many were
/// checked.
///
/// # Errors
/// [`LintError::Violations`] lists every broken rule; I/O and parse failures
/// stop the run.
pub fn lint_backend(backend_dir: &Path) -> Result<usize, LintError> {
    let src = backend_dir.join("src");
    let sources = read_sources(&src)?;
    lint_sources(&sources)?;
    Ok(sources.len())
}

/// Lint in-memory sources.
///
/// # Errors
/// As for [`lint_backend`].
pub fn lint_sources(sources: &[LintSource]) -> Result<(), LintError> {
    let mut violations = BTreeSet::new();
    for source in sources {
        let parsed = syn::parse_file(&source.contents).map_err(|err| LintError::Parse {
            file: source.file.clone(),
            message: err.to_string(),
        })?;
        let layer = Layer::classify(&source.file);
        for path in paths::named_paths(&parsed) {
            if let Some(message) = layer.check(&path) {
                violations.insert(Violation {
                    file: source.file.clone(),
                    layer,
                    message,
                });
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(LintError::Violations(violations.into_iter().collect()))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> LintError + use<> {
    let path = path.to_path_buf();
    move |source| LintError::Io { path, source }
}

fn read_sources(src: &Path) -> Result<Vec<LintSource>, LintError> {
    let mut sources = Vec::new();
    let mut pending = vec![src.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).map_err(io_error(&dir))? {
            let path = entry.map_err(io_error(&dir))?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let contents = fs::read_to_string(&path).map_err(io_error(&path))?;
                let file = path.strip_prefix(src).unwrap_or(&path).to_path_buf();
                sources.push(LintSource { file, contents });
            }
        }
    }
    sources.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(sources)
}
