//! Which Folio modules and external crates each part of the backend may use.

use std::fmt;
use std::path::{Component, Path};

/// Where a backend source file sits in the hexagon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Domain,
    Inbound,
    Outbound,
    Middleware,
    /// `lib.rs`, `doc.rs` and anything else at the library root.
    LibraryRoot,
    /// `main.rs` and the binary-only `server` module.
    Binary,
}

/// Top-level modules of the library and the binary.
const MODULES: [&str; 6] = [
    "domain",
    "inbound",
    "outbound",
    "middleware",
    "doc",
    "server",
];

/// External crates limited to the layers that own their concern.
const CONFINED_CRATES: [(&str, &[Layer]); 5] = [
    ("reqwest", &[Layer::Outbound, Layer::Binary]),
    ("url", &[Layer::Outbound, Layer::Binary]),
    (
        "actix_web",
        &[Layer::Inbound, Layer::Middleware, Layer::Binary],
    ),
    ("actix_session", &[Layer::Inbound, Layer::Binary]),
    ("utoipa_swagger_ui", &[Layer::Binary]),
];

impl Layer {
    /// Classify a path relative to `backend/src`.
    pub fn classify(relative: &Path) -> Self {
        let first = relative
            .components()
            .find_map(|component| match component {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .unwrap_or_default();
        match first {
            "domain" => Self::Domain,
            "inbound" => Self::Inbound,
            "outbound" => Self::Outbound,
            "middleware" => Self::Middleware,
            "server" | "main.rs" => Self::Binary,
            _ => Self::LibraryRoot,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
            Self::Middleware => "middleware",
            Self::LibraryRoot => "library root",
            Self::Binary => "binary",
        }
    }

    /// Folio modules this layer may name.
    fn reachable_modules(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["domain"],
            Self::Inbound => &["domain", "inbound"],
            Self::Outbound => &["domain", "outbound"],
            Self::Middleware => &["domain", "middleware"],
            Self::LibraryRoot => &["domain", "inbound", "outbound", "middleware", "doc"],
            Self::Binary => &MODULES,
        }
    }

    /// Problem with `path` when it appears in a file of this layer.
    pub(crate) fn check(self, path: &[String]) -> Option<String> {
        if let Some(module) = folio_module(path) {
            return (!self.reachable_modules().contains(&module))
                .then(|| format!("{self} code must not reach `{module}`"));
        }

        let root = path.first()?.as_str();
        if let Some((name, owners)) = CONFINED_CRATES.iter().find(|(name, _)| *name == root) {
            return (!owners.contains(&self)).then(|| {
                let owners: Vec<&str> = owners.iter().map(|owner| owner.name()).collect();
                format!("`{name}` belongs to {} code only", owners.join(", "))
            });
        }

        (self != Self::Binary && reads_process_env(path)).then(|| {
            "the process environment is read by the binary only; take a `mockable::Env`"
                .to_owned()
        })
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Folio module named by `path`, if any.
///
/// Bare single-segment paths are local bindings, not modules.
fn folio_module(path: &[String]) -> Option<&'static str> {
    let mut segments = path.iter().map(String::as_str);
    let first = segments.next()?;
    let module = match first {
        "folio" => segments.next()?,
        "crate" | "self" | "super" => segments.find(|s| !matches!(*s, "self" | "super"))?,
        _ if path.len() > 1 => first,
        _ => return None,
    };
    MODULES.iter().find(|known| **known == module).copied()
}

fn reads_process_env(path: &[String]) -> bool {
    matches!(path, [std, env, ..] if std == "std" && env == "env")
}
