//! Runs the lint over backend trees on disk.

use std::fs;
use std::path::Path;

use architecture_lint::{Layer, LintError, lint_backend};
use rstest::{fixture, rstest};
use tempfile::TempDir;

fn write_source(backend: &Path, relative: &str, contents: &str) {
    let path = backend.join("src").join(relative);
    let parent = path.parent().expect("source has a parent directory");
    fs::create_dir_all(parent).expect("create module directory");
    fs::write(path, contents).expect("write source");
}

#[fixture]
fn backend() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();
    write_source(root, "lib.rs", "pub mod domain; pub mod outbound;");
    write_source(
        root,
        "domain/post.rs",
        "use crate::domain::slug::Slug; pub struct Post { pub slug: Slug }",
    );
    write_source(
        root,
        "outbound/payload/http_source.rs",
        "use reqwest::Client; use crate::domain::post::Post; fn fetch(_: Client) -> Option<Post> { None }",
    );
    write_source(
        root,
        "server/config.rs",
        "fn bind() -> Option<String> { std::env::var(\"BIND_ADDR\").ok() }",
    );
    write_source(root, "main.rs", "mod server; fn main() {}");
    write_source(root, "notes.txt", "not rust");
    dir
}

#[rstest]
fn clean_tree_reports_the_files_checked(backend: TempDir) {
    assert_eq!(lint_backend(backend.path()).expect("clean tree"), 5);
}

#[rstest]
fn violations_are_sorted_by_file(backend: TempDir) {
    write_source(
        backend.path(),
        "outbound/payload/session_auth.rs",
        "use actix_session::Session;",
    );
    write_source(
        backend.path(),
        "domain/config.rs",
        "fn secret() -> Option<String> { std::env::var(\"PAYLOAD_SECRET\").ok() }",
    );

    match lint_backend(backend.path()) {
        Err(LintError::Violations(violations)) => {
            let layers: Vec<Layer> = violations.iter().map(|v| v.layer).collect();
            assert_eq!(layers, [Layer::Domain, Layer::Outbound]);
            assert!(violations[1].message.contains("actix_session"));
        }
        other => panic!("expected violations, got {other:?}"),
    }
}

#[rstest]
fn missing_source_directory_is_an_io_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = lint_backend(dir.path()).expect_err("no src directory");
    assert!(matches!(err, LintError::Io { .. }));
    assert!(err.to_string().starts_with("cannot read"));
}

#[rstest]
fn folio_backend_respects_its_boundaries() {
    let backend = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../backend");
    let checked = lint_backend(&backend).unwrap_or_else(|err| panic!("{err}"));
    assert!(checked > 40);
}
