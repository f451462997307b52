#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A `strata` command running in `dir`, with `HOME` pointed at `home` so the
/// user's real configuration is never read.
pub fn strata_cmd(dir: &Path, home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("strata").unwrap();
    cmd.current_dir(dir).env("HOME", home).env_remove("RUST_LOG");
    cmd
}

pub fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A project with a root module and `acme/blog`, `acme/theme`, both mapping
/// `/acme/views`. `theme_extra` is spliced into the theme's module file.
pub fn project(root_extra: &str, theme_extra: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        &tmp.path().join("strata.json"),
        &format!(
            r#"{{
                "name": "acme/site",
                {root_extra}
                "modules": {{
                    "acme/blog": {{"install-path": "vendor/blog"}},
                    "acme/theme": {{"install-path": "vendor/theme"}}
                }}
            }}"#
        ),
    );
    write(
        &tmp.path().join("vendor/blog/strata.json"),
        r#"{"name": "acme/blog", "resources": {"/acme/views": "views", "/acme/css": "css"}}"#,
    );
    write(
        &tmp.path().join("vendor/theme/strata.json"),
        &format!(
            r#"{{"name": "acme/theme", {theme_extra} "resources": {{"/acme/views": "views"}}}}"#
        ),
    );
    tmp
}
