mod common;

use common::{project, strata_cmd};
use predicates::prelude::*;

#[test]
fn test_why_prints_override_chain() {
    let tmp = project(r#""override": "acme/theme","#, r#""override": "acme/blog","#);

    strata_cmd(tmp.path(), tmp.path())
        .args(["why", "acme/blog", "acme/site"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"acme/site\" overrides \"acme/blog\":\nacme/blog\n  acme/theme\n    acme/site\n",
        ));
}

#[test]
fn test_why_without_path() {
    let tmp = project("", "");

    strata_cmd(tmp.path(), tmp.path())
        .args(["why", "acme/blog", "acme/theme"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "\"acme/theme\" does not override \"acme/blog\".",
        ));
}

#[test]
fn test_why_unknown_module_fails() {
    let tmp = project("", "");

    strata_cmd(tmp.path(), tmp.path())
        .args(["why", "acme/blog", "acme/ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("acme/ghost"));
}

#[test]
fn test_graph_prints_dot() {
    let tmp = project("", r#""override": "acme/blog","#);

    strata_cmd(tmp.path(), tmp.path())
        .args(["graph"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph"))
        .stdout(predicate::str::contains("acme/theme"));
}
