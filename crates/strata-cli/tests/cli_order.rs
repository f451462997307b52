mod common;

use common::{project, strata_cmd};
use predicates::prelude::*;

#[test]
fn test_order_lists_overridden_modules_first() {
    let tmp = project(r#""override": "acme/theme","#, r#""override": "acme/blog","#);

    strata_cmd(tmp.path(), tmp.path())
        .args(["order"])
        .assert()
        .success()
        .stdout("acme/blog\nacme/theme\nacme/site\n");
}

#[test]
fn test_order_without_overrides_keeps_load_order() {
    let tmp = project("", "");

    strata_cmd(tmp.path(), tmp.path())
        .args(["order"])
        .assert()
        .success()
        .stdout(predicate::eq("acme/site\nacme/blog\nacme/theme\n"));
}
