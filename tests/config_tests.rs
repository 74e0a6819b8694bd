//! Integration tests for the config command

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{init_mon_wed, notes_cmd};

#[test]
fn test_config_get_title() {
    let temp = TempDir::new().unwrap();
    init_mon_wed(temp.path());

    notes_cmd()
        .current_dir(temp.path())
        .args(["config", "title"])
        .assert()
        .success()
        .stdout("Test Class\n");
}

#[test]
fn test_config_set_author_regenerates_aggregate() {
    let temp = TempDir::new().unwrap();
    init_mon_wed(temp.path());

    notes_cmd()
        .current_dir(temp.path())
        .args(["config", "author", "Ada Lovelace"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set author = Ada Lovelace"));

    let aggregate = fs::read_to_string(temp.path().join(".notes/notes.tex")).unwrap();
    assert!(aggregate.contains("\\author{Ada Lovelace}"));
}

#[test]
fn test_config_set_date_format_rewrites_wrappers() {
    let temp = TempDir::new().unwrap();
    init_mon_wed(temp.path());

    notes_cmd()
        .current_dir(temp.path())
        .args(["config", "date_format", "%Y-%m-%d"])
        .assert()
        .success();

    let wrapper = fs::read_to_string(temp.path().join(".notes/lec02.tex")).unwrap();
    assert!(wrapper.contains("2024-01-03"));
    assert!(!wrapper.contains("January"));
}

#[test]
fn test_config_list() {
    let temp = TempDir::new().unwrap();
    init_mon_wed(temp.path());

    notes_cmd()
        .current_dir(temp.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("title = Test Class"))
        .stdout(predicate::str::contains("document_class = article"));
}

#[test]
fn test_config_unknown_key() {
    let temp = TempDir::new().unwrap();
    init_mon_wed(temp.path());

    notes_cmd()
        .current_dir(temp.path())
        .args(["config", "editor", "vim"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown config key"));
}
