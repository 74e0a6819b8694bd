use assert_cmd::Command;
use std::path::Path;

pub fn notes_cmd() -> Command {
    let mut cmd = Command::cargo_bin("notes").unwrap();
    cmd.env_remove("NOTES_ROOT");
    cmd.env_remove("NOTES_LOG");
    cmd
}

/// Initialize a Mon/Wed class running 2024-01-01..2024-01-10 (four lectures)
#[allow(dead_code)]
pub fn init_mon_wed(root: &Path) {
    notes_cmd()
        .arg("init")
        .arg(root)
        .args(["--days", "MW", "--first", "2024-01-01", "--last", "2024-01-10"])
        .args(["--title", "Test Class"])
        .assert()
        .success();
}
