//! Runs the `khabari` binary against a temporary storage directory.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::Path;
use std::process::{Command, Output};

use khabari_infrastructure::STORAGE_FILE;
use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_khabari"))
            .arg("--storage-dir")
            .arg(self.path())
            .args(args)
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("HOME", self.path())
            .env("KHABARI_EXPORT_DIR", self.path().join("exports"))
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    fn ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }
}

#[test]
fn first_run_lists_one_tab() {
    let ws = Workspace::new();
    let out = ws.ok(&["tabs"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("*  1  GET     New Request"));
}

#[test]
fn url_and_params_stay_in_sync_across_runs() {
    let ws = Workspace::new();
    ws.ok(&["url", "https://api.test/search?q=rust&page=1"]);
    ws.ok(&["param", "toggle", "1"]);
    let out = ws.ok(&["param", "set", "2", "sort", "desc"]);

    assert!(out.starts_with("GET https://api.test/search?q=rust&sort=desc\n[params]\n"));
    assert!(out.contains("  1 off page=1"));
    assert!(ws.path().join(STORAGE_FILE).exists());
}

#[test]
fn tabs_open_switch_and_close() {
    let ws = Workspace::new();
    ws.ok(&["new-tab"]);
    ws.ok(&["rename", "Login"]);
    let out = ws.ok(&["switch", "1"]);
    assert!(out.starts_with("GET "));

    let tabs = ws.ok(&["tabs"]);
    assert!(tabs.lines().next().unwrap().starts_with("*  1"));
    assert!(tabs.contains("Login"));

    ws.ok(&["close", "2"]);
    let refused = ws.run(&["close", "1"]);
    assert!(!refused.status.success());
    assert!(String::from_utf8_lossy(&refused.stderr).contains("cannot close the last tab"));
}

#[test]
fn failed_send_is_shown_and_kept_in_history() {
    let ws = Workspace::new();
    let out = ws.ok(&["send"]);
    assert!(out.starts_with("Error: URL is required\n"));

    let history = ws.ok(&["history"]);
    assert!(history.starts_with("just now"));

    let shown = ws.ok(&["show", "--view", "raw"]);
    assert!(shown.contains("\"status\": 0"));

    assert!(ws.ok(&["history", "--clear"]).starts_with("history cleared"));
    assert_eq!(ws.ok(&["history"]), "(no history)\n");
}

#[test]
fn export_writes_a_json_file() {
    let ws = Workspace::new();
    let missing = ws.run(&["export"]);
    assert!(!missing.status.success());

    ws.ok(&["send"]);
    let out = ws.ok(&["export", "--view", "raw"]);
    let path = Path::new(out.trim());

    assert!(path.starts_with(ws.path().join("exports")));
    let name = path.file_name().unwrap().to_string_lossy();
    assert!(name.starts_with("response-raw-"));
    assert!(name.ends_with(".json"));
    let content: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(content["status"], 0);
}

#[test]
fn collections_add_search_and_delete() {
    let ws = Workspace::new();
    let root = ws.ok(&["collection", "add", "Payments"]);
    let root = root.trim();
    ws.ok(&["collection", "add", "Refunds", "--parent", root]);
    ws.ok(&["collection", "add", "Users"]);

    let found = ws.ok(&["collection", "search", "REFUND"]);
    assert!(found.starts_with("Payments"));
    assert!(found.contains("\n  Refunds"));
    assert!(!found.contains("Users"));

    ws.ok(&["collection", "rm", root]);
    let tree = ws.ok(&["collection", "tree"]);
    assert!(tree.starts_with("Users"));
    assert_eq!(tree.lines().count(), 1);
}

#[test]
fn blank_rename_is_rejected() {
    let ws = Workspace::new();
    let output = ws.run(&["rename", "   "]);
    assert!(!output.status.success());
}
