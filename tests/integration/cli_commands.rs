//! Integration tests for the dirsnap binary: output text and exit codes.

use super::test_utils::sample_tree;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Isolated environment: workspace with a sample tree, empty config home.
struct CliEnv {
    _temp_dir: TempDir,
    workspace: PathBuf,
    root: PathBuf,
    config_home: PathBuf,
}

impl CliEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let workspace = temp_dir.path().join("ws");
        let root = workspace.join("tree");
        let config_home = temp_dir.path().join("config");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&config_home).unwrap();
        sample_tree(&root);
        Self {
            _temp_dir: temp_dir,
            workspace,
            root,
            config_home,
        }
    }

    fn run(&self, args: &[&str]) -> Output {
        self.run_in(&self.workspace, args)
    }

    fn run_in(&self, dir: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_dirsnap"))
            .current_dir(dir)
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env("XDG_STATE_HOME", self.config_home.join("state"))
            .env_remove("DIRSNAP_LOG")
            .arg("--quiet")
            .args(args)
            .output()
            .unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_snapshot_then_compare_correct() {
    let env = CliEnv::new();

    let output = env.run(&["snapshot", path_arg(&env.root), "-o", "base.json"]);
    assert_eq!(output.status.code(), Some(0), "stderr={:?}", output.stderr);
    assert!(stdout(&output).contains("3 entries, 15 bytes"));
    assert!(env.workspace.join("base.json").exists());

    let output = env.run(&["compare", path_arg(&env.root), "-s", "base.json"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output).trim(), "The directory is correct.");
}

#[test]
fn test_compare_incorrect_exits_two() {
    let env = CliEnv::new();
    let output = env.run(&["snapshot", path_arg(&env.root)]);
    assert_eq!(output.status.code(), Some(0));
    assert!(env.workspace.join("dirsnap.snapshot.json").exists());

    fs::remove_file(env.root.join("a.txt")).unwrap();
    fs::write(env.root.join("d.txt"), "new").unwrap();

    let output = env.run(&["compare", path_arg(&env.root)]);
    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert!(text.contains("The directory has the following extra file(s):"));
    assert!(text.contains("d.txt"));
    assert!(text.contains("The directory is missing the following file(s):"));
    assert!(text.contains("a.txt"));
    assert!(text.contains("The directory is incorrect."));
}

#[test]
fn test_compare_json_output() {
    let env = CliEnv::new();
    env.run(&["snapshot", path_arg(&env.root), "-o", "base.bin"]);
    fs::remove_dir_all(env.root.join("b")).unwrap();

    let output = env.run(&[
        "compare",
        path_arg(&env.root),
        "-s",
        "base.bin",
        "--format",
        "json",
    ]);
    assert_eq!(output.status.code(), Some(2));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["verdict"], "incorrect");
    assert_eq!(value["missing"], serde_json::json!(["b", "b/c.txt"]));
    assert_eq!(value["extra"], serde_json::json!([]));
}

#[test]
fn test_compare_missing_snapshot_exits_one() {
    let env = CliEnv::new();
    let output = env.run(&["compare", path_arg(&env.root), "-s", "nope.json"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error:"), "stderr={}", stderr);
}

#[test]
fn test_snapshot_missing_root_exits_one() {
    let env = CliEnv::new();
    let output = env.run(&["snapshot", path_arg(&env.workspace.join("missing"))]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_show_lists_entries() {
    let env = CliEnv::new();
    env.run(&["snapshot", path_arg(&env.root), "-o", "base.json"]);

    let output = env.run(&["show", "base.json"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("Entries: 3"));
    assert!(text.contains("b/c.txt"));
}

#[test]
fn test_inspect_subdirectory() {
    let env = CliEnv::new();
    let output = env.run(&["inspect", path_arg(&env.root), "--path", "b"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("(10 bytes, 1 children)"));
    assert!(text.contains("c.txt"));
}

#[test]
fn test_workspace_config_sets_default_snapshot_path() {
    let env = CliEnv::new();
    fs::write(
        env.workspace.join("dirsnap.toml"),
        "[storage]\nsnapshot_path = \"snaps/custom.bin\"\n",
    )
    .unwrap();

    let output = env.run(&["snapshot", path_arg(&env.root)]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("(bincode)"));
    assert!(env.workspace.join("snaps").join("custom.bin").exists());
}

#[test]
fn test_default_baseline_inside_root_is_ignored() {
    let env = CliEnv::new();

    let output = env.run_in(&env.root, &["snapshot", "."]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("3 entries"));
    assert!(env.root.join("dirsnap.snapshot.json").exists());

    let output = env.run_in(&env.root, &["compare", "."]);
    assert_eq!(output.status.code(), Some(0), "stdout={}", stdout(&output));
    assert_eq!(stdout(&output).trim(), "The directory is correct.");

    fs::write(env.root.join("d.txt"), "new").unwrap();
    let output = env.run_in(&env.root, &["compare", "."]);
    assert_eq!(output.status.code(), Some(2));
    assert!(!stdout(&output).contains("dirsnap.snapshot.json"));
}

#[test]
fn test_invalid_log_level_exits_one() {
    let env = CliEnv::new();
    let output = Command::new(env!("CARGO_BIN_EXE_dirsnap"))
        .current_dir(&env.workspace)
        .env("XDG_CONFIG_HOME", &env.config_home)
        .args(["--log-level", "loud", "show"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid log level: loud"));
}
