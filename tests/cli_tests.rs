use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    letters_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let letters_path = dir.path().join("letters.json");
        fs::write(
            &letters_path,
            r#"{
  "scan38": "a",
  "scan38 shift": "A",
  "scan65": " "
}"#,
        )
        .unwrap();
        Self { dir, letters_path }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn letters(&self) -> &str {
        self.letters_path.to_str().unwrap()
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_turtlekeys"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_inspect_builtin_layout() {
    let output = run(&["inspect"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("5 groups"), "STDOUT:\n{}", out);
    assert!(out.contains("enter"));
    assert!(out.contains("altgr"));
}

#[test]
fn test_cli_inspect_writes_csv() {
    let ctx = TestContext::new();
    let csv_path = ctx.path("keys.csv");
    let output = run(&[
        "inspect",
        "--screen",
        "--screen-width",
        "775",
        "--screen-height",
        "265",
        "--csv",
        csv_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("group_index,key_index,scan_code,x,y,width,height"));
    assert!(csv.contains("1,13,36,670,60,95,95"), "{}", csv);
}

#[test]
fn test_cli_hint_uses_letter_map() {
    let ctx = TestContext::new();
    let output = run(&["hint", "-m", ctx.letters(), "aA\n"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains("scan38"), "STDOUT:\n{}", out);
    assert!(out.contains("scan36"));
    assert!(out.contains("OLPC_Rhand_SHIFT.svg"));
}

#[test]
fn test_cli_hint_reports_missing_characters() {
    let output = run(&["hint", "zz"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("2 characters have no key"));
}

#[test]
fn test_cli_hint_falls_back_to_keymap() {
    let ctx = TestContext::new();
    let keymap = ctx.path("keymap.json");
    fs::write(&keymap, r#"{"scan53 altgr": "»"}"#).unwrap();

    let output = run(&["hint", "--keymap", keymap.to_str().unwrap(), "»"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("scan53 altgr"));
}

#[test]
fn test_cli_letters_record_and_save() {
    let ctx = TestContext::new();
    let output = run(&[
        "letters",
        "-m",
        ctx.letters(),
        "--record",
        "scan39=s",
        "--record",
        "scan38=x",
        "--save",
    ]);
    assert!(output.status.success());

    let saved = fs::read_to_string(&ctx.letters_path).unwrap();
    assert!(saved.contains("\"scan39\": \"s\""));
    // scan38 was already mapped; the first letter stays.
    assert!(saved.contains("\"scan38\": \"a\""));
}

#[test]
fn test_cli_letters_save_needs_a_path() {
    let output = run(&["letters", "--record", "scan39=s", "--save"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_corrupt_letter_map() {
    let ctx = TestContext::new();
    fs::write(&ctx.letters_path, "not json").unwrap();

    // Hints carry on with an empty map, the letters command refuses.
    assert!(run(&["hint", "-m", ctx.letters(), "a"]).status.success());
    assert!(!run(&["letters", "-m", ctx.letters()]).status.success());
}

#[test]
fn test_cli_flags_override_config_file() {
    let ctx = TestContext::new();
    let config = ctx.path("config.json");
    fs::write(&config, r#"{"level_shift_bit": 1, "level_altgr_bit": 1}"#).unwrap();

    let broken = run(&["inspect", "--config", config.to_str().unwrap()]);
    assert!(!broken.status.success());

    let fixed = run(&[
        "inspect",
        "--config",
        config.to_str().unwrap(),
        "--level-shift-bit",
        "0",
    ]);
    assert!(fixed.status.success());
}

#[test]
fn test_cli_custom_layout_file() {
    let ctx = TestContext::new();
    let layout = ctx.path("layout.json");
    fs::write(
        &layout,
        r#"{
  "layout-name": "tiny",
  "key-width": 10,
  "key-height": 10,
  "groups": [
    { "group-layout": "horizontal", "keys": [ { "key-scan": 38 }, { "key-scan": 36, "key-label": "enter" } ] }
  ]
}"#,
    )
    .unwrap();

    let output = run(&["inspect", "--layout", layout.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("2 keys in 1 groups"));

    let missing = run(&["inspect", "--layout", ctx.path("none.json").to_str().unwrap()]);
    assert!(!missing.status.success());
}
