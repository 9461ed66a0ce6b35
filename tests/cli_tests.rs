use regex::Regex;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        write!(f, "{}", content).unwrap();
        path
    }
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fengshui"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn parse_score(stdout: &str) -> Option<f32> {
    let re = Regex::new(r"Score: (-?[\d.]+)").unwrap();
    re.captures(stdout)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[test]
fn test_cli_catalog_lists_builtin_types() {
    let output = run(&["catalog"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for kind in ["bed", "desk", "door", "window"] {
        assert!(stdout.contains(kind), "missing {} in:\n{}", kind, stdout);
    }
    assert!(stdout.contains("12 inches"));
}

#[test]
fn test_cli_optimize_prints_score() {
    let output = run(&["optimize", "--seed", "11", "--max-iterations", "200"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let score = parse_score(&stdout).expect("no score line");
    assert!(score >= -1000.0, "unexpected score {}", score);
    assert!(stdout.contains("Search:"));
}

#[test]
fn test_cli_optimize_json_output() {
    let output = run(&[
        "optimize",
        "--seed",
        "5",
        "--max-iterations",
        "50",
        "--objects",
        "bed,door",
        "--json",
    ]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["placements"].as_array().unwrap().len(), 2);
    assert_eq!(value["placements"][0]["type"], "bed");
}

#[test]
fn test_cli_score_layout_file() {
    let ctx = TestContext::new();
    let layout = ctx.write(
        "layout.json",
        r#"{
            "grid_width": 144,
            "grid_height": 144,
            "placements": [
                {"type": "desk", "x": 10, "y": 10},
                {"type": "desk", "x": 20, "y": 20}
            ]
        }"#,
    );

    let output = run(&["score", "--layout", layout.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(parse_score(&stdout), Some(-5000.0));
    assert!(stdout.contains("Separate overlapping furniture"));
}

#[test]
fn test_cli_csv_catalog() {
    let ctx = TestContext::new();
    let catalog = ctx.write(
        "catalog.csv",
        "type,width,height,category,icon\nbed,20,20,furniture,bed\ndoor,6,0,boundary,\n",
    );

    let output = run(&[
        "--catalog",
        catalog.to_str().unwrap(),
        "random",
        "--width",
        "40",
        "--height",
        "40",
        "--objects",
        "bed,door",
        "--seed",
        "1",
    ]);
    assert!(output.status.success());
    let score = parse_score(&String::from_utf8_lossy(&output.stdout)).expect("no score line");
    assert!(score.is_finite());
}

#[test]
fn test_cli_config_file_with_flag_override() {
    let ctx = TestContext::new();
    let config = ctx.write("config.json", r#"{"search": {"max_iterations": 5}}"#);

    let output = run(&[
        "--config",
        config.to_str().unwrap(),
        "optimize",
        "--seed",
        "3",
        "--max-iterations",
        "20",
        "--json",
    ]);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["iterations"], 20);
}

#[test]
fn test_cli_rejects_zero_width() {
    let output = run(&["optimize", "--width", "0"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_cli_rejects_invalid_cooling_rate() {
    let output = run(&["random", "--cooling-rate", "2.0"]);
    assert!(!output.status.success());
}
