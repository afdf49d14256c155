use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn temp_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "lotto-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn presets_file(label: &str, content: &str) -> PathBuf {
    let path = temp_path(label);
    std::fs::write(&path, content).expect("write presets");
    path
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_lotto"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("run cli");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for cli")
}

#[test]
fn cli_list_games_includes_file_presets() {
    let presets = presets_file("list-presets", "Tiny;6;2\n");
    let output_path = temp_path("list");
    let status = Command::new(env!("CARGO_BIN_EXE_lotto"))
        .arg("--list-games")
        .arg("--presets")
        .arg(&presets)
        .arg("--output")
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available games"));
    assert!(content.contains("1) Finnish Lotto (7 numbers, 1-39)"));
    assert!(content.contains("4) Tiny (2 numbers, 1-6)"));
}

#[test]
fn cli_seeded_tiny_game_writes_json_report() {
    let presets = presets_file("tiny-presets", "Tiny;6;2\n");
    let report_path = temp_path("tiny-report");
    let args = [
        "--presets",
        presets.to_str().expect("utf-8 path"),
        "--game",
        "tiny",
        "--info",
        "none",
        "--seed",
        "9",
        "--report",
        "json",
        "--output",
        report_path.to_str().expect("utf-8 path"),
        "5",
        "2",
    ];
    let output = run_with_stdin(&args, "");
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Got 2 right!"));
    assert!(stdout.contains("You won!"));
    assert!(stdout.contains("Congratulations, you might still be alive to use your money!"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
            .expect("valid json");
    assert_eq!(report["game"], "Tiny");
    assert_eq!(report["seed"], 9);
    assert_eq!(report["ticket"], serde_json::json!([2, 5]));
    assert_eq!(report["outcome"]["stop"], "accepted");

    let replay_path = temp_path("tiny-replay");
    let mut replay_args = args;
    replay_args[11] = replay_path.to_str().expect("utf-8 path");
    assert!(run_with_stdin(&replay_args, "").status.success());
    let replay: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&replay_path).expect("read replay"))
            .expect("valid json");
    assert_eq!(replay["outcome"], report["outcome"]);
}

#[test]
fn cli_malformed_presets_fall_back_to_finnish_lotto() {
    let presets = presets_file("bad-presets", "Lotto;thirty-nine;7\n");
    let report_path = temp_path("fallback-report");
    let output = run_with_stdin(
        &[
            "--presets",
            presets.to_str().expect("utf-8 path"),
            "--info",
            "none",
            "--seed",
            "1",
            "--max-weeks",
            "3",
            "--report",
            "json",
            "--output",
            report_path.to_str().expect("utf-8 path"),
            "1",
            "2",
            "3",
            "4",
            "5",
            "6",
            "7",
        ],
        "",
    );
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Choose the lotto type"));

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read report"))
            .expect("valid json");
    assert_eq!(report["game"], "Finnish Lotto");
    assert_eq!(report["max_number"], 39);
    assert_eq!(report["outcome"]["stop"], "weeks_exhausted");
    assert_eq!(report["outcome"]["attempts"][0]["weeks_elapsed"], 3);
}

#[test]
fn cli_invalid_numbers_fall_back_to_prompt() {
    let presets = presets_file("prompt-presets", "Tiny;6;2\n");
    let output = run_with_stdin(
        &[
            "--presets",
            presets.to_str().expect("utf-8 path"),
            "--game",
            "Tiny",
            "--info",
            "every-week",
            "--seed",
            "3",
            "4",
            "4",
        ],
        "2\n2\n9\n5\n",
    );
    assert!(output.status.success(), "{output:?}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR:"));
    assert!(stderr.contains("appears more than once"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Not unique numbers!"));
    assert!(stdout.contains("Please give a number between [1, 6]"));
    assert!(stdout.contains("Your ticket:\t[02, 05]"));
    assert!(stdout.contains("You got 2 numbers right."));
    assert!(stdout.contains("Session Summary"));
}

#[test]
fn cli_fails_when_input_ends_before_answers() {
    let output = run_with_stdin(&["--game", "1", "--info", "results"], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input ended"));
}

#[test]
fn cli_rejects_unknown_game() {
    let output = run_with_stdin(&["--game", "Keno", "1", "2"], "");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown game"));
}
