//! Basic CLI E2E tests.
//!
//! Each test points the CLI at its own data directory, so runs are isolated
//! and every invocation restores from what the previous one persisted.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_liftlog"))
        .env("LIFTLOG_DATA_DIR", dir)
        .env("LIFTLOG_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// All JSON documents printed to stdout, in order.
fn json_docs(stdout: &str) -> Vec<Value> {
    serde_json::Deserializer::from_str(stdout)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .expect("stdout is not a JSON stream")
}

fn last_doc(stdout: &str) -> Value {
    json_docs(stdout).pop().expect("no JSON output")
}

#[test]
fn test_timer_status_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["timer", "status"]);
    assert_eq!(code, 0);
    let snap = last_doc(&out);
    assert_eq!(snap["type"], "StateSnapshot");
    assert_eq!(snap["phase"], "idle");
    assert_eq!(snap["remaining_secs"], 120);
    assert_eq!(snap["display"], "02:00");
    assert_eq!(snap["tier"], "normal");
}

#[test]
fn test_timer_start_survives_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["timer", "start"]);
    assert_eq!(code, 0);
    assert_eq!(last_doc(&out)["type"], "TimerStarted");

    let (out, _, _) = run_cli(dir.path(), &["timer", "status"]);
    let snap = last_doc(&out);
    assert_eq!(snap["phase"], "running");
    assert!(snap["remaining_secs"].as_u64().unwrap() >= 110);

    let (out, _, _) = run_cli(dir.path(), &["timer", "pause"]);
    assert_eq!(last_doc(&out)["type"], "TimerPaused");

    let (out, _, _) = run_cli(dir.path(), &["timer", "pause"]);
    let snap = last_doc(&out);
    assert_eq!(snap["type"], "StateSnapshot");
    assert_eq!(snap["phase"], "idle");
}

#[test]
fn test_timer_duration() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["timer", "duration", "3"]);
    assert_eq!(code, 0);
    let event = last_doc(&out);
    assert_eq!(event["type"], "DurationChanged");
    assert_eq!(event["duration_secs"], 180);

    let (out, err, code) = run_cli(dir.path(), &["timer", "duration", "abc"]);
    assert_eq!(code, 0);
    assert!(err.contains("keeping 3 min"));
    assert_eq!(last_doc(&out)["remaining_secs"], 180);
}

#[test]
fn test_timer_reset() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["timer", "start"]);
    let (out, _, _) = run_cli(dir.path(), &["timer", "reset"]);
    assert_eq!(last_doc(&out)["type"], "TimerReset");
    let (out, _, _) = run_cli(dir.path(), &["timer", "status"]);
    assert_eq!(last_doc(&out)["phase"], "idle");
}

#[test]
fn test_nav_key_toggles_timer() {
    let dir = tempfile::tempdir().unwrap();
    let args = ["nav", "key", "Space", "--session", "4", "--order", "1"];
    let (out, _, code) = run_cli(dir.path(), &args);
    assert_eq!(code, 0);
    assert_eq!(last_doc(&out)["type"], "TimerStarted");
    let (out, _, _) = run_cli(dir.path(), &args);
    assert_eq!(last_doc(&out)["type"], "TimerPaused");
}

#[test]
fn test_nav_swipe_resolves_path() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(
        dir.path(),
        &["nav", "swipe", "300", "100", "--session", "4", "--order", "2", "--has-next"],
    );
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "/session/4/exercise/3/");

    let (out, _, code) = run_cli(
        dir.path(),
        &["nav", "swipe", "100", "300", "--session", "4", "--order", "2", "--has-next"],
    );
    assert_eq!(code, 0);
    assert!(out.trim().is_empty());
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["config", "get", "timer.default_duration_secs"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "120");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "timer.default_duration_secs", "90"]);
    assert_eq!(code, 0);
    let (out, _, _) = run_cli(dir.path(), &["timer", "status"]);
    assert_eq!(last_doc(&out)["remaining_secs"], 90);

    let (_, err, code) = run_cli(dir.path(), &["config", "set", "timer.nope", "1"]);
    assert_eq!(code, 1);
    assert!(err.contains("error:"));
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let (out, _, code) = run_cli(dir.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(out.contains("liftlog"));
}

#[test]
fn test_completed_set_starts_rest_when_backend_is_down() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(
        dir.path(),
        &["config", "set", "server.base_url", "http://127.0.0.1:9/"],
    );
    assert_eq!(code, 0);

    let (out, err, code) = run_cli(dir.path(), &["set", "update", "1", "--reps", "8", "--completed"]);
    assert_eq!(code, 1);
    assert!(err.contains("error:"));
    assert_eq!(last_doc(&out)["type"], "TimerStarted");

    let (out, _, _) = run_cli(dir.path(), &["timer", "status"]);
    assert_eq!(last_doc(&out)["phase"], "running");
}

#[test]
fn test_large_mode_ignores_bad_server_url() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["config", "set", "server.base_url", "not a url"]);
    assert_eq!(code, 0);

    let (out, _, code) = run_cli(dir.path(), &["nav", "large-mode"]);
    assert_eq!(code, 0);
    assert_eq!(out.trim(), "large mode: true");
    let (out, _, _) = run_cli(dir.path(), &["nav", "large-mode"]);
    assert_eq!(out.trim(), "large mode: false");
}
