//! Concurrency tests for the rtf binary.
//!
//! Generation is a pure computation, so these tests verify that:
//! - Parallel invocations with identical inputs produce identical programs
//! - Parallel writers to distinct output files do not interfere

use assert_cmd::Command;
use std::thread;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rtf"));
    cmd.env("XDG_CONFIG_HOME", home.path());
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn weeks_without_timestamp(raw: &[u8]) -> serde_json::Value {
    let value: serde_json::Value = serde_json::from_slice(raw).expect("valid JSON");
    value["weeks"].clone()
}

#[test]
fn test_parallel_runs_are_identical() {
    let home = setup_test_dir();
    let history = home.path().join("history.json");
    std::fs::write(
        &history,
        r#"[{"week": 1, "reps_on_last_set": 14}, {"week": 5, "reps_on_last_set": 6},
            {"week": 12, "reps_on_last_set": 9}]"#,
    )
    .unwrap();

    let outputs: Vec<Vec<u8>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..6)
            .map(|_| {
                let home = &home;
                let history = &history;
                scope.spawn(move || {
                    cli(home)
                        .args(["generate", "--weight", "140", "--format", "json"])
                        .arg("--history")
                        .arg(history)
                        .assert()
                        .success()
                        .get_output()
                        .stdout
                        .clone()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect()
    });

    let first = weeks_without_timestamp(&outputs[0]);
    assert_eq!(first.as_array().unwrap().len(), 21);
    for output in &outputs[1..] {
        assert_eq!(weeks_without_timestamp(output), first);
    }
}

#[test]
fn test_parallel_file_outputs() {
    let home = setup_test_dir();
    let out_dir = home.path().join("out");

    thread::scope(|scope| {
        for i in 0..5 {
            let home = &home;
            let path = out_dir.join(format!("program_{}.csv", i));
            scope.spawn(move || {
                let weight = format!("{}", 100 + i * 10);
                cli(home)
                    .args(["generate", "--weight", &weight, "--format", "csv"])
                    .arg("--output")
                    .arg(&path)
                    .assert()
                    .success();
            });
        }
    });

    for i in 0..5 {
        let path = out_dir.join(format!("program_{}.csv", i));
        let content = std::fs::read_to_string(&path).expect("Failed to read output");
        // header + 21 weeks
        assert_eq!(content.lines().count(), 22, "{:?}", path);
    }
}
