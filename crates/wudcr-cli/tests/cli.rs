//! End-to-end CLI behavior: exit codes, stdout wording, and the files
//! the `embed`/`classify` subcommands leave behind.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn wudcr() -> Command {
    Command::cargo_bin("wudcr").unwrap()
}

#[test]
fn single_edge_embeds_and_writes_a_dump() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("single.edgelist");
    fs::write(&input, "0 1\n").unwrap();
    let output = dir.path().join("out.txt");

    wudcr()
        .args(["embed", "--input"])
        .arg(&input)
        .args(["--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Embedded 2 disks"));

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("0 -> root"));
}

#[test]
fn star_of_seven_reports_no_embedding_but_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("star7.edgelist");
    let edges: String = (1..=7).map(|i| format!("0 {i}\n")).collect();
    fs::write(&input, edges).unwrap();
    let output = dir.path().join("out.txt");

    // No embedding exists for K_{1,7}: a normal, successful run, not a
    // tool failure.
    wudcr()
        .args(["embed", "--input"])
        .arg(&input)
        .args(["--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("No embedding exists"));

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("FAILED"));
}

#[test]
fn malformed_input_exits_non_zero_with_a_descriptive_chain() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.edgelist");
    fs::write(&input, "not an edge list").unwrap();
    let output = dir.path().join("out.txt");

    wudcr()
        .args(["embed", "--input"])
        .arg(&input)
        .args(["--output"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    assert!(!output.exists());
}

#[test]
fn output_equal_to_input_is_rejected_before_any_io() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("same.edgelist");
    fs::write(&path, "0 1\n").unwrap();

    wudcr()
        .args(["embed", "--input"])
        .arg(&path)
        .args(["--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("same path"));
}

#[test]
fn classify_reports_lobster_for_a_three_branch_spine() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("lobster.edgelist");
    fs::write(
        &input,
        "1 3\n3 4\n3 5\n1 6\n6 7\n6 8\n1 9\n9 10\n",
    )
    .unwrap();

    wudcr()
        .args(["classify", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Lobster"));
}

#[test]
fn stats_csv_gets_one_row_per_run_with_a_single_header() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("single.edgelist");
    fs::write(&input, "0 1\n").unwrap();
    let output = dir.path().join("out.txt");
    let stats = dir.path().join("stats.csv");

    for _ in 0..2 {
        wudcr()
            .args(["embed", "--input"])
            .arg(&input)
            .args(["--output"])
            .arg(&output)
            .args(["--stats"])
            .arg(&stats)
            .assert()
            .success();
    }

    let text = fs::read_to_string(&stats).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Algorithm,"));
}
