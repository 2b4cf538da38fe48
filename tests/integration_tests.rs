//! Integration tests for the primeherd CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_list(dir: &TempDir, name: &str, header: &str, values: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    let mut content = String::from(header);
    content.push('\n');
    for value in values {
        content.push_str(value);
        content.push('\n');
    }
    fs::write(&path, content).unwrap();
    path
}

fn primeherd() -> Command {
    Command::cargo_bin("primeherd").unwrap()
}

/// Test CLI binary exists and responds to --help
#[test]
fn test_cli_help() {
    primeherd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("primality"));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    primeherd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("primeherd"));
}

/// Missing input file operand is a usage error, exit code 1
#[test]
fn test_missing_operand_exits_1() {
    primeherd()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing input file"));
}

/// Unknown flags are usage errors, exit code 1
#[test]
fn test_unknown_flag_exits_1() {
    primeherd().arg("--bogus").assert().failure().code(1);
}

/// Zero workers is a usage error, rejected before any file is touched
#[test]
fn test_zero_workers_exits_1() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(&temp_dir, "list.txt", "list_len=1", &["7"]);
    primeherd()
        .arg(&input)
        .arg("--workers")
        .arg("0")
        .arg("--output")
        .arg(temp_dir.path().join("out.txt"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("at least 1"));
    assert!(!temp_dir.path().join("out.txt").exists());
}

/// Unreadable input exits 2
#[test]
fn test_unreadable_input_exits_2() {
    let temp_dir = TempDir::new().unwrap();
    primeherd()
        .arg(temp_dir.path().join("missing.txt"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot open input file"));
}

/// Malformed header exits 3
#[test]
fn test_malformed_header_exits_3() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(&temp_dir, "list.txt", "length=5", &["1"]);
    primeherd()
        .arg(&input)
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("list_len=<N>"));
}

/// Non-numeric declared length exits 4
#[test]
fn test_non_numeric_length_exits_4() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(&temp_dir, "list.txt", "list_len=abc", &[]);
    primeherd()
        .arg(&input)
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("not a number"));
}

/// Non-numeric element exits 4
#[test]
fn test_non_numeric_element_exits_4() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(&temp_dir, "list.txt", "list_len=2", &["7", "seven"]);
    primeherd().arg(&input).assert().failure().code(4);
}

/// Body shorter than the declared length exits 4
#[test]
fn test_short_body_exits_4() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(&temp_dir, "list.txt", "list_len=3", &["7"]);
    primeherd()
        .arg(&input)
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("ends after"));
}

/// Unwritable output path exits 5
#[test]
fn test_unwritable_output_exits_5() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(&temp_dir, "list.txt", "list_len=1", &["7"]);
    primeherd()
        .arg(&input)
        .arg("--output")
        .arg(temp_dir.path().join("no_such_dir").join("out.txt"))
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("cannot create output file"));
}

/// A bad output path aborts the run before any compute starts: the
/// progress line never appears on stdout
#[test]
fn test_output_open_failure_precedes_compute() {
    let temp_dir = TempDir::new().unwrap();
    let values: Vec<String> = (1..=10).map(|n| n.to_string()).collect();
    let refs: Vec<&str> = values.iter().map(String::as_str).collect();
    let input = write_list(&temp_dir, "list.txt", "list_len=10", &refs);

    primeherd()
        .arg(&input)
        .arg("--output")
        .arg(temp_dir.path().join("no_such_dir").join("out.txt"))
        .assert()
        .failure()
        .code(5)
        .stdout(predicate::str::contains("checking").not());
}

/// Writes that cannot reach the device exit 6
#[cfg(target_os = "linux")]
#[test]
fn test_full_output_device_exits_6() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(&temp_dir, "list.txt", "list_len=1", &["7"]);
    primeherd()
        .arg(&input)
        .arg("--output")
        .arg("/dev/full")
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("writing output file failed"));
}

/// Threads engine end to end: count, tag, retained order
#[test]
fn test_threads_run() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(&temp_dir, "list.txt", "list_len=5", &["4", "7", "10", "13", "9"]);
    let out = temp_dir.path().join("primes.txt");

    primeherd()
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 primes among 5 values"));

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "primes_found=2(threads)\n7\n13\n"
    );
}

/// Cluster engine end to end, with real spawned worker processes
#[test]
fn test_cluster_run() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(&temp_dir, "list.txt", "list_len=5", &["4", "7", "10", "13", "9"]);
    let out = temp_dir.path().join("primes.txt");

    primeherd()
        .arg(&input)
        .arg("--engine")
        .arg("cluster")
        .arg("--workers")
        .arg("3")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "primes_found=2(cluster)\n7\n13\n"
    );
}

/// The count does not depend on how many workers split the list
#[test]
fn test_count_is_worker_invariant() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(
        &temp_dir,
        "list.txt",
        "list_len=6",
        &["2", "3", "4", "5", "6", "7"],
    );

    for (engine, workers) in [("threads", "1"), ("threads", "4"), ("cluster", "2")] {
        let out = temp_dir.path().join(format!("out_{engine}_{workers}.txt"));
        primeherd()
            .arg(&input)
            .arg("--engine")
            .arg(engine)
            .arg("--workers")
            .arg(workers)
            .arg("--output")
            .arg(&out)
            .assert()
            .success();

        let content = fs::read_to_string(&out).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, format!("primes_found=4({engine})"));
        let body: Vec<&str> = content.lines().skip(1).collect();
        assert_eq!(body, vec!["2", "3", "5", "7"]);
    }
}

/// An empty list writes a header-only result
#[test]
fn test_empty_list() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(&temp_dir, "list.txt", "list_len=0", &[]);
    let out = temp_dir.path().join("primes.txt");

    primeherd()
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&out).unwrap(), "primes_found=0(threads)\n");
}

/// Lines past the declared length are ignored
#[test]
fn test_extra_lines_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(&temp_dir, "list.txt", "list_len=2", &["2", "3", "999"]);
    let out = temp_dir.path().join("primes.txt");

    primeherd()
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "primes_found=2(threads)\n2\n3\n"
    );
}

/// Quiet mode suppresses everything on stdout
#[test]
fn test_quiet_run_prints_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(&temp_dir, "list.txt", "list_len=2", &["4", "5"]);
    let out = temp_dir.path().join("primes.txt");

    primeherd()
        .arg("--quiet")
        .arg(&input)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

/// Generated lists feed straight back into a run
#[test]
fn test_generate_then_run() {
    let temp_dir = TempDir::new().unwrap();
    let list = temp_dir.path().join("list.txt");
    let out = temp_dir.path().join("primes.txt");

    primeherd()
        .arg("generate")
        .arg("50")
        .arg("--max")
        .arg("100")
        .arg("--output")
        .arg(&list)
        .assert()
        .success();

    let content = fs::read_to_string(&list).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next().unwrap(), "list_len=50");
    assert_eq!(lines.clone().count(), 50);
    for value in lines {
        let n: i64 = value.parse().unwrap();
        assert!((1..=100).contains(&n), "generated {n} out of range");
    }

    primeherd()
        .arg(&list)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let result = fs::read_to_string(&out).unwrap();
    assert!(
        result.starts_with("primes_found="),
        "unexpected output header: {result}"
    );
    assert!(result.contains("(threads)"));
}

/// Config file changes the defaults; CLI flags still win
#[test]
fn test_config_file_selects_the_engine() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_list(&temp_dir, "list.txt", "list_len=2", &["5", "6"]);
    let config = temp_dir.path().join("custom.toml");
    fs::write(
        &config,
        "[run]\nengine = \"cluster\"\n[cluster]\nworkers = 2\n",
    )
    .unwrap();
    let out = temp_dir.path().join("primes.txt");

    primeherd()
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert!(
        fs::read_to_string(&out)
            .unwrap()
            .starts_with("primes_found=1(cluster)")
    );
}
