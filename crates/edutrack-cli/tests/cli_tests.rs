//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary, isolated from any config in the real working directory or home.
fn edutrack(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("edutrack").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("RUST_LOG")
        .env_remove("EDUTRACK_MAX_NAME_LENGTH");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn run_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = edutrack(dir)
        .arg("run")
        .args(args)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

const SESSION: &str = r#"
[class]
name = "Period 3"
topics = ["Fractions", "Decimals"]

[[students]]
name = "Ada"
ratings = ["+", "-"]
"#;

#[test]
fn run_script_produces_class_series() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "script.txt",
        "add-topic\nrate 1 +\nsubmit A\n\nrate 1 +\nrate 2 +\nsubmit B\n",
    );

    let report = run_json(&dir, &["--script", "script.txt"]);
    let series = &report["class_performance"]["series"];
    assert_eq!(series[0]["topic"], "Topic 1");
    assert_eq!(series[0]["plus_count"], 2);
    assert_eq!(series[1]["topic"], "Topic 2");
    assert_eq!(series[1]["plus_count"], 1);
    assert_eq!(report["individual"].as_array().unwrap().len(), 2);
}

#[test]
fn run_session_then_delete_topic() {
    let dir = TempDir::new().unwrap();
    write(&dir, "class.toml", SESSION);
    write(&dir, "script.txt", "delete 2\nconfirm 2\n");

    let report = run_json(&dir, &["--session", "class.toml", "--script", "script.txt"]);
    assert_eq!(report["class_name"], "Period 3");
    assert_eq!(report["topics"].as_array().unwrap().len(), 1);
    assert_eq!(report["students"][0]["topics"][0], "Fractions");
    assert_eq!(report["students"][0]["ratings"][0], 10);
    assert_eq!(report["individual"][0]["radial_range"][1], 10);
}

#[test]
fn run_without_students_reports_no_data() {
    let dir = TempDir::new().unwrap();
    edutrack(&dir)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("No students added yet."));
}

#[test]
fn run_text_output_has_tables() {
    let dir = TempDir::new().unwrap();
    write(&dir, "class.toml", SESSION);
    edutrack(&dir)
        .args(["run", "--session", "class.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Class Performance"))
        .stdout(predicate::str::contains("Fractions"))
        .stdout(predicate::str::contains("Performance for Ada"));
}

#[test]
fn run_markdown_output() {
    let dir = TempDir::new().unwrap();
    write(&dir, "class.toml", SESSION);
    edutrack(&dir)
        .args(["run", "--session", "class.toml", "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Period 3"))
        .stdout(predicate::str::contains("| Fractions | 1 |"));
}

#[test]
fn run_writes_report_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "class.toml", SESSION);
    edutrack(&dir)
        .args(["run", "--session", "class.toml", "--output", "out/report.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Report saved to"));
    assert!(dir.path().join("out/report.json").exists());
}

#[test]
fn run_duplicate_student_fails() {
    let dir = TempDir::new().unwrap();
    write(&dir, "script.txt", "submit Bob\nsubmit Bob\n");
    edutrack(&dir)
        .args(["run", "--script", "script.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("script.txt:2"))
        .stderr(predicate::str::contains("Student Bob already exists"));
}

#[test]
fn run_last_topic_deletion_fails() {
    let dir = TempDir::new().unwrap();
    write(&dir, "script.txt", "delete 1\nconfirm 1\n");
    edutrack(&dir)
        .args(["run", "--script", "script.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot delete the last remaining topic."));
}

#[test]
fn run_parse_error_reports_line() {
    let dir = TempDir::new().unwrap();
    write(&dir, "script.txt", "add-topic\nrate 1 ?\n");
    edutrack(&dir)
        .args(["run", "--script", "script.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("script.txt:2"))
        .stderr(predicate::str::contains("unknown rating symbol"));
}

#[test]
fn run_unknown_format() {
    let dir = TempDir::new().unwrap();
    edutrack(&dir)
        .args(["run", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn config_sets_initial_topics() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "edutrack.toml",
        "initial_topics = [\"Reading\", \"Writing\"]\ntopic_prefix = \"Unit\"\n",
    );
    write(&dir, "script.txt", "add-topic\n");

    let report = run_json(&dir, &["--script", "script.txt"]);
    let topics: Vec<&str> = report["topics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(topics, vec!["Reading", "Writing", "Unit 3"]);
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();
    edutrack(&dir)
        .args(["run", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn shell_reports_errors_and_continues() {
    let dir = TempDir::new().unwrap();
    edutrack(&dir)
        .arg("shell")
        .write_stdin("submit  Bob\nsubmit Bob\nbogus\nstudents\nquit\nsubmit Never\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Student Bob added successfully!"))
        .stdout(predicate::str::contains("Never").not())
        .stderr(predicate::str::contains("leading or trailing whitespaces"))
        .stderr(predicate::str::contains("unknown command: bogus"));
}

#[test]
fn shell_delete_flow() {
    let dir = TempDir::new().unwrap();
    edutrack(&dir)
        .arg("shell")
        .write_stdin("add-topic\ndelete 1\ncancel\ndelete 2\nconfirm 2\ntopics\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deletion cancelled."))
        .stdout(predicate::str::contains("Topic 'Topic 2' has been removed."));
}

#[test]
fn validate_clean_session() {
    let dir = TempDir::new().unwrap();
    write(&dir, "class.toml", SESSION);
    edutrack(&dir)
        .args(["validate", "--session", "class.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Period 3 (2 topics, 1 students)"))
        .stdout(predicate::str::contains("Session valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "class.toml",
        "[class]\ntopics = [\"A\"]\n\n[[students]]\nname = \"Ada\"\nratings = [\"*\"]\n",
    );
    edutrack(&dir)
        .args(["validate", "--session", "class.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[Ada] WARNING"))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    edutrack(&dir)
        .args(["validate", "--session", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    edutrack(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created edutrack.toml"))
        .stdout(predicate::str::contains("Created sessions/example.toml"));

    assert!(dir.path().join("edutrack.toml").exists());
    assert!(dir.path().join("sessions/example.toml").exists());
    assert!(dir.path().join("scripts/example.txt").exists());

    // The generated files work together.
    edutrack(&dir)
        .args([
            "run",
            "--session",
            "sessions/example.toml",
            "--script",
            "scripts/example.txt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Performance for Linus"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    edutrack(&dir).arg("init").assert().success();

    edutrack(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    edutrack(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Track per-student topic mastery"));
}
