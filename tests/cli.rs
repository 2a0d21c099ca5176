use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn burrow(home: &TempDir, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_burrow"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("BURROW_RC")
        .env_remove("BURROW_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn exit_code_from_stdin() {
    let home = TempDir::new().unwrap();
    let output = burrow(&home, &["--norc"], "exit 7\n");
    assert_eq!(output.status.code(), Some(7));
}

#[test]
fn end_of_input_says_exit() {
    let home = TempDir::new().unwrap();
    let output = burrow(&home, &["--norc"], "");
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("exit"));
}

#[test]
fn command_flag_exit() {
    let home = TempDir::new().unwrap();
    let output = burrow(&home, &["--norc", "-c", "exit 3"], "");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn command_not_found() {
    let home = TempDir::new().unwrap();
    let output = burrow(&home, &["--norc", "-c", "frobnicate-no-such-command"], "");
    assert_eq!(output.status.code(), Some(127));
    let expected = "frobnicate-no-such-command: command not found";
    assert!(stderr(&output).contains(expected));
}

#[test]
fn unbalanced_quotes() {
    let home = TempDir::new().unwrap();
    let output = burrow(&home, &["--norc", "-c", "echo 'oops"], "");
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unbalanced quotes"));
}

#[test]
fn non_numeric_exit() {
    let home = TempDir::new().unwrap();
    let output = burrow(&home, &["--norc", "-c", "exit lots"], "");
    assert_eq!(output.status.code(), Some(1));
    let expected = "exit: lots: numeric argument required";
    assert!(stderr(&output).contains(expected));
}

#[test]
fn script_changes_directory() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("script.sh");
    std::fs::write(&script, "# comment\ncd /tmp\n\npwd\n").unwrap();

    let output = burrow(&home, &["--norc", script.to_str().unwrap()], "");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "/tmp\n");
}

#[test]
fn external_command_sees_pwd() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("script.sh");
    std::fs::write(&script, "cd /tmp\nprintenv PWD\n").unwrap();

    let output = burrow(&home, &["--norc", "-q", script.to_str().unwrap()], "");
    assert_eq!(stdout(&output), "/tmp\n");
}

#[test]
fn startup_file_runs_first() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".burrowrc"), "cd /\n").unwrap();

    let output = burrow(&home, &["-c", "pwd"], "");
    assert_eq!(stdout(&output), "/\n");

    let output = burrow(&home, &["--norc", "-c", "cd /tmp"], "");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn rcfile_exit_ends_shell() {
    let home = TempDir::new().unwrap();
    let rc = home.path().join("custom_rc");
    std::fs::write(&rc, "exit 5\n").unwrap();

    let rc = rc.to_str().unwrap();
    let output = burrow(&home, &["--rcfile", rc, "-c", "exit 0"], "");
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn child_exit_status_is_reported() {
    let home = TempDir::new().unwrap();
    let output = burrow(&home, &["--norc", "-c", "sh -c 'exit 4'"], "");
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("process exited with code 4"));

    let output = burrow(&home, &["--norc", "-q", "-c", "sh -c 'exit 4'"], "");
    assert_eq!(output.status.code(), Some(4));
    assert!(!stderr(&output).contains("process exited"));
}

#[test]
fn missing_script_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("missing.sh");
    let output = burrow(&home, &["--norc", missing.to_str().unwrap()], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("burrow: "));
}
