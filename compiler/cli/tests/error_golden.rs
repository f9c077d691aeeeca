//! Golden output tests for the `kpl` binary.
//! Run with: cargo test --test error_golden

use std::process::{Command, Output};

fn kpl(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kpl"))
        .args(args)
        .output()
        .expect("failed to run kpl")
}

fn failing_stderr(args: &[&str]) -> String {
    let out = kpl(args);
    assert!(!out.status.success(), "Expected kpl to fail");
    String::from_utf8_lossy(&out.stderr).to_string()
}

#[test]
fn test_dump_builtins() {
    let out = kpl(&[]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Built-ins"), "got: {stdout}");
    assert!(stdout.contains("Procedure WRITELN"), "got: {stdout}");
    assert!(stdout.contains("released 7 objects, 5 scopes"), "got: {stdout}");
}

#[test]
fn test_dump_program() {
    let out = kpl(&["--program", "HELLO"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Program HELLO"), "got: {stdout}");
    assert!(stdout.contains("released 8 objects, 6 scopes"), "got: {stdout}");
}

#[test]
fn test_too_long_program_name() {
    let stderr = failing_stderr(&["--program", "AVERYLONGPROGRAMNAME"]);
    assert!(
        stderr.contains("Invalid identifier"),
        "Expected identifier error, got: {stderr}"
    );
}

#[test]
fn test_custom_identifier_limit() {
    let stderr = failing_stderr(&["--max-ident-len", "4", "--program", "PROG"]);
    assert!(
        stderr.contains("must be fewer than 4"),
        "Expected identifier error, got: {stderr}"
    );
}

#[test]
fn test_empty_program_name() {
    let stderr = failing_stderr(&["--program", ""]);
    assert!(stderr.contains("empty"), "Expected empty-name error, got: {stderr}");
}

#[test]
fn test_list_builtins() {
    let out = kpl(&["--list-builtins"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 5, "got: {stdout}");
    assert!(stdout.contains("Write a line break"), "got: {stdout}");
    assert!(!stdout.contains("Built-ins"), "got: {stdout}");
}
