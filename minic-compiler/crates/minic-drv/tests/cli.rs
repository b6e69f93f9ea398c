//! End-to-end tests driving the `minic` binary as a subprocess.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn minic_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_minic"))
}

fn write_source(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

#[test]
fn compiles_a_clean_program_to_ir_by_default() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_source(&dir, "add.mc", "{ int a; int b; a = 2; b = a + 3; return b; }");

    Command::new(minic_bin())
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("main:"))
        .stdout(predicate::str::contains("Return b;"));
}

#[test]
fn emit_tokens_prints_the_token_stream_and_stops() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_source(&dir, "tok.mc", "{ int a; }");

    Command::new(minic_bin())
        .arg(&input)
        .arg("--emit-tokens")
        .assert()
        .success()
        .stdout(predicate::str::contains("LBrace").or(predicate::str::contains("TypeInt")));
}

#[test]
fn emit_ast_prints_the_parsed_tree() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_source(&dir, "ast.mc", "{ int a; }");

    Command::new(minic_bin())
        .arg(&input)
        .arg("--emit-ast")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compound"));
}

#[test]
fn emit_ir_prints_the_quadruple_list() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_source(
        &dir,
        "ir.mc",
        "{ int x; x = 1; if (x == 0) { x = 5; } return x; }",
    );

    Command::new(minic_bin())
        .arg(&input)
        .arg("--emit-ir")
        .assert()
        .success()
        .stdout(predicate::str::contains("IfFalse _t0 Goto L0;"));
}

#[test]
fn undeclared_identifier_exits_1_with_a_diagnostic_on_stderr() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_source(&dir, "bad.mc", "{ a = 1; }");

    Command::new(minic_bin())
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("SymbolNotFound").or(predicate::str::contains("a")));
}

#[test]
fn redefinition_exits_1_with_a_diagnostic_on_stderr() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_source(&dir, "redef.mc", "{ int a; int a; }");

    Command::new(minic_bin())
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn verbose_flag_narrates_phases_on_stderr() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_source(&dir, "verbose.mc", "{ int a; a = 1; return a; }");

    Command::new(minic_bin())
        .arg(&input)
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("lexer"));
}

#[test]
fn missing_input_file_reports_an_io_error() {
    Command::new(minic_bin())
        .arg("/nonexistent/does-not-exist.mc")
        .assert()
        .failure();
}

#[test]
fn unrecognized_flag_is_a_command_line_error() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_source(&dir, "any.mc", "{ int a; }");

    Command::new(minic_bin())
        .arg(&input)
        .arg("--bogus-flag")
        .assert()
        .code(3);
}
