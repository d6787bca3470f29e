use std::io::Write;
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

fn binary() -> Command {
    let bin_path = std::env::var("CARGO_BIN_EXE_ghermeneus")
        .unwrap_or_else(|_| "target/debug/ghermeneus".to_string());
    Command::new(bin_path)
}

#[test]
fn cli_smoke_json() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("cube.gcode");
    std::fs::write(&input, "G28 ; home\nG1 X10 Y5 F3000\nM104 S210\nG4 S2\n").unwrap();

    let output = binary()
        .arg(&input)
        .args(["--format", "json", "--sequential"])
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run ghermeneus");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let rows: Value = serde_json::from_slice(&output.stdout).expect("JSON output");
    let rows = rows.as_array().expect("array of rows");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3]["line"], 3);
    assert_eq!(rows[3]["state"]["x"], 10.0);
    assert_eq!(rows[3]["state"]["y_dot"], 50.0);
    assert_eq!(rows[3]["state"]["t"], 2.0);
    assert_eq!(rows[3]["state"]["T"], 210.0);
}

#[test]
fn cli_reads_stdin() {
    let mut child = binary()
        .args(["-", "--format", "csv"])
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn ghermeneus");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(b"G92 E0\nG1 X3 E1\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().nth(2), Some("1,G1,0,3,0,0,0,0,0,1,0,0"));
}

#[test]
fn cli_reports_missing_file() {
    let output = binary()
        .arg("definitely-missing.gcode")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run ghermeneus");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read G-code file"));
}
