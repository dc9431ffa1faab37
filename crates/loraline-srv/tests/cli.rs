use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;

const LINE: &str = "RECV [-52 RSSI] -- W4PHO|1|3571c78c|4903|64.73|18.16|3.98";

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("loraline"))
}

#[test]
fn help_covers_both_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("serve").and(contains("decode")));
    cmd().arg("serve").arg("--help").assert().success();
    cmd().arg("decode").arg("--help").assert().success();
}

#[test]
fn version_flag_prints_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn decode_prints_wire_form_of_valid_lines() {
    cmd()
        .arg("decode")
        .write_stdin(format!("{LINE}\n"))
        .assert()
        .success()
        .stdout(contains(LINE));
}

#[test]
fn decode_json_emits_parseable_frames() {
    let output = cmd()
        .arg("decode")
        .arg("--json")
        .write_stdin(format!("{LINE}\n"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let frame: Value = serde_json::from_slice(&output).expect("json frame");
    assert_eq!(frame["action"], "RECV");
    assert_eq!(frame["rssi"], -52);
    assert_eq!(frame["envelope"]["station"], "W4PHO");
}

#[test]
fn decode_reports_rejected_lines_and_continues() {
    cmd()
        .arg("decode")
        .write_stdin(format!("garbage\n{LINE}\n"))
        .assert()
        .success()
        .stdout(contains(LINE))
        .stderr(contains("error:"));
}

#[test]
fn decode_strict_fails_on_rejected_lines() {
    cmd()
        .arg("decode")
        .arg("--strict")
        .write_stdin("garbage\n")
        .assert()
        .failure()
        .stderr(contains("rejected"));
}

#[test]
fn unsupported_message_type_is_named_in_the_error() {
    cmd()
        .arg("decode")
        .write_stdin("RECV [-52 RSSI] -- W4PHO|9|3571c78c|garbage\n")
        .assert()
        .success()
        .stderr(contains("unsupported message type 9"));
}
