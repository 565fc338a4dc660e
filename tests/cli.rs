#![cfg(unix)]

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_dsh");

fn shell(home: &Path) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.env("HOME", home)
        .env("PATH", "/usr/bin:/bin")
        .current_dir(home)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd
}

fn run_session(home: &Path, input: &[u8]) -> Output {
    let mut child = shell(home).spawn().expect("spawn dsh");
    child.stdin.take().unwrap().write_all(input).unwrap();
    child.wait_with_output().expect("wait for dsh")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn banner_prompt_and_echo() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join(".dsh_motd"), "hello there").unwrap();

    let output = run_session(home.path(), b"echo a b c\nexit\n");

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "hello there\ndsh> a b c\ndsh> ");
}

#[test]
fn missing_banner_prints_blank_line() {
    let home = TempDir::new().unwrap();
    let output = run_session(home.path(), b"exit\n");
    assert_eq!(stdout_of(&output), "\ndsh> ");
}

#[test]
fn exit_stops_reading_input() {
    let home = TempDir::new().unwrap();
    let output = run_session(home.path(), b"exit 3\necho unreachable\n");

    assert_eq!(output.status.code(), Some(0));
    assert!(!stdout_of(&output).contains("unreachable"));
}

#[test]
fn end_of_input_exits_successfully() {
    let home = TempDir::new().unwrap();
    let output = run_session(home.path(), b"echo x\n");
    assert!(output.status.success());
}

#[test]
fn unknown_command_is_reported_once() {
    let home = TempDir::new().unwrap();
    let output = run_session(home.path(), b"frobnicate_dsh now\nexit\n");

    let out = stdout_of(&output);
    assert_eq!(out.matches("frobnicate_dsh").count(), 1);
    assert!(out.contains("ERROR: frobnicate_dsh not found!"));
}

#[test]
fn oversized_line_is_rejected_and_not_recorded() {
    let home = TempDir::new().unwrap();
    let mut input = vec![b'q'; 255];
    input.extend_from_slice(b"\nhistory\nexit\n");

    let output = run_session(home.path(), &input);

    let out = stdout_of(&output);
    assert!(out.contains("Exceeded max input length of 256 characters"));
    assert!(!out.contains("qqqq"));
    assert!(out.contains("dsh> history\n"));
}

#[test]
fn history_lists_lines_as_typed() {
    let home = TempDir::new().unwrap();
    let output = run_session(home.path(), b"  echo  one  \n\necho two &\nhistory\nexit\n");

    let out = stdout_of(&output);
    assert!(out.contains("echo  one\necho two &\nhistory\n"));
}

#[test]
fn cd_without_argument_goes_home() {
    let home = TempDir::new().unwrap();
    let canonical = fs::canonicalize(home.path()).unwrap();
    fs::create_dir(home.path().join("sub")).unwrap();

    let output = run_session(home.path(), b"cd sub\npwd\ncd\npwd\nexit\n");

    let out = stdout_of(&output);
    let expected = format!(
        "dsh> dsh> {}\ndsh> dsh> {}\n",
        canonical.join("sub").display(),
        canonical.display()
    );
    assert!(out.contains(&expected), "unexpected output {out:?}");
}

#[test]
fn runs_program_from_working_directory() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("greet");
    fs::write(&script, "#!/bin/sh\necho \"greet:$1\"\n").unwrap();
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    }

    let output = run_session(home.path(), b"greet world\nexit\n");
    assert!(stdout_of(&output).contains("greet:world\n"));
}

#[test]
fn background_job_does_not_block_the_prompt() {
    let home = TempDir::new().unwrap();
    let mut child = shell(home.path())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn dsh");

    let start = Instant::now();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"sleep 3 &\nexit\n")
        .unwrap();
    let status = child.wait().unwrap();

    assert!(status.success());
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[test]
fn foreground_job_blocks_the_prompt() {
    let home = TempDir::new().unwrap();
    let start = Instant::now();
    let output = run_session(home.path(), b"sleep 0.5\nexit\n");

    assert!(output.status.success());
    assert!(start.elapsed() >= Duration::from_millis(500));
}

#[test]
fn non_utf8_environment_and_arguments_reach_the_child() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    use std::os::unix::fs::PermissionsExt;

    let home = TempDir::new().unwrap();
    let script = home.path().join("dump");
    fs::write(&script, "#!/bin/sh\nprintf '%s|%s' \"$DSH_RAW\" \"$1\" > out\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    let mut child = shell(home.path())
        .env("DSH_RAW", OsStr::from_bytes(b"\xff\xfe"))
        .spawn()
        .expect("spawn dsh");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"dump \xe9t\xe9\nexit\n")
        .unwrap();
    let output = child.wait_with_output().expect("wait for dsh");

    assert!(output.status.success());
    let written = fs::read(home.path().join("out")).unwrap();
    assert_eq!(written, b"\xff\xfe|\xe9t\xe9");
}
