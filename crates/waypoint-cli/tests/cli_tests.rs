use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to build a `wp drive` command with plain-text output
fn drive_cmd() -> Command {
    let mut cmd = Command::cargo_bin("wp").expect("Failed to find wp binary");
    cmd.args(["--no-color", "drive"]);
    cmd
}

#[test]
fn test_cli_help_lists_commands() {
    Command::cargo_bin("wp")
        .expect("Failed to find wp binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("drive"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_drive_status_without_plan() {
    drive_cmd()
        .write_stdin("status\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("No plan exists yet"));
}

#[test]
fn test_drive_create_and_status() {
    let script = "\
create
Ship feature X
incremental rollout
Write code
Write tests

status
quit
";
    drive_cmd()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plan with 2 steps"))
        .stdout(predicate::str::contains("# Ship feature X"))
        .stdout(predicate::str::contains("Status: created"))
        .stdout(predicate::str::contains("○ Pending"));
}

#[test]
fn test_drive_single_step_run_to_completion() {
    let script = "\
create
One thing
quick
Do the thing

next did the thing
quit
";
    drive_cmd()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan complete: One thing"))
        .stdout(predicate::str::contains("All 1 steps finished"));
}

#[test]
fn test_drive_next_without_plan_reports_error_text() {
    drive_cmd()
        .write_stdin("next something\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("no plan exists"));
}

#[test]
fn test_drive_fail_then_abort() {
    let script = "\
create
Ship feature X
incremental rollout
Write code
Write tests
Deploy

next wrote the code
fail tests flaky
abort giving up
status
quit
";
    drive_cmd()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Step 2 failed"))
        .stdout(predicate::str::contains("tests flaky"))
        .stdout(predicate::str::contains("Plan aborted: Ship feature X"))
        .stdout(predicate::str::contains("Status: cancelled"))
        .stdout(predicate::str::contains("⊘ Skipped"));
}

#[test]
fn test_drive_create_rejects_empty_step_list() {
    let script = "\
create
Goal only
no approach

status
quit
";
    drive_cmd()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("invalid plan"))
        .stdout(predicate::str::contains("No plan exists yet"));
}

#[test]
fn test_drive_history_after_supersede() {
    let script = "\
create
First goal
first approach
Old step

create
Second goal
second approach
New step

history
quit
";
    drive_cmd()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("moved to history"))
        .stdout(predicate::str::contains("# History"))
        .stdout(predicate::str::contains("First goal"));
}

#[test]
fn test_drive_unknown_command() {
    drive_cmd()
        .write_stdin("frobnicate\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command"));
}
