use assert_cmd::prelude::*;
use predicates::prelude::*;

#[test]
fn test_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::cargo_bin_cmd!("burndown");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("forecast"));
    Ok(())
}

#[test]
fn forecast_requires_input_files() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("burndown");
    cmd.args(["forecast", "-o", "report.yaml"]);
    cmd.assert().failure().stderr(predicate::str::contains("--input"));
}
