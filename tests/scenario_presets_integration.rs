use std::process::Command;

use serde_json::Value;

#[test]
fn scenario_files_run_via_cli_and_produce_distinct_reports() {
    let baseline = run_json(&["--scenario", "scenarios/baseline.toml"]);
    let commercial = run_json(&["--scenario", "scenarios/commercial.toml"]);
    let capped = run_json(&["--scenario", "scenarios/small_site_capped.toml"]);

    assert_eq!(baseline["demandCapApplied"], false);
    assert_eq!(commercial["demandCapApplied"], false);
    assert_eq!(capped["demandCapApplied"], true);
    assert_eq!(capped["selfUseKWh"], 12000.0);

    assert_eq!(commercial["inputsUsed"]["arrayKWp"], 100.0);
    assert_eq!(commercial["inputsUsed"]["tiltDeg"], 20.0);
    assert_ne!(
        baseline["specificYield_kWhPerKWp"], commercial["specificYield_kWhPerKWp"],
        "tilt change should move specific yield"
    );
}

#[test]
fn baseline_scenario_file_matches_default_run() {
    let from_file = run_json(&["--scenario", "scenarios/baseline.toml"]);
    let from_default = run_json(&[]);
    assert_eq!(from_file, from_default);
}

#[test]
fn preset_and_flags_compose() {
    let json = run_json(&["--preset", "commercial", "--no-demand-cap", "--tilt", "35"]);
    assert_eq!(json["inputsUsed"]["tiltDeg"], 35.0);
    assert_eq!(json["inputsUsed"]["annualElecDemandKWh"], "assumed large (no cap)");
    assert_eq!(json["pvAnnualKWh"], json["selfUseKWh"]);
}

#[test]
fn malformed_flag_is_a_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-savings"))
        .args(["--tilt", "steep"])
        .output()
        .expect("pv-savings process should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--tilt"), "stderr={stderr}");
}

#[test]
fn human_report_is_default_output() {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-savings"))
        .output()
        .expect("pv-savings process should run");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert!(stdout.contains("kWh"));
    assert!(serde_json::from_str::<Value>(&stdout).is_err());
}

fn run_json(args: &[&str]) -> Value {
    let output = Command::new(env!("CARGO_BIN_EXE_pv-savings"))
        .args(args)
        .arg("--json")
        .output()
        .expect("pv-savings process should run");

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    serde_json::from_str(&stdout).expect("stdout should be a JSON report")
}
