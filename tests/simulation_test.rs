use std::process::{Command, Output};

fn run_simulation(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_traffic_unblock"))
        .args(args)
        .env("RUST_LOG", "warn,traffic_unblock=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that the simulation runs in headless mode without crashing
#[test]
fn test_headless_simulation_runs() {
    let output = run_simulation(&["--ticks", "200", "--vehicles", "12"]);

    assert!(
        output.status.success(),
        "Simulation failed to run in headless mode. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
}

/// Test that simulation statistics are logged
#[test]
fn test_simulation_statistics_logged() {
    let output = run_simulation(&["--ticks", "200"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    for statistic in [
        "Ticks run: 200",
        "Blockers cleared:",
        "Blockers kept:",
        "Peak cleared in one tick:",
        "mean car speed",
    ] {
        assert!(stderr.contains(statistic), "Missing '{statistic}' statistic");
    }
}

/// Test that nothing is cleared with the feature switched off
#[test]
fn test_disabled_unblock_clears_nothing() {
    let output = run_simulation(&["--ticks", "200", "--disable-unblock"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("blocker clearing off"),
        "Feature switch not reported. stderr: {}",
        stderr
    );
    assert!(
        stderr.contains("Blockers cleared: 0\n") || stderr.contains("Blockers cleared: 0\r\n"),
        "Blockers were cleared while disabled. stderr: {}",
        stderr
    );
}

/// Test that a non-positive time step is rejected
#[test]
fn test_zero_delta_is_rejected() {
    let output = run_simulation(&["--ticks", "10", "--delta", "0"]);
    assert!(!output.status.success(), "Zero delta should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--delta must be positive"));
}
