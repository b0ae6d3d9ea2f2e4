use std::process::Command;

fn combined_output(output: &std::process::Output) -> String {
    let mut combined = String::new();
    combined.push_str(&String::from_utf8_lossy(&output.stdout));
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}

fn squelchrec_bin() -> &'static str {
    option_env!("CARGO_BIN_EXE_squelchrec").expect("squelchrec test binary not built")
}

#[test]
fn help_mentions_the_recorder() {
    let output = Command::new(squelchrec_bin())
        .arg("--help")
        .output()
        .expect("run squelchrec --help");
    assert!(output.status.success());
    let combined = combined_output(&output);
    assert!(combined.contains("Squelch-gated"));
    assert!(combined.contains("--squelch-hang-ms"));
}

#[test]
fn list_devices_prints_a_message() {
    let output = Command::new(squelchrec_bin())
        .arg("--list-devices")
        .output()
        .expect("run squelchrec --list-devices");
    assert!(output.status.success());
    let combined = combined_output(&output);
    assert!(
        combined.contains("audio input devices")
            || combined.contains("Failed to list audio input devices")
    );
}

#[test]
fn missing_output_file_fails_fast() {
    let output = Command::new(squelchrec_bin())
        .output()
        .expect("run squelchrec without args");
    assert!(!output.status.success());
    let combined = combined_output(&output);
    assert!(combined.contains("--file"));
}
