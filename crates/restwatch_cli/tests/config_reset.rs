use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("restwatch-{nanos}-{file_name}"))
}

fn run_reset_with_input(settings_path: &PathBuf, input: &str) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_restwatch");
    let mut child = Command::new(exe)
        .args(["config", "reset"])
        .env("RESTWATCH_SETTINGS_PATH", settings_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn config reset");

    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(input.as_bytes())
        .expect("failed to write stdin");

    child.wait_with_output().expect("failed to wait for config reset")
}

fn write_settings(path: &PathBuf, settings: serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();
}

#[test]
fn reset_declined_leaves_settings_untouched() {
    let settings_path = temp_path("reset-declined.json");
    write_settings(
        &settings_path,
        serde_json::json!({
            "break_interval": 1200,
            "break_duration": 30,
            "custom_pause_message": "Rest!"
        }),
    );

    let output = run_reset_with_input(&settings_path, "n\n");

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&settings_path).unwrap()).unwrap();
    std::fs::remove_file(&settings_path).ok();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Reset cancelled."));
    assert_eq!(stored["break_interval"], 1200);
    assert_eq!(stored["break_duration"], 30);
    assert_eq!(stored["custom_pause_message"], "Rest!");
}

#[test]
fn reset_confirmed_reconfigures_from_scratch() {
    let settings_path = temp_path("reset-confirmed.json");
    write_settings(
        &settings_path,
        serde_json::json!({
            "break_interval": 1200,
            "break_duration": 30,
            "custom_pause_message": "Rest!"
        }),
    );

    let output = run_reset_with_input(&settings_path, "y\n3\n45\n200\nDeep breaths\n");

    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&settings_path).unwrap()).unwrap();
    std::fs::remove_file(&settings_path).ok();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Preferences saved."));
    assert_eq!(stored["break_interval"], 45 * 60);
    assert_eq!(stored["break_duration"], 200);
    assert_eq!(stored["custom_pause_message"], "Deep breaths");
}
