//! End-to-end tests driving the compiled binary against scratch log files.
use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn honeysift(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_honeysift"))
        .args(args)
        .output()
        .expect("failed to spawn honeysift")
}

fn log_file(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

fn failed_line(session: u32, ip: &str) -> String {
    format!("2024-06-01T08:00:02.451422Z [HoneyPotSSHTransport,{session},{ip}] login attempt [root/123456] failed")
}

fn connection_line(timestamp: &str, ip: &str, port: u16) -> String {
    format!("{timestamp} [cowrie.ssh.factory.CowrieSSHFactory] New connection: {ip}:{port}")
}

fn fingerprint_line(ip: &str, fp: &str) -> String {
    format!("2024-06-01T08:00:02.000000Z [HoneyPotSSHTransport,4,{ip}] SSH client hassh fingerprint: {fp}")
}

#[test]
fn failed_logins_reports_only_ips_above_threshold() {
    let file = log_file(&[
        failed_line(1, "10.0.0.1"),
        failed_line(1, "10.0.0.1"),
        failed_line(2, "10.0.0.1"),
        failed_line(3, "10.0.0.2"),
    ]);
    let path = file.path().to_str().unwrap().to_string();

    let output = honeysift(&[&path, "--task", "failed-logins", "--min-count", "2"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Failed login attempts (\u{2265} 2)"));
    assert!(stdout.contains(&format!("{:<8} {:>8}", "10.0.0.1", 3)));
    assert!(!stdout.contains("10.0.0.2"));
}

#[test]
fn connections_groups_same_minute_into_one_row() {
    let file = log_file(&[
        connection_line("2024-06-01T08:00:01Z", "198.51.100.23", 49812),
        connection_line("2024-06-01T08:00:45Z", "198.51.100.24", 49813),
    ]);
    let path = file.path().to_str().unwrap().to_string();

    let output = honeysift(&[&path, "--task", "connections"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Connections per minute"));
    assert!(stdout.contains(&format!("{:<16} {:>8}", "2024-06-01 08:00", 2)));
    // One minute bucket, so exactly one data row below the dashed rule.
    let data_rows = stdout
        .lines()
        .skip_while(|line| !line.starts_with('-'))
        .skip(1)
        .filter(|line| !line.is_empty())
        .count();
    assert_eq!(data_rows, 1);
}

#[test]
fn successful_creds_ranks_by_distinct_ips() {
    let file = log_file(&[
        "2024-06-01T08:01:00Z [HoneyPotSSHTransport,1,10.0.0.1] login attempt [root/123456] succeeded".to_string(),
        "2024-06-01T08:01:05Z [HoneyPotSSHTransport,2,10.0.0.2] login attempt [root/123456] succeeded".to_string(),
        "2024-06-01T08:01:09Z [HoneyPotSSHTransport,3,10.0.0.9] login attempt [admin/admin] succeeded".to_string(),
    ]);
    let path = file.path().to_str().unwrap().to_string();

    let output = honeysift(&[&path, "--task", "successful-creds"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Successful credential pairs"));
    let root_row = format!("{:<15} {:<15} {:>6}", "root", "123456", 2);
    let admin_row = format!("{:<15} {:<15} {:>6}", "admin", "admin", 1);
    let root_at = stdout.find(&root_row).unwrap();
    let admin_at = stdout.find(&admin_row).unwrap();
    assert!(root_at < admin_at);
}

#[test]
fn identify_bots_drops_fingerprints_below_min_ips() {
    let shared = "ec7378c1a92f5a8dde7e8b7a1ddf33d1";
    let lone = "92674389fa1e47a27ddd8d9b63ecd42a";
    let file = log_file(&[
        fingerprint_line("10.0.0.1", shared),
        fingerprint_line("10.0.0.2", shared),
        fingerprint_line("10.0.0.3", shared),
        fingerprint_line("10.0.0.9", lone),
    ]);
    let path = file.path().to_str().unwrap().to_string();

    let output = honeysift(&[&path, "--task", "identify-bots", "--min-ips", "2"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Fingerprints seen from \u{2265} 2 unique IPs"));
    assert!(stdout.contains(&format!("{shared:<47} {:>6}", 3)));
    assert!(!stdout.contains(lone));
}

#[test]
fn missing_file_fails_without_a_report() {
    let output = honeysift(&["/nonexistent/cowrie.log", "--task", "failed-logins"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("/nonexistent/cowrie.log"));
}

#[test]
fn invalid_utf8_fails_without_a_report() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"\xff\xfe not a utf-8 log\n").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let output = honeysift(&[&path, "--task", "connections"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn unknown_task_is_a_usage_error() {
    let file = log_file(&[failed_line(1, "10.0.0.1")]);
    let path = file.path().to_str().unwrap().to_string();

    let output = honeysift(&[&path, "--task", "keystrokes"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn non_integer_threshold_is_a_usage_error() {
    let file = log_file(&[failed_line(1, "10.0.0.1")]);
    let path = file.path().to_str().unwrap().to_string();

    let output = honeysift(&[&path, "--task", "failed-logins", "--min-count", "many"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn report_ends_with_a_blank_line() {
    let file = log_file(&[failed_line(1, "10.0.0.1")]);
    let path = file.path().to_str().unwrap().to_string();

    let output = honeysift(&[&path, "--task", "failed-logins"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.ends_with("\n\n"));
}
