//! Single-pass aggregation over the honeypot log.
//!
//! Each task function reads the log once, line by line, feeds its extractor,
//! and accumulates counts or per-key ip sets. Threshold filters apply only
//! after the pass completes. Ranked ties are broken by first appearance in
//! the log, tracked with a per-entry slot index.
use super::containers::{Report, Task};
use super::patterns;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::Path;

/// Runs the selected analysis pipeline end to end and returns its report.
///
/// A missing or unreadable file, or a line that is not valid UTF-8, aborts
/// the pass with the underlying error. The file handle is dropped on every
/// exit path.
pub fn run(path: &Path, task: Task, min_count: u64, min_ips: usize) -> io::Result<Report> {
    match task {
        Task::FailedLogins => failed_logins(path, min_count),
        Task::Connections => connections(path),
        Task::SuccessfulCreds => successful_creds(path),
        Task::IdentifyBots => identify_bots(path, min_ips),
    }
}

fn read_lines(path: &Path) -> io::Result<Lines<BufReader<File>>> {
    log::info!("Reading {}", path.display());
    let file = File::open(path)?;
    Ok(BufReader::new(file).lines())
}

/// Counts failed login attempts per source ip, dropping ips seen fewer than
/// `min_count` times. The default threshold of 1 reports everything.
pub fn failed_logins(path: &Path, min_count: u64) -> io::Result<Report> {
    let mut hits: HashMap<String, (usize, u64)> = HashMap::new();

    for line in read_lines(path)? {
        let line = line?;
        if let Some(capture) = patterns::failed_login(&line) {
            let slot = hits.len();
            let entry = hits.entry(capture.ip).or_insert((slot, 0));
            entry.1 += 1;
        }
    }

    let mut rows: Vec<(String, usize, u64)> = hits
        .into_iter()
        .filter(|(_, (_, count))| *count >= min_count)
        .map(|(ip, (slot, count))| (ip, slot, count))
        .collect();
    rows.sort_by_key(|&(_, slot, count)| (Reverse(count), slot));

    Ok(Report::Counter {
        title: format!("Failed login attempts (\u{2265} {min_count})"),
        key_header: "IP Address",
        rows: rows.into_iter().map(|(ip, _, count)| (ip, count)).collect(),
    })
}

/// Counts new connections per minute, reported chronologically.
pub fn connections(path: &Path) -> io::Result<Report> {
    let mut per_minute: HashMap<String, u64> = HashMap::new();

    for line in read_lines(path)? {
        let line = line?;
        if let Some(capture) = patterns::connection(&line) {
            log::debug!("Connection from {} at {}", capture.ip, capture.timestamp);
            let minute = capture.timestamp.format("%Y-%m-%d %H:%M").to_string();
            *per_minute.entry(minute).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<(String, u64)> = per_minute.into_iter().collect();
    // Zero-padded minute keys, so lexicographic is chronological.
    rows.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(Report::Counter {
        title: String::from("Connections per minute"),
        key_header: "Timestamp",
        rows,
    })
}

/// Ranks credential pairs that led to a successful login by the number of
/// distinct source ips that used them.
pub fn successful_creds(path: &Path) -> io::Result<Report> {
    let mut creds: HashMap<(String, String), (usize, HashSet<String>)> = HashMap::new();

    for line in read_lines(path)? {
        let line = line?;
        if let Some(capture) = patterns::successful_login(&line) {
            let slot = creds.len();
            let entry = creds
                .entry((capture.username, capture.password))
                .or_insert_with(|| (slot, HashSet::new()));
            entry.1.insert(capture.ip);
        }
    }

    let mut rows: Vec<(String, String, usize, u64)> = creds
        .into_iter()
        .map(|((user, pass), (slot, ips))| (user, pass, slot, ips.len() as u64))
        .collect();
    rows.sort_by_key(|&(_, _, slot, ips)| (Reverse(ips), slot));

    Ok(Report::Credentials {
        title: String::from("Successful credential pairs"),
        rows: rows
            .into_iter()
            .map(|(user, pass, _, ips)| (user, pass, ips))
            .collect(),
    })
}

/// Clusters clients by hassh fingerprint. A fingerprint observed from at
/// least `min_ips` distinct ips is reported as a bot.
pub fn identify_bots(path: &Path, min_ips: usize) -> io::Result<Report> {
    let mut clients: HashMap<String, (usize, HashSet<String>)> = HashMap::new();

    for line in read_lines(path)? {
        let line = line?;
        if let Some(capture) = patterns::fingerprint(&line) {
            let slot = clients.len();
            let entry = clients
                .entry(capture.fingerprint)
                .or_insert_with(|| (slot, HashSet::new()));
            entry.1.insert(capture.ip);
        }
    }

    let mut rows: Vec<(String, usize, u64)> = clients
        .into_iter()
        .filter(|(_, (_, ips))| ips.len() >= min_ips)
        .map(|(fp, (slot, ips))| (fp, slot, ips.len() as u64))
        .collect();
    rows.sort_by_key(|&(_, slot, ips)| (Reverse(ips), slot));

    Ok(Report::Fingerprints {
        title: format!("Fingerprints seen from \u{2265} {min_ips} unique IPs"),
        rows: rows.into_iter().map(|(fp, _, ips)| (fp, ips)).collect(),
    })
}
