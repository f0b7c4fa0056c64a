//! The four extraction patterns and their line matchers.
//!
//! Cowrie tags session lines with `[HoneyPotSSHTransport,<session>,<ip>]`,
//! so three of the four patterns share that prefix. Matching is
//! search-anywhere: a line may carry arbitrary content around the pattern,
//! and a non-matching line is the normal case, not an error.
use super::containers::{ClientFingerprint, Connection, FailedLogin, SuccessfulLogin};
use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FAILED_LOGIN: Regex = Regex::new(
        r"\[HoneyPotSSHTransport,\d+,(?P<ip>\d+\.\d+\.\d+\.\d+)\].*?login attempt \[.*?/.*?\] failed"
    ).unwrap();

    static ref NEW_CONNECTION: Regex = Regex::new(
        r"(?P<ts>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:\.\d+)?)Z \[cowrie\.ssh\.factory\.CowrieSSHFactory\] New connection: (?P<ip>\d+\.\d+\.\d+\.\d+):\d+"
    ).unwrap();

    static ref SUCCESSFUL_LOGIN: Regex = Regex::new(
        r"\[HoneyPotSSHTransport,\d+,(?P<ip>\d+\.\d+\.\d+\.\d+)\].*?login attempt \[(?P<user>[^/]+)/(?P<pw>[^\]]+)\] succeeded"
    ).unwrap();

    static ref FINGERPRINT: Regex = Regex::new(
        r"\[HoneyPotSSHTransport,\d+,(?P<ip>\d+\.\d+\.\d+\.\d+)\].*?SSH client hassh fingerprint: (?P<fp>[0-9a-f:]{32})"
    ).unwrap();
}

/// Matches a failed authentication attempt. Only the source ip is kept;
/// the attempted user/pass are not constrained beyond the pattern.
pub fn failed_login(line: &str) -> Option<FailedLogin> {
    let caps = FAILED_LOGIN.captures(line)?;
    Some(FailedLogin {
        ip: caps["ip"].to_string(),
    })
}

/// Matches a new-connection line and parses its timestamp.
///
/// The fractional-seconds suffix and zone marker are discarded; only the
/// integer-seconds portion feeds the parse. A digit string that matches the
/// pattern but is not a real calendar date yields no capture.
pub fn connection(line: &str) -> Option<Connection> {
    let caps = NEW_CONNECTION.captures(line)?;
    let seconds = &caps["ts"][..19];
    let timestamp = NaiveDateTime::parse_from_str(seconds, "%Y-%m-%dT%H:%M:%S").ok()?;
    Some(Connection {
        timestamp,
        ip: caps["ip"].to_string(),
    })
}

/// Matches a successful authentication attempt, capturing the credential
/// pair along with the source ip.
pub fn successful_login(line: &str) -> Option<SuccessfulLogin> {
    let caps = SUCCESSFUL_LOGIN.captures(line)?;
    Some(SuccessfulLogin {
        username: caps["user"].to_string(),
        password: caps["pw"].to_string(),
        ip: caps["ip"].to_string(),
    })
}

/// Matches a hassh client fingerprint announcement: exactly 32 characters
/// of lowercase hex and colons.
pub fn fingerprint(line: &str) -> Option<ClientFingerprint> {
    let caps = FINGERPRINT.captures(line)?;
    Some(ClientFingerprint {
        fingerprint: caps["fp"].to_string(),
        ip: caps["ip"].to_string(),
    })
}
