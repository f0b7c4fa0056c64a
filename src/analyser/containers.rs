use chrono::NaiveDateTime;
use clap::ValueEnum;

/// The analysis pipeline selected for this invocation.
/// Exactly one runs per invocation; pipelines share no state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Task {
    /// Count failed login attempts per source IP
    FailedLogins,
    /// Count new connections per minute
    Connections,
    /// Rank credential pairs by how many distinct IPs used them
    SuccessfulCreds,
    /// Cluster clients into bots by hassh fingerprint
    IdentifyBots,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FailedLogin {
    pub ip: String,
}

/// A new inbound connection. Second precision; grouping truncates to the minute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub timestamp: NaiveDateTime,
    pub ip: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuccessfulLogin {
    pub username: String,
    pub password: String,
    pub ip: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientFingerprint {
    pub fingerprint: String,
    pub ip: String,
}

/// A finalized, ordered analysis result. Built once after the pass over the
/// log completes, then handed to the renderer and discarded.
///
/// The variants are the three table shapes: a two-column counter table whose
/// key column grows to fit, and the fixed-width credential and fingerprint
/// tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Report {
    Counter {
        title: String,
        key_header: &'static str,
        rows: Vec<(String, u64)>,
    },
    Credentials {
        title: String,
        rows: Vec<(String, String, u64)>,
    },
    Fingerprints {
        title: String,
        rows: Vec<(String, u64)>,
    },
}
