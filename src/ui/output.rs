use crate::analyser::containers::Report;
use ansi_term::Colour;

// Fixed column widths for the credential and fingerprint tables. The
// fingerprint column fits a 32-character hassh token plus padding.
const CRED_COLUMN: usize = 15;
const FINGERPRINT_COLUMN: usize = 47;
const IPS_COLUMN: usize = 6;

/// Renders a finalized report to stdout: painted title, column header,
/// dashed rule, one row per surviving entry, then a blank line.
pub fn print_report(report: &Report) {
    match report {
        Report::Counter {
            title,
            key_header,
            rows,
        } => {
            // Key column grows to the widest key present; an empty table
            // falls back to the header width.
            let width = rows
                .iter()
                .map(|(key, _)| key.len())
                .max()
                .unwrap_or(key_header.len());

            println!("{}", Colour::Fixed(226).paint(title));
            println!("{key_header:<width$} {:>8}", "Count");
            println!("{}", "-".repeat(width + 9));
            for (key, count) in rows {
                println!("{key:<width$} {count:>8}");
            }
        }
        Report::Credentials { title, rows } => {
            println!("{}", Colour::Fixed(226).paint(title));
            println!(
                "{:<CRED_COLUMN$} {:<CRED_COLUMN$} {:>IPS_COLUMN$}",
                "Username", "Password", "IPs"
            );
            println!("{}", "-".repeat(2 * CRED_COLUMN + IPS_COLUMN + 2));
            for (username, password, ips) in rows {
                println!("{username:<CRED_COLUMN$} {password:<CRED_COLUMN$} {ips:>IPS_COLUMN$}");
            }
        }
        Report::Fingerprints { title, rows } => {
            println!("{}", Colour::Fixed(226).paint(title));
            println!("{:<FINGERPRINT_COLUMN$} {:>IPS_COLUMN$}", "Fingerprint", "IPs");
            println!("{}", "-".repeat(FINGERPRINT_COLUMN + IPS_COLUMN));
            for (fingerprint, ips) in rows {
                println!("{fingerprint:<FINGERPRINT_COLUMN$} {ips:>IPS_COLUMN$}");
            }
        }
    }
    println!();
}
