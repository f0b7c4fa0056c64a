mod analyser;
mod ui;

use analyser::containers::Task;
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use std::process::ExitCode;
use ui::output;

/// Honeysift digs attacker signals out of SSH honeypot logs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Honeypot log file to analyze
    #[arg(value_parser)]
    logfile: PathBuf,

    /// Which analysis to run
    #[arg(short, long, value_enum)]
    task: Task,

    /// Minimum events for an IP to be reported (failed-logins)
    #[arg(long, default_value_t = 1, value_parser)]
    min_count: u64,

    /// Minimum distinct IPs per fingerprint (identify-bots)
    #[arg(long, default_value_t = 3, value_parser)]
    min_ips: usize,
}

fn main() -> ExitCode {
    // Diagnostics go to stderr; the report owns stdout. Quiet unless
    // RUST_LOG asks for more.
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
        .unwrap();

    let args = Args::parse();

    let report = match analyser::core::run(&args.logfile, args.task, args.min_count, args.min_ips) {
        Ok(report) => report,
        Err(err) => {
            log::error!("Failed to analyse {}: {err}", args.logfile.display());
            return ExitCode::FAILURE;
        }
    };

    output::print_report(&report);
    ExitCode::SUCCESS
}
