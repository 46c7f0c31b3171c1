//! Terminal output formatting.
//!
//! Colored, line-oriented output in the shape of the scan event stream: a
//! banner, a start marker per target, one line per open port as it is
//! discovered, and a completion marker. Styling goes through `console`; the
//! verbose-mode spinner through `indicatif`.

use crate::scanner::ProbeOutcome;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Print the startup banner.
pub fn print_banner() {
    println!();
    println!(
        "{} v{}",
        style("darter").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("TCP reachability prober").dim());
    println!();
}

/// Print the start marker for one target address.
pub fn print_target_started(address: &str, range: &str) {
    println!(
        "{} {}",
        style("[*] Scanning host:").cyan().bold(),
        style(address).white().bold()
    );
    println!("{} {}", style("[*] Port range:").cyan().bold(), range);
    println!();
}

/// Line reporting one open port.
pub fn open_port_line(outcome: &ProbeOutcome) -> String {
    format!(
        "{}: {}",
        outcome.port,
        style(outcome.state).green().bold()
    )
}

/// Print the completion marker for one target address.
pub fn print_target_completed(open_ports: usize) {
    println!();
    println!(
        "{} {} open port(s)",
        style("[+] Scan complete.").yellow().bold(),
        style(open_ports).white().bold()
    );
    println!();
}

/// Spinner shown while a target scan runs in verbose mode.
///
/// Open-port lines should go through [`ProgressBar::println`] so they land
/// above the spinner instead of clobbering it.
pub fn scan_spinner(address: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!("probing {address}"));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PortState;

    #[test]
    fn open_port_line_contains_port_and_state() {
        let line = open_port_line(&ProbeOutcome {
            port: 443,
            state: PortState::Open,
        });
        let plain = console::strip_ansi_codes(&line).to_string();
        assert_eq!(plain, "443: open");
    }
}
