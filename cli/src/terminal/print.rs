use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use sweepr_common::config::ScanConfig;
use sweepr_common::network::report::ScanMode;

const BANNER: &str = r"
 _____      _____ _____ _ __  _ __
/ __\ \ /\ / / _ \ ___\ '_ \| '__|
\__ \\ V  V /  __/ |__ | |_) | |
|___/ \_/\_/ \___\____\| .__/|_|
                       |_|
";

pub fn banner(cfg: &ScanConfig) {
    println!("{}", BANNER.cyan());
    println!(
        "Target: {} | Ports: {} | Mode: [{}]",
        cfg.target.addr.to_string().bold(),
        cfg.target.ports.to_string().bold(),
        cfg.mode.to_string().bold()
    );
    println!("{}", "-".repeat(56).dimmed());
}

pub fn progress(cfg: &ScanConfig) -> ProgressBar {
    let bar = match cfg.mode {
        ScanMode::Connect => {
            let bar = ProgressBar::new(cfg.target.ports.len() as u64);
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} [{bar:30.green}] {pos}/{len}")
                    .expect("valid progress template")
                    .progress_chars("=> "),
            );
            bar
        }
        // SYN replies trickle in without a known total.
        ScanMode::Syn => {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} capturing replies...")
                    .expect("valid spinner template"),
            );
            bar
        }
    };
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

pub fn summary(open_ports: &[u16], elapsed: Duration) {
    println!("{}", "-".repeat(56).dimmed());
    println!(
        "{} scan complete in {}",
        "[+]".cyan().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).yellow().bold()
    );
    println!(
        "{} {} open port(s)",
        "[+]".green().bold(),
        open_ports.len().to_string().green().bold()
    );
    if !open_ports.is_empty() {
        let listed: Vec<String> = open_ports.iter().map(u16::to_string).collect();
        println!("{} {}", "[+]".green().bold(), listed.join(", "));
    }
}
