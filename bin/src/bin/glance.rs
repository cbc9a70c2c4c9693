use clap::Parser;
use glance_bin::{run, Cli};
use glance_log::LogConfig;

fn main() {
    let cli = Cli::parse();

    // Logging is best-effort; the overview still renders without it.
    let _log_guard = glance_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    })
    .ok();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
