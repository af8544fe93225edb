use anyhow::Result;
use env_logger::{Builder, Target};
use std::fs::OpenOptions;

/// Where log lines go. The dashboard owns the terminal, so it logs to a file.
pub enum LogOutput {
    Stderr,
    File,
}

/// Install the global logger. `level` comes from the config (or `debug`
/// under `--verbose`); `RUST_LOG` still overrides it.
pub fn init_logging(level: &str, output: LogOutput) -> Result<()> {
    let mut builder = Builder::new();
    builder.parse_filters(level).parse_env("RUST_LOG");

    if let LogOutput::File = output {
        match open_log_file() {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Could not open log file, logging to stderr: {}", e),
        }
    }

    builder
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

fn open_log_file() -> Result<std::fs::File> {
    let path = super::paths::get_log_dir()?.join("dashboard.log");
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
