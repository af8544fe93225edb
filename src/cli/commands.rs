use super::formatter::CliFormatter;
use super::{Cli, Commands, ConfigAction};
use crate::models::{Config, EditDraft, TimerSnapshot};
use crate::services::ApiClient;
use crate::ui::{restore_terminal, setup_terminal, Dashboard};
use crate::utils::config::{apply_overrides, get_config_path, load_config, save_config, API_URL_ENV};
use crate::utils::logging::{init_logging, LogOutput};
use crate::utils::validation::validate_duration_input;
use crate::utils::LocalStore;
use anyhow::Result;
use std::path::Path;

pub async fn handle_command(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Dashboard);

    match command {
        Commands::Completions { shell } => {
            Cli::generate_completions(shell);
            return Ok(());
        }
        Commands::Config { action } => {
            return handle_config_action(action, cli.config.as_deref());
        }
        _ => {}
    }

    let config = load_config(cli.config.as_deref())?;
    let env_url = std::env::var(API_URL_ENV).ok();
    let config = apply_overrides(config, cli.api_url.as_deref(), env_url.as_deref())?;

    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    let output = match command {
        Commands::Dashboard => LogOutput::File,
        _ => LogOutput::Stderr,
    };
    init_logging(level, output)?;

    match command {
        Commands::Dashboard => run_dashboard(&config).await,
        Commands::List => {
            let client = ApiClient::new(&config.api_url)?;
            list_timers(&client).await
        }
        Commands::Start { index } => {
            let client = ApiClient::new(&config.api_url)?;
            let timer = start_by_index(&client, index).await?;
            CliFormatter::print_success(&format!("Started '{}' from {}", timer.name(), timer.time));
            Ok(())
        }
        Commands::Stop { index } => {
            let client = ApiClient::new(&config.api_url)?;
            let timer = stop_by_index(&client, index).await?;
            CliFormatter::print_success(&format!("Stopped '{}'", timer.name()));
            Ok(())
        }
        Commands::Reset { index, duration } => {
            let client = ApiClient::new(&config.api_url)?;
            let (timer, seconds) = reset_by_index(&client, index, &duration).await?;
            CliFormatter::print_success(&format!(
                "Reset '{}' to {}",
                timer.name(),
                crate::utils::format_hms(seconds)
            ));
            Ok(())
        }
        Commands::Config { .. } | Commands::Completions { .. } => Ok(()),
    }
}

async fn run_dashboard(config: &Config) -> Result<()> {
    let store = LocalStore::open_default()?;
    let mut dashboard = Dashboard::new(config, store)?;

    let mut terminal = setup_terminal()?;
    let result = dashboard.run(&mut terminal).await;
    restore_terminal()?;
    terminal.show_cursor()?;

    result
}

async fn list_timers(client: &ApiClient) -> Result<()> {
    let timers = client.fetch_current_timers().await?;

    CliFormatter::print_section_header("Timers");
    if timers.is_empty() {
        CliFormatter::print_empty_state("No timers reported");
    }
    for timer in &timers {
        CliFormatter::print_timer_entry(timer);
    }
    Ok(())
}

/// Look up the timer currently reported at `index`.
pub async fn find_timer(client: &ApiClient, index: u32) -> Result<TimerSnapshot> {
    client
        .fetch_current_timers()
        .await?
        .into_iter()
        .find(|timer| timer.index() == index)
        .ok_or_else(|| anyhow::anyhow!("No timer with index {}", index))
}

pub async fn start_by_index(client: &ApiClient, index: u32) -> Result<TimerSnapshot> {
    let timer = find_timer(client, index).await?;
    client.start_timer(&timer).await?;
    Ok(timer)
}

pub async fn stop_by_index(client: &ApiClient, index: u32) -> Result<TimerSnapshot> {
    let timer = find_timer(client, index).await?;
    client.stop_timer(&timer).await?;
    Ok(timer)
}

/// Reset the timer at `index` to `duration` (`HH:MM:SS`). Returns the timer
/// and the seconds sent.
pub async fn reset_by_index(client: &ApiClient, index: u32, duration: &str) -> Result<(TimerSnapshot, i64)> {
    let (hours, minutes, seconds) = validate_duration_input(duration)?;
    let draft = EditDraft::new(&hours, &minutes, &seconds);
    let timer = find_timer(client, index).await?;
    let total = draft.total_seconds();
    client.update_duration(&timer.id, total).await?;
    Ok((timer, total))
}

fn handle_config_action(action: ConfigAction, path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(path)?;
            CliFormatter::print_section_header("Configuration");
            CliFormatter::print_field("api_url", &config.api_url, Some("cyan"));
            CliFormatter::print_field("poll_interval_ms", &config.poll_interval_ms.to_string(), None);
            CliFormatter::print_field("known_timers", &config.known_timers.join(", "), Some("yellow"));
            CliFormatter::print_field("log_level", &config.log_level, None);
            CliFormatter::print_field("theme", &config.theme.to_string(), None);
            if let Ok(url) = std::env::var(API_URL_ENV) {
                CliFormatter::print_field(API_URL_ENV, &url, Some("magenta"));
            }
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = load_config(path)?;
            config.set(&key, &value)?;
            save_config(&config, path)?;
            CliFormatter::print_success(&format!("Set {} = {}", key, value));
            Ok(())
        }
        ConfigAction::Reset => {
            save_config(&Config::default(), path)?;
            CliFormatter::print_success("Configuration reset to defaults");
            Ok(())
        }
        ConfigAction::Path => {
            let config_path = match path {
                Some(p) => p.to_path_buf(),
                None => get_config_path()?,
            };
            println!("{}", config_path.display());
            Ok(())
        }
    }
}
