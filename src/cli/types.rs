use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "timer-dashboard")]
#[command(about = "Watch and control ProPresenter countdown timers from the terminal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(long, short, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Timer API base URL (overrides config and PROPRESENTER_API_URL)")]
    pub api_url: Option<String>,

    #[arg(long, short, global = true, help = "Verbose output")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Interactive timer dashboard (default)")]
    Dashboard,

    #[command(about = "Print the current timers once")]
    List,

    #[command(about = "Start a timer from its displayed time")]
    Start {
        #[arg(help = "Timer index")]
        index: u32,
    },

    #[command(about = "Stop a timer")]
    Stop {
        #[arg(help = "Timer index")]
        index: u32,
    },

    #[command(about = "Reset a timer to a new duration")]
    Reset {
        #[arg(help = "Timer index")]
        index: u32,

        #[arg(help = "New duration as HH:MM:SS")]
        duration: String,
    },

    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    #[command(about = "Show current configuration")]
    Show,

    #[command(about = "Set a configuration value")]
    Set {
        #[arg(help = "Configuration key")]
        key: String,

        #[arg(help = "Configuration value")]
        value: String,
    },

    #[command(about = "Reset configuration to defaults")]
    Reset,

    #[command(about = "Print the config file location")]
    Path,
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

impl Cli {
    pub fn generate_completions(shell: Shell) {
        use clap_complete::{generate, shells};
        use std::io;

        let mut cmd = Self::command();
        match shell {
            Shell::Bash => generate(shells::Bash, &mut cmd, "timer-dashboard", &mut io::stdout()),
            Shell::Zsh => generate(shells::Zsh, &mut cmd, "timer-dashboard", &mut io::stdout()),
            Shell::Fish => generate(shells::Fish, &mut cmd, "timer-dashboard", &mut io::stdout()),
            Shell::PowerShell => generate(shells::PowerShell, &mut cmd, "timer-dashboard", &mut io::stdout()),
        }
    }
}
