use timer_dashboard::cli::{commands::handle_command, Cli, Parser};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging is set up per command once the config is known
    let cli = Cli::parse();

    handle_command(cli).await
}
