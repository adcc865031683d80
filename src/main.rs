use clap::Parser;
use gymdash::cli::Cli;
use gymdash::commands;
use gymdash::config::Settings;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration (CLI > env vars > config file)
    let settings = Settings::new_with_cli(&cli)?;
    info!(
        config = %cli.config.display(),
        page_size = settings.forms.page_size,
        debounce_ms = settings.forms.debounce_ms,
        "Loaded settings"
    );

    let stdout = std::io::stdout();
    let ok = commands::run(&cli.command, &settings, &mut stdout.lock())?;
    if !ok {
        std::process::exit(1);
    }

    Ok(())
}
