mod config;
mod home_directory;
mod query;

use {
    crate::{config::load_config, home_directory::HomeDirectory, query::QueryCmd},
    clap::Parser,
    std::path::PathBuf,
    tracing::{metadata::LevelFilter, warn},
};

#[derive(Parser)]
#[command(author, version, about, next_display_order = None)]
struct Cli {
    /// Directory holding the config file [default: ~/.algofi]
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Read manager state [alias: q]
    #[command(next_display_order = None, alias = "q")]
    Query(QueryCmd),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Find the home directory from the CLI `--home` flag.
    let app_dir = HomeDirectory::new_or_default(cli.home)?;

    // Parse the config file, falling back to defaults if there is none.
    let loaded = load_config(&app_dir)?;
    let found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    // Set up tracing. Logs go to stderr so stdout stays clean JSON.
    tracing_subscriber::fmt()
        .with_max_level(cfg.log_level.parse::<LevelFilter>()?)
        .with_writer(std::io::stderr)
        .init();

    if !found {
        warn!(
            path = %app_dir.config_file().display(),
            "Config file not found, using defaults"
        );
    }

    match cli.command {
        Command::Query(cmd) => cmd.run(app_dir, cfg).await,
    }
}
