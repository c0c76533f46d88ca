use address_navigator::cli::{Cli, Commands, PlansCommand, SaveMode};
use address_navigator::commands;
use address_navigator::config::Config;
use address_navigator::error::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let data_dir = config.resolve_data_dir(cli.data_dir.as_deref())?;
    tracing::debug!(data_dir = %data_dir.display(), "resolved data directory");

    match cli.command {
        Commands::Extract { image, save, no_save } => {
            commands::extract(&config, &data_dir, &image, SaveMode::from_flags(save, no_save)).await
        }

        Commands::Plans { command } => match command {
            PlansCommand::List => commands::list_plans(&data_dir),
            PlansCommand::Show { id } => commands::show_plan(&data_dir, &id),
            PlansCommand::Delete { id, yes } => commands::delete_plan(&data_dir, &id, yes),
        },

        Commands::Config { set_api_key, set_model, show } => {
            commands::configure(config, set_api_key, set_model, show)
        }
    }
}
