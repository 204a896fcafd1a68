use clap::{Parser, Subcommand};
use medialift::{
    cmd::{sync_now, SyncNowArgs},
    config::AppConfig,
    supervisor::Supervisor,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs the relay daemon.
    Run {
        /// Directory containing app.yaml.
        #[arg(long)]
        config_dir: Option<String>,
    },
    /// Triggers a single downstream sync immediately.
    SyncNow(SyncNowArgs),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config_dir } => run_supervisor(config_dir.as_deref()).await?,
        Commands::SyncNow(args) => sync_now::execute(args).await?,
    }

    Ok(())
}

async fn run_supervisor(config_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!("Loading application configuration...");
    let config = AppConfig::new(config_dir)?;
    tracing::debug!(
        endpoint = %config.notifier.endpoint_base,
        enabled = config.notifier.enabled,
        dispatch_interval = ?config.dispatch_interval_secs,
        "Configuration loaded."
    );

    let supervisor = Supervisor::builder().config(config).build().await?;

    tracing::info!("Supervisor initialized, starting relay...");

    supervisor.run().await?;

    Ok(())
}
