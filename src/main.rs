use clap::Parser;
use dof_fx::cli::{Cli, Commands};
use dof_fx::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    dof_fx::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Rate(args) => {
            args.execute(&config).await?;
        }
        Commands::Operation(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Endpoints: {}", config.resolver.endpoints.join(", "));
            println!("  Timeout: {}s", config.resolver.timeout_secs);
            println!("  Max attempts: {}", config.resolver.max_attempts);
            println!("  Timezone: {}", config.resolver.timezone);
            println!(
                "  Banxico token: {}",
                if config.banxico.token.is_some() {
                    "configured"
                } else {
                    "not configured"
                }
            );
            println!(
                "  Divergence threshold: {}%",
                config.banxico.divergence_threshold_pct
            );
        }
    }

    Ok(())
}
