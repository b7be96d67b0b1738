mod cli;

use randomedia::{config, projection::Envelope, server, service::RandomService};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, EntityKind};
use randomedia_core::RandomSampler;

async fn start_server(
    host: String,
    port: u16,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI
    config.server.host = host;
    config.server.port = port;

    tracing::info!("Starting randomedia server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

async fn random_once(kind: EntityKind, config_path: Option<&std::path::Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let service = RandomService::from_config(&config)?;
    let mut sampler = RandomSampler::from_entropy();

    let json = match kind {
        EntityKind::Movie => {
            serde_json::to_string_pretty(&Envelope::ok(service.random_movie(&mut sampler).await?))?
        }
        EntityKind::Tv => {
            serde_json::to_string_pretty(&Envelope::ok(service.random_show(&mut sampler).await?))?
        }
        EntityKind::Artist => serde_json::to_string_pretty(&Envelope::ok(
            service.random_artist(&mut sampler).await?,
        ))?,
    };
    println!("{}", json);
    Ok(())
}

fn main() -> Result<()> {
    // Credentials usually live in a .env file next to the binary
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "randomedia=trace,randomedia_core=trace,tower_http=debug".to_string()
        } else {
            "randomedia=debug,randomedia_core=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Random { kind } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(random_once(kind, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("randomedia {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, searching default locations");
            config::load_config_or_default(None)?
        }
    };

    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!(
        "  Discovery: {} attempts, {}s",
        config.discovery.max_attempts, config.discovery.max_elapsed_secs
    );
    println!("  Streaming country: {}", config.movie.country);
    println!("  Strict enrichment: {}", config.enrichment.strict);

    let missing = config::missing_credentials(&config);
    if missing.is_empty() {
        println!("  Credentials: all present");
    } else {
        println!("  Missing credentials: {}", missing.join(", "));
    }

    Ok(())
}
