use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use nodegate::cluster::identity::{NodeIdentity, RemoteTarget};
use nodegate::cluster::transport::ClusterTransport;
use nodegate::cluster::TcpClusterTransport;
use nodegate::config::load_config;

#[derive(Parser)]
#[command(name = "gate-cli")]
#[command(about = "Operator CLI for nodegate", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "nodegate.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the configuration file
    CheckConfig,
    /// Dial each configured node and run the credential handshake
    Probe {
        /// Probe only the named route
        #[arg(long)]
        route: Option<String>,

        /// Per-node probe timeout in seconds
        #[arg(long, default_value_t = 5)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", cli.config.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Commands::CheckConfig => {
            println!(
                "{}: ok ({} route{}, listener {})",
                cli.config.display(),
                config.routes.len(),
                if config.routes.len() == 1 { "" } else { "s" },
                config.listener.bind_address
            );
            ExitCode::SUCCESS
        }
        Commands::Probe { route, timeout_secs } => {
            let transport = Arc::new(TcpClusterTransport::new());
            let mut failures = 0;

            for route_config in config
                .routes
                .iter()
                .filter(|r| route.as_deref().map_or(true, |name| name == r.name))
            {
                let identity = NodeIdentity::ephemeral(
                    &config.cluster.local_name_prefix,
                    route_config.shared_secret.clone(),
                );
                let target = RemoteTarget {
                    node_address: route_config.node_address.clone(),
                    registered_process: route_config.registered_process.clone(),
                };

                let result = tokio::time::timeout(
                    Duration::from_secs(timeout_secs),
                    transport.connect(&identity, &target),
                )
                .await;

                match result {
                    Ok(Ok(conn)) => println!(
                        "route {}: ok ({} as {})",
                        route_config.name,
                        target.node_address,
                        conn.token()
                    ),
                    Ok(Err(fault)) => {
                        failures += 1;
                        eprintln!("route {}: {}", route_config.name, fault);
                    }
                    Err(_) => {
                        failures += 1;
                        eprintln!(
                            "route {}: probe timed out after {}s",
                            route_config.name, timeout_secs
                        );
                    }
                }
            }

            if failures == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
