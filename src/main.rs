/*!
 * osconnect CLI - usage example
 *
 * Authenticates, prints the discovered service types, then dumps aggregate
 * flavor, image, and volume listings as JSON.
 */

use anyhow::Context;
use clap::Parser;

use osconnect::logging::{self, LogFormat};
use osconnect::{Connector, ConnectorConfig};

#[derive(Parser)]
#[command(name = "osconnect")]
#[command(version, about = "Connect to an OpenStack cloud and list resources across every endpoint", long_about = None)]
struct Cli {
    /// Identity service URL (e.g. http://keystone:5000/v2.0)
    #[arg(long, env = "OS_AUTH_URL")]
    auth_url: String,

    /// Username
    #[arg(long, env = "OS_USERNAME")]
    username: String,

    /// Password
    #[arg(long, env = "OS_PASSWORD", hide_env_values = true)]
    password: String,

    /// Tenant (project) name
    #[arg(long, env = "OS_TENANT_NAME")]
    tenant_name: String,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logging::init_logging(cli.verbose, format).context("failed to initialize logging")?;

    let config = ConnectorConfig::new(cli.auth_url, cli.username, cli.password, cli.tenant_name);
    let connector = Connector::connect(config)
        .await
        .context("identity bootstrap failed")?;

    println!("Discovered services:");
    for service_type in connector.service_types() {
        let count = connector.clients(service_type).len();
        println!("  {} ({} endpoint{})", service_type, count, if count == 1 { "" } else { "s" });
    }

    for skipped in connector.skipped_services() {
        println!("  {} (not implemented, skipped)", skipped);
    }

    let flavors = connector.flavors().await.context("listing flavors failed")?;
    println!("\nFlavors:\n{}", serde_json::to_string_pretty(&flavors)?);

    let images = connector.images().await.context("listing images failed")?;
    println!("\nImages:\n{}", serde_json::to_string_pretty(&images)?);

    let volumes = connector.volumes().await.context("listing volumes failed")?;
    println!("\nVolumes:\n{}", serde_json::to_string_pretty(&volumes)?);

    Ok(())
}
