//! Retrieves Microsoft SQL Server instance information by querying the SQL
//! Browser service.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use mssql_browser::{
    BrowserClient, BrowserConfig, DEFAULT_BUFFER_SIZE, InstanceRecord, SQL_BROWSER_PORT,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mssql-browser",
    about = "Query the SQL Browser service for SQL Server instance information"
)]
struct Cli {
    /// Hostname or IP address of the SQL Server to query for information
    host: String,

    /// Name of the instance to query for information; all instances if omitted
    #[arg(short, long)]
    instance: Option<String>,

    /// SQL Browser port
    #[arg(short, long, default_value_t = SQL_BROWSER_PORT)]
    port: u16,

    /// Receive timeout in seconds
    #[arg(long, default_value_t = 4)]
    timeout_secs: u64,

    /// Maximum reply size in bytes
    #[arg(long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer_size: usize,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = BrowserConfig::new(cli.host.clone())
        .port(cli.port)
        .buffer_size(cli.buffer_size)
        .timeout(Duration::from_secs(cli.timeout_secs));
    let client = BrowserClient::new(config);

    let records = match &cli.instance {
        Some(name) => client.query_instance(name).await,
        None => client.query_all().await,
    }
    .with_context(|| format!("query to {} failed", cli.host))?;

    for record in &records {
        print_record(record);
    }

    Ok(())
}

fn print_record(record: &InstanceRecord) {
    println!();
    for (key, value) in record {
        println!("{key}: {value}");
    }
}
