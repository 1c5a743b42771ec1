//! Discover SQL Server instances on a host.
//!
//! Run with:
//! ```bash
//! cargo run --example discover -- <host>
//! ```

use mssql_browser::{BrowserClient, BrowserConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let host = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "localhost".to_string());

    let client = BrowserClient::new(BrowserConfig::new(host));
    let records = client.query_all().await?;

    if records.is_empty() {
        println!("no instances advertised");
    }

    for record in &records {
        for (key, value) in record {
            println!("{key}: {value}");
        }
        println!();
    }

    Ok(())
}
