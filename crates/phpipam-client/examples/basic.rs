//! List sections, subnets and addresses of a phpIPAM instance.
//!
//! Configure the connection through `PHPIPAM_URL`, `PHPIPAM_APP_ID` and
//! either `PHPIPAM_TOKEN` or `PHPIPAM_USERNAME`/`PHPIPAM_PASSWORD`, then run
//!
//! ```text
//! cargo run -p phpipam-client --example basic -- [search term]
//! ```

use anyhow::Context;
use phpipam_client::{PhpIpamClient, SearchOptions};
use phpipam_core::config::PhpIpamConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PhpIpamConfig::from_env().context("reading phpIPAM configuration")?;
    let client = PhpIpamClient::from_config(&config)?;

    client
        .ensure_authenticated()
        .await
        .context("authenticating against phpIPAM")?;
    if let Some(expiry) = client.token_expiry().await {
        println!("session valid until {expiry}");
    }

    for section in client.sections().list().await? {
        let Some(section_id) = section.id.as_deref() else {
            continue;
        };
        println!(
            "section {section_id}: {}",
            section.name.as_deref().unwrap_or("-")
        );

        for subnet in client.sections().subnets(section_id).await? {
            let Some(subnet_id) = subnet.id.as_deref() else {
                continue;
            };
            if subnet.is_folder == Some(true) {
                continue;
            }

            let cidr = subnet.cidr().unwrap_or_default();
            let addresses = client.subnets().addresses(subnet_id).await?;
            println!("  {cidr} ({} addresses)", addresses.len());

            match client.subnets().first_free(subnet_id).await {
                Ok(next) => println!("    next free: {next}"),
                Err(err) => println!("    next free: {err}"),
            }
        }
    }

    if let Some(term) = std::env::args().nth(1) {
        let options = SearchOptions {
            vlans: true,
            ..SearchOptions::default()
        };
        let result = client.search().search_with(&term, options).await?;
        println!(
            "search `{term}`: {} subnets, {} addresses, {} vlans",
            result.subnets.len(),
            result.addresses.len(),
            result.vlans.len()
        );
    }

    Ok(())
}
