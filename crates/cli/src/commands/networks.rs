use anyhow::Result;
use serde::Serialize;
use vyscan_core::model::Network;

#[derive(Debug, Serialize)]
pub struct NetworkInfo {
    pub name: String,
    pub api_url: String,
    pub key_var: String,
    pub key_configured: bool,
}

/// List supported networks, their explorer endpoints, and whether API keys are set.
pub fn list_networks_command(json: bool) -> Result<()> {
    let entries: Vec<NetworkInfo> = Network::ALL
        .into_iter()
        .map(|network| NetworkInfo {
            name: network.to_string(),
            api_url: network.default_api_url().to_string(),
            key_var: network.api_key_var().to_string(),
            key_configured: std::env::var_os(network.api_key_var()).is_some(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Networks:");
    for entry in entries {
        let keys = if entry.key_configured { "set" } else { "unset" };
        println!("- {}: {} ({} {})", entry.name, entry.api_url, entry.key_var, keys);
    }

    Ok(())
}
