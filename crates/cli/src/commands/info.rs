//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use contracts::Region;

use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    feeds: Vec<FeedInfo>,
    user_agent: String,
    request_timeout_s: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    fixtures: Option<FixtureInfo>,
}

#[derive(Serialize)]
struct FeedInfo {
    region: String,
    url: String,
}

#[derive(Serialize)]
struct FixtureInfo {
    asia_path: String,
    global_path: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let info = build_config_info(&config);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&config);
    }

    Ok(())
}

fn build_config_info(config: &contracts::FeedConfig) -> ConfigInfo {
    let feeds = [Region::Asia, Region::Global]
        .into_iter()
        .map(|region| FeedInfo {
            region: region.as_str().to_string(),
            url: config.url_for(region).to_string(),
        })
        .collect();

    let fixtures = config.fixtures.as_ref().map(|f| FixtureInfo {
        asia_path: f.asia_path.clone(),
        global_path: f.global_path.clone(),
    });

    ConfigInfo {
        feeds,
        user_agent: config.user_agent.clone(),
        request_timeout_s: config.request_timeout_s,
        fixtures,
    }
}

fn print_config_info(config: &contracts::FeedConfig) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Banner Sync Configuration                      ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("🌐 Feeds");
    println!("   ├─ Asia: {}", config.asia_url);
    println!("   └─ Global: {}", config.global_url);

    println!("\n⚙️  Fetch Settings");
    println!("   ├─ User-Agent: {}", config.user_agent);
    println!("   └─ Timeout: {}s", config.request_timeout_s);

    match &config.fixtures {
        Some(fixtures) => {
            println!("\n📄 Fixtures");
            println!("   ├─ Asia: {}", fixtures.asia_path);
            println!("   └─ Global: {}", fixtures.global_path);
        }
        None => {
            println!("\n📄 Fixtures: none (offline mode unavailable)");
        }
    }

    println!();
}
