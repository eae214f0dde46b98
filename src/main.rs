use anyhow::Context;
use clap::Parser;
use status_feeds::config::{exec_dir, Config, ConfigOverrides};
use status_feeds::infra::http_client::ReqwestHttp;
use status_feeds::logging;
use status_feeds::pipeline::Pipeline;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "status_feeds")]
#[command(about = "Builds Slack RSS subscription manifests from a cloud status page")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file to read instead of config.json next to the executable
    #[arg(long)]
    config: Option<PathBuf>,

    /// Status page listing the per-service feeds
    #[arg(long)]
    rss_url: Option<String>,

    /// IP range JSON document listing the regions
    #[arg(long)]
    regions_url: Option<String>,

    /// Directory for the manifests (default: next to the executable)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log debug diagnostics
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Config is read before logging exists; failures are reported once it does
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let (config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let config = config.apply(ConfigOverrides {
        rss_url: cli.rss_url,
        regions_url: cli.regions_url,
        output_dir: cli.output_dir,
        verbose: cli.verbose,
    });

    let log_root = config
        .output_dir
        .clone()
        .or_else(|| exec_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let guard = logging::init_logging(&log_root, config.verbose);

    info!("------- start status_feeds -------");
    if let Some(e) = load_error {
        warn!("Using default configuration: {}", e);
    }

    if let Err(e) = run(config).await {
        error!("{:#}", e);
        drop(guard);
        std::process::exit(1);
    }
    info!("------- end status_feeds -------");
}

async fn run(config: Config) -> anyhow::Result<()> {
    let pipeline = Pipeline::new(config, Arc::new(ReqwestHttp::new()));
    let summary = pipeline.run().await.context("status feed run failed")?;

    info!(
        urls = summary.url_count,
        regions = summary.region_count,
        region_blocks = summary.region_keys,
        service_blocks = summary.service_keys,
        "manifests written"
    );
    println!("Region feed:  {}", summary.region_feed.display());
    println!("Service feed: {}", summary.service_feed.display());
    println!("Total: {:.3} sec", summary.elapsed_secs);
    Ok(())
}
