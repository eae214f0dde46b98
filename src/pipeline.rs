use crate::app::ports::HttpClientPort;
use crate::classifier::{classify_by_region, classify_by_service};
use crate::config::Config;
use crate::constants::{REGION_FEED_FILE, SERVICE_FEED_FILE};
use crate::error::Result;
use crate::sources::{collect_feed_urls, collect_regions};
use crate::writer::write_feed;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub url_count: usize,
    pub region_count: usize,
    pub region_keys: usize,
    pub service_keys: usize,
    pub region_feed: PathBuf,
    pub service_feed: PathBuf,
    pub elapsed_secs: f64,
}

/// Fetch, classify and write, in that order.
pub struct Pipeline {
    config: Config,
    http: Arc<dyn HttpClientPort>,
}

impl Pipeline {
    pub fn new(config: Config, http: Arc<dyn HttpClientPort>) -> Self {
        Self { config, http }
    }

    #[instrument(skip_all)]
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();

        let page_url = self.config.status_page_url()?;
        let regions_url = self.config.region_list_url()?;
        let output_dir = self.config.output_dir()?;
        debug!(
            config = ?self.config,
            output_dir = %output_dir.display(),
            "resolved configuration"
        );

        let stage = Instant::now();
        let regions = collect_regions(self.http.as_ref(), &regions_url).await?;
        info!(
            region_count = regions.len(),
            elapsed_secs = stage.elapsed().as_secs_f64(),
            "fetched regions"
        );

        let stage = Instant::now();
        let urls = collect_feed_urls(self.http.as_ref(), &page_url).await?;
        info!(
            url_count = urls.len(),
            elapsed_secs = stage.elapsed().as_secs_f64(),
            "fetched feed urls"
        );

        let stage = Instant::now();
        let by_region = classify_by_region(&urls, &regions);
        info!(
            keys = by_region.partition.len(),
            elapsed_secs = stage.elapsed().as_secs_f64(),
            "grouped by region"
        );

        let stage = Instant::now();
        let by_service = classify_by_service(&urls, &regions);
        info!(
            keys = by_service.partition.len(),
            elapsed_secs = stage.elapsed().as_secs_f64(),
            "grouped by service"
        );

        let stage = Instant::now();
        let region_feed = output_dir.join(REGION_FEED_FILE);
        write_feed(&region_feed, &by_region.partition, None)?;
        info!(elapsed_secs = stage.elapsed().as_secs_f64(), "wrote region feed");

        let stage = Instant::now();
        let service_feed = output_dir.join(SERVICE_FEED_FILE);
        write_feed(&service_feed, &by_service.partition, Some(&by_service.names))?;
        info!(elapsed_secs = stage.elapsed().as_secs_f64(), "wrote service feed");

        let elapsed_secs = started.elapsed().as_secs_f64();
        info!(elapsed_secs, "run complete");

        Ok(RunSummary {
            url_count: urls.len(),
            region_count: regions.len(),
            region_keys: by_region.partition.len(),
            service_keys: by_service.partition.len(),
            region_feed,
            service_feed,
            elapsed_secs,
        })
    }
}
