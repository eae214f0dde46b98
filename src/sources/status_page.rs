use crate::app::ports::HttpClientPort;
use crate::constants::{FEED_SUFFIX, SERVICE_NAME_CLASSES};
use crate::error::Result;
use crate::types::UrlIndex;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr > td").expect("static selector"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("static selector"));

/// Downloads the status page and extracts its feed links.
#[instrument(skip_all, fields(url = %page_url))]
pub async fn collect_feed_urls(http: &dyn HttpClientPort, page_url: &Url) -> Result<UrlIndex> {
    let response = http.get(page_url.as_str()).await?;
    debug!(
        status = response.status,
        content_type = %response.content_type,
        bytes = response.bytes.len(),
        "status page response"
    );
    let base = Url::parse(&response.final_url).unwrap_or_else(|_| page_url.clone());

    let urls = parse_status_page(&response.text(), &base);
    info!(count = urls.len(), "collected feed urls");
    if urls.is_empty() {
        warn!("No feed links found - the page structure may have changed");
    }
    Ok(urls)
}

/// Pairs each `.rss` link in the page's table cells with the service name
/// cell that precedes it.
///
/// Relative links resolve against `base`. A URL listed twice keeps the
/// name seen last.
pub fn parse_status_page(html: &str, base: &Url) -> UrlIndex {
    let document = Html::parse_document(html);
    let mut urls = UrlIndex::new();
    let mut current_name = String::new();

    for cell in document.select(&CELL_SELECTOR) {
        if is_service_name_cell(&cell) {
            current_name = cell.text().collect::<String>().trim().to_string();
            debug!(name = %current_name, "service name");
            continue;
        }

        let Some(href) = cell
            .select(&LINK_SELECTOR)
            .next()
            .and_then(|link| link.value().attr("href"))
        else {
            continue;
        };

        let href = href.trim();
        if !href.ends_with(FEED_SUFFIX) {
            continue;
        }

        match base.join(href) {
            Ok(feed_url) => {
                debug!(feed = %feed_url, name = %current_name, "feed link");
                urls.insert(feed_url.to_string(), current_name.clone());
            }
            Err(e) => warn!(href, error = %e, "skipping unresolvable feed link"),
        }
    }

    urls
}

fn is_service_name_cell(cell: &ElementRef) -> bool {
    let classes: Vec<&str> = cell.value().classes().collect();
    SERVICE_NAME_CLASSES
        .iter()
        .all(|required| classes.contains(required))
}
