//! Lexical classification of feed URLs by region and by service.
//!
//! Both classifiers are pure functions over a [`UrlIndex`](crate::types::UrlIndex)
//! and a [`RegionSet`](crate::types::RegionSet). Matching is a plain,
//! case-sensitive substring test, so a URL containing two region names is
//! filed under both.

pub mod region;
pub mod service;

pub use region::classify_by_region;
pub use service::classify_by_service;

use url::Url;

/// Final path segment of `feed_url` with its extension removed.
///
/// `https://status.example.com/rss/ec2-us-east-1.rss` gives `ec2-us-east-1`.
/// Returns an empty string when the URL ends in `/` or the segment is only
/// an extension.
pub fn file_stem(feed_url: &str) -> String {
    let segment = match Url::parse(feed_url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or("")
            .to_string(),
        Err(_) => {
            let path = feed_url.split(['?', '#']).next().unwrap_or("");
            path.rsplit('/').next().unwrap_or("").to_string()
        }
    };

    match segment.rfind('.') {
        Some(dot) => segment[..dot].to_string(),
        None => segment,
    }
}
