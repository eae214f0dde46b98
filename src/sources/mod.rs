//! Source collectors: the status page feed links and the region list.

pub mod regions;
pub mod status_page;

pub use regions::{collect_regions, parse_region_document};
pub use status_page::{collect_feed_urls, parse_status_page};
