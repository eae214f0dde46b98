/// Built-in source locations, overridable through `config.json` or the CLI
pub const DEFAULT_RSS_URL: &str = "https://status.aws.amazon.com/";
pub const DEFAULT_REGIONS_URL: &str = "https://ip-ranges.amazonaws.com/ip-ranges.json";

/// Region key for feeds that match no known region.
pub const GLOBAL_REGION: &str = "GLOBAL";

/// S3 "US Standard" never shows up in the IP range document but still
/// appears in feed names, so it is added to every region set.
pub const LEGACY_REGION: &str = "us-standard";

/// Only links ending with this suffix are treated as feeds
pub const FEED_SUFFIX: &str = ".rss";

/// A status page cell carrying all of these classes holds a service name
pub const SERVICE_NAME_CLASSES: [&str; 3] = ["bb", "top", "pad8"];

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const REGION_FEED_FILE: &str = "_region_feed.txt";
pub const SERVICE_FEED_FILE: &str = "_service_feed.txt";

// Slack RSS app command format
pub const SUBSCRIBE_COMMAND: &str = "/feed subscribe";
pub const HEADER_PREFIX: &str = "# ";
pub const BLOCK_END: &str = "# ";
