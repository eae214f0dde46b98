use crate::constants::GLOBAL_REGION;
use std::collections::{BTreeMap, BTreeSet};

/// Feed URL to the service name shown next to it on the status page.
///
/// Ordered so every pass over it is lexicographic by URL.
pub type UrlIndex = BTreeMap<String, String>;

/// Classification key (region or service) to the feed URLs filed under it.
/// Lists keep insertion order; the writer sorts them.
pub type Partition = BTreeMap<String, Vec<String>>;

/// Known region identifiers for one run, always including the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSet {
    regions: BTreeSet<String>,
}

impl Default for RegionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionSet {
    pub fn new() -> Self {
        let mut regions = BTreeSet::new();
        regions.insert(GLOBAL_REGION.to_string());
        Self { regions }
    }

    /// Adds a region. Blank identifiers are dropped: an empty string is a
    /// substring of every URL and would swallow the whole index.
    pub fn insert(&mut self, region: impl Into<String>) -> bool {
        let region = region.into();
        let region = region.trim();
        if region.is_empty() {
            return false;
        }
        self.regions.insert(region.to_string())
    }

    pub fn contains(&self, region: &str) -> bool {
        self.regions.contains(region)
    }

    /// Number of regions, sentinel included.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Every region except the sentinel, in ascending order.
    pub fn specific(&self) -> impl Iterator<Item = &str> {
        self.regions
            .iter()
            .map(String::as_str)
            .filter(|region| *region != GLOBAL_REGION)
    }
}

impl<S: Into<String>> FromIterator<S> for RegionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = RegionSet::new();
        for region in iter {
            set.insert(region);
        }
        set
    }
}

/// Output of the region classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionClassification {
    pub partition: Partition,
    /// URLs matched by at least one specific region
    pub matched: BTreeSet<String>,
}

/// Output of the service classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceClassification {
    pub partition: Partition,
    /// Service key to the display name used for its header
    pub names: BTreeMap<String, String>,
    /// URLs whose stem contained at least one region
    pub matched: BTreeSet<String>,
}
