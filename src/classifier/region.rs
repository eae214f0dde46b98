use crate::constants::GLOBAL_REGION;
use crate::types::{Partition, RegionClassification, RegionSet, UrlIndex};
use std::collections::BTreeSet;
use tracing::debug;

/// Groups every feed URL under each region whose identifier occurs in it.
///
/// URLs matched by no region go to [`GLOBAL_REGION`]. Keys only appear when
/// at least one URL was filed under them.
pub fn classify_by_region(urls: &UrlIndex, regions: &RegionSet) -> RegionClassification {
    let mut partition = Partition::new();
    let mut matched = BTreeSet::new();

    for region in regions.specific() {
        for url in urls.keys() {
            if !url.contains(region) {
                continue;
            }
            debug!(region, url = %url, "region match");
            partition
                .entry(region.to_string())
                .or_insert_with(Vec::new)
                .push(url.clone());
            matched.insert(url.clone());
        }
    }

    for url in urls.keys().filter(|url| !matched.contains(*url)) {
        partition
            .entry(GLOBAL_REGION.to_string())
            .or_insert_with(Vec::new)
            .push(url.clone());
    }

    debug!(keys = partition.len(), matched = matched.len(), "classified by region");
    RegionClassification { partition, matched }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(entries: &[(&str, &str)]) -> UrlIndex {
        entries
            .iter()
            .map(|(url, name)| (url.to_string(), name.to_string()))
            .collect()
    }

    fn regions(names: &[&str]) -> RegionSet {
        names.iter().copied().collect()
    }

    #[test]
    fn regional_feed_is_filed_under_its_region() {
        let url = "https://status.example.com/rss/ec2-us-east-1.rss";
        let result = classify_by_region(
            &index(&[(url, "EC2 (N. Virginia)")]),
            &regions(&["us-east-1", GLOBAL_REGION]),
        );

        assert_eq!(result.partition.len(), 1);
        assert_eq!(result.partition["us-east-1"], vec![url.to_string()]);
        assert!(result.matched.contains(url));
    }

    #[test]
    fn unmatched_feed_goes_to_global() {
        let url = "https://status.example.com/rss/globalservice.rss";
        let result = classify_by_region(
            &index(&[(url, "Global Service")]),
            &regions(&["us-east-1", GLOBAL_REGION]),
        );

        assert_eq!(result.partition.len(), 1);
        assert_eq!(result.partition[GLOBAL_REGION], vec![url.to_string()]);
        assert!(result.matched.is_empty());
    }

    #[test]
    fn overlapping_regions_list_the_url_twice() {
        let url = "https://status.example.com/rss/ec2-us-east-1.rss";
        let result = classify_by_region(
            &index(&[(url, "EC2")]),
            &regions(&["us-east-1", "east-1"]),
        );

        assert_eq!(result.partition["us-east-1"], vec![url.to_string()]);
        assert_eq!(result.partition["east-1"], vec![url.to_string()]);
        assert!(!result.partition.contains_key(GLOBAL_REGION));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let url = "https://status.example.com/rss/ec2-US-EAST-1.rss";
        let result = classify_by_region(&index(&[(url, "EC2")]), &regions(&["us-east-1"]));

        assert_eq!(result.partition[GLOBAL_REGION], vec![url.to_string()]);
    }

    #[test]
    fn empty_index_produces_no_keys() {
        let result = classify_by_region(&UrlIndex::new(), &regions(&["us-east-1"]));
        assert!(result.partition.is_empty());
    }

    #[test]
    fn every_url_lands_somewhere() {
        let urls = index(&[
            ("https://s.example.com/rss/a-eu-west-1.rss", "A"),
            ("https://s.example.com/rss/b-ap-south-1.rss", "B"),
            ("https://s.example.com/rss/c.rss", "C"),
        ]);
        let result = classify_by_region(&urls, &regions(&["eu-west-1", "us-west-2"]));

        for url in urls.keys() {
            assert!(result.partition.values().any(|list| list.contains(url)));
        }
        assert_eq!(result.partition[GLOBAL_REGION].len(), 2);
        assert!(!result.partition.contains_key("us-west-2"));
    }
}
