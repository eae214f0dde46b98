use super::file_stem;
use crate::types::{Partition, RegionSet, ServiceClassification, UrlIndex};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Groups feed URLs by service by deleting region names from each URL's stem.
///
/// `ec2-us-east-1` and `ec2-eu-west-1` both reduce to `ec2-`. A stem that
/// contains no region is its own service key. URLs with an empty stem are
/// dropped. When several URLs share a key, the header name comes from the
/// lexicographically smallest of them.
pub fn classify_by_service(urls: &UrlIndex, regions: &RegionSet) -> ServiceClassification {
    let mut partition = Partition::new();
    let mut matched = BTreeSet::new();
    let mut stems = Vec::with_capacity(urls.len());

    for url in urls.keys() {
        let stem = file_stem(url);
        if stem.is_empty() {
            debug!(url = %url, "skipping feed with empty stem");
            continue;
        }

        for region in regions.specific() {
            let service_key = stem.replace(region, "");
            if service_key == stem {
                continue;
            }
            debug!(url = %url, region, service_key = %service_key, "service match");
            partition
                .entry(service_key)
                .or_insert_with(Vec::new)
                .push(url.clone());
            matched.insert(url.clone());
        }

        stems.push((url, stem));
    }

    for (url, stem) in stems {
        if matched.contains(url) {
            continue;
        }
        partition.entry(stem).or_insert_with(Vec::new).push(url.clone());
    }

    let names = display_names(&partition, urls);
    debug!(keys = partition.len(), matched = matched.len(), "classified by service");

    ServiceClassification {
        partition,
        names,
        matched,
    }
}

/// Picks the name of the smallest URL filed under each key.
fn display_names(partition: &Partition, urls: &UrlIndex) -> BTreeMap<String, String> {
    partition
        .iter()
        .filter_map(|(key, list)| {
            let first = list.iter().min()?;
            let name = urls.get(first)?;
            Some((key.clone(), name.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GLOBAL_REGION;

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
    fn region_is_removed_from_the_stem() {
        let url = "https://status.example.com/rss/ec2-us-east-1.rss";
        let result = classify_by_service(
            &index(&[(url, "EC2 (N. Virginia)")]),
            &regions(&["us-east-1", GLOBAL_REGION]),
        );

        assert_eq!(result.partition.len(), 1);
        assert_eq!(result.partition["ec2-"], vec![url.to_string()]);
        assert_eq!(result.names["ec2-"], "EC2 (N. Virginia)");
    }

    #[test]
    fn stem_without_region_is_its_own_service() {
        let url = "https://status.example.com/rss/globalservice.rss";
        let result = classify_by_service(
            &index(&[(url, "Global Service")]),
            &regions(&["us-east-1", GLOBAL_REGION]),
        );

        assert_eq!(result.partition["globalservice"], vec![url.to_string()]);
        assert_eq!(result.names["globalservice"], "Global Service");
        assert!(result.matched.is_empty());
    }

    #[test]
    fn regional_feeds_collapse_into_one_service() {
        let urls = index(&[
            ("https://s.example.com/rss/ec2-us-east-1.rss", "EC2 (N. Virginia)"),
            ("https://s.example.com/rss/ec2-eu-west-1.rss", "EC2 (Ireland)"),
            ("https://s.example.com/rss/route53.rss", "Route 53"),
        ]);
        let result = classify_by_service(&urls, &regions(&["us-east-1", "eu-west-1"]));

        assert_eq!(result.partition.len(), 2);
        assert_eq!(result.partition["ec2-"].len(), 2);
        assert_eq!(result.partition["route53"].len(), 1);
    }

    #[test]
    fn smallest_url_supplies_the_display_name() {
        let urls = index(&[
            ("https://s.example.com/rss/ec2-us-east-1.rss", "EC2 (N. Virginia)"),
            ("https://s.example.com/rss/ec2-eu-west-1.rss", "EC2 (Ireland)"),
        ]);
        let result = classify_by_service(&urls, &regions(&["us-east-1", "eu-west-1"]));

        assert_eq!(result.names["ec2-"], "EC2 (Ireland)");
    }

    #[test]
    fn all_occurrences_of_a_region_are_removed() {
        let url = "https://s.example.com/rss/eu-west-1-mirror-eu-west-1.rss";
        let result = classify_by_service(&index(&[(url, "Mirror")]), &regions(&["eu-west-1"]));

        assert!(result.partition.contains_key("-mirror-"));
    }

    #[test]
    fn each_matching_region_yields_its_own_key() {
        let url = "https://s.example.com/rss/ec2-us-east-1.rss";
        let result = classify_by_service(
            &index(&[(url, "EC2")]),
            &regions(&["us-east-1", "east-1"]),
        );

        assert_eq!(result.partition["ec2-"], vec![url.to_string()]);
        assert_eq!(result.partition["ec2-us-"], vec![url.to_string()]);
    }

    #[test]
    fn empty_stems_are_skipped() {
        let result = classify_by_service(
            &index(&[("https://s.example.com/rss/", "Nothing")]),
            &regions(&["us-east-1"]),
        );

        assert!(result.partition.is_empty());
        assert!(result.names.is_empty());
    }

    #[test]
    fn empty_index_produces_no_keys() {
        let result = classify_by_service(&UrlIndex::new(), &regions(&["us-east-1"]));
        assert!(result.partition.is_empty());
    }
}
