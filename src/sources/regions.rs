use crate::app::ports::HttpClientPort;
use crate::constants::LEGACY_REGION;
use crate::error::{FeedError, Result};
use crate::types::RegionSet;
use serde::Deserialize;
use tracing::{debug, info, instrument};
use url::Url;

#[derive(Debug, Deserialize)]
struct IpRanges {
    prefixes: Option<Vec<IpPrefix>>,
}

#[derive(Debug, Deserialize)]
struct IpPrefix {
    #[serde(default)]
    region: String,
}

/// Downloads the IP range document and builds the region set from it.
#[instrument(skip_all, fields(url = %regions_url))]
pub async fn collect_regions(http: &dyn HttpClientPort, regions_url: &Url) -> Result<RegionSet> {
    let response = http.get(regions_url.as_str()).await?;
    debug!(
        status = response.status,
        content_type = %response.content_type,
        bytes = response.bytes.len(),
        "region list response"
    );
    let regions = parse_region_document(&response.bytes)?;
    info!(count = regions.len(), "collected regions");
    Ok(regions)
}

/// Collects every `prefixes[].region` value, plus the legacy
/// [`LEGACY_REGION`] the document never lists.
pub fn parse_region_document(bytes: &[u8]) -> Result<RegionSet> {
    let ranges: IpRanges = serde_json::from_slice(bytes)?;
    let prefixes = ranges
        .prefixes
        .ok_or_else(|| FeedError::MissingField("prefixes not found".into()))?;
    debug!(prefixes = prefixes.len(), "parsed ip ranges");

    let mut regions: RegionSet = prefixes.into_iter().map(|prefix| prefix.region).collect();
    regions.insert(LEGACY_REGION);
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GLOBAL_REGION;

    #[test]
    fn collects_unique_regions_and_legacy_default() {
        let doc = br#"{
            "syncToken": "1",
            "prefixes": [
                {"ip_prefix": "3.5.140.0/22", "region": "ap-northeast-2", "service": "AMAZON"},
                {"ip_prefix": "3.2.34.0/26", "region": "af-south-1", "service": "AMAZON"},
                {"ip_prefix": "3.5.141.0/22", "region": "ap-northeast-2", "service": "EC2"},
                {"ip_prefix": "52.94.76.0/22", "region": "GLOBAL", "service": "AMAZON"}
            ]
        }"#;

        let regions = parse_region_document(doc).unwrap();
        let specific: Vec<&str> = regions.specific().collect();

        assert_eq!(specific, vec!["af-south-1", "ap-northeast-2", LEGACY_REGION]);
        assert!(regions.contains(GLOBAL_REGION));
    }

    #[test]
    fn entries_without_region_are_skipped() {
        let doc = br#"{"prefixes": [{"ip_prefix": "1.2.3.0/24"}, {"region": "eu-west-1"}]}"#;
        let regions = parse_region_document(doc).unwrap();
        assert_eq!(regions.specific().count(), 2);
    }

    #[test]
    fn missing_prefixes_is_an_error() {
        let err = parse_region_document(br#"{"ipv6_prefixes": []}"#).unwrap_err();
        assert!(matches!(err, FeedError::MissingField(_)));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let err = parse_region_document(b"<html>").unwrap_err();
        assert!(matches!(err, FeedError::Json(_)));
    }
}
