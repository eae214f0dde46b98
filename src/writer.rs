use crate::constants::{BLOCK_END, HEADER_PREFIX, SUBSCRIBE_COMMAND};
use crate::error::Result;
use crate::types::Partition;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Header text for a block: the display name cut at its first `(` when one
/// is known, otherwise the key itself. Both are whitespace-trimmed.
pub fn block_header(key: &str, names: Option<&BTreeMap<String, String>>) -> String {
    match names.and_then(|names| names.get(key)) {
        Some(name) => {
            let head = match name.find('(') {
                Some(paren) => &name[..paren],
                None => name.as_str(),
            };
            head.trim().to_string()
        }
        None => key.trim().to_string(),
    }
}

/// Renders a partition as Slack `/feed subscribe` blocks.
///
/// Blocks follow key order; URLs inside a block are sorted and
/// de-duplicated. Every block ends with a `# ` marker line.
pub fn render_feed(partition: &Partition, names: Option<&BTreeMap<String, String>>) -> String {
    let mut out = String::new();

    for (key, urls) in partition {
        out.push_str(HEADER_PREFIX);
        out.push_str(&block_header(key, names));
        out.push('\n');

        let mut sorted: Vec<&String> = urls.iter().collect();
        sorted.sort();
        sorted.dedup();
        for url in sorted {
            out.push_str(SUBSCRIBE_COMMAND);
            out.push(' ');
            out.push_str(url);
            out.push('\n');
        }

        out.push_str(BLOCK_END);
        out.push('\n');
    }

    out
}

/// Writes the rendered manifest to `path`, replacing any existing file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn write_feed(
    path: &Path,
    partition: &Partition,
    names: Option<&BTreeMap<String, String>>,
) -> Result<()> {
    let text = render_feed(partition, names);
    debug!(bytes = text.len(), "rendered manifest");

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;

    info!(blocks = partition.len(), "wrote manifest");
    Ok(())
}
