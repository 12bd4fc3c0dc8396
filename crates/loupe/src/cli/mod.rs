//! Command implementations.

pub mod config;
pub mod inspect;
pub mod scan;

use loupe_core::pipeline::{AttachmentSource, FileSource, UrlSource};
use loupe_core::Config;
use std::time::Duration;

/// Turn CLI inputs into attachment sources, applying the configured
/// pre-filter to local files.
///
/// URLs pass straight through (the fetch itself reports anything wrong);
/// local paths are dropped with a warning when their extension is not
/// configured or the file exceeds the size cap. Returns the sources plus
/// each one's input label, index-aligned with the batch results.
pub(crate) fn build_sources(
    inputs: &[String],
    config: &Config,
) -> (Vec<Box<dyn AttachmentSource>>, Vec<String>) {
    let client = reqwest::Client::new();
    let timeout = Duration::from_millis(config.extraction.fetch_timeout_ms);

    let mut sources: Vec<Box<dyn AttachmentSource>> = Vec::new();
    let mut labels = Vec::new();

    for input in inputs {
        if is_url(input) {
            sources.push(Box::new(UrlSource::new(
                input.clone(),
                client.clone(),
                timeout,
            )));
            labels.push(input.clone());
            continue;
        }

        if !config.filter.matches_extension(input) {
            tracing::warn!("Skipping {input}: extension not in filter.extensions");
            continue;
        }
        // Paths from scripts or env vars may arrive with an unexpanded ~
        let path = shellexpand::tilde(input.as_str()).into_owned();
        match std::fs::metadata(&path) {
            Ok(meta) if meta.len() > config.filter.max_file_size_bytes() => {
                tracing::warn!(
                    "Skipping {input}: {} bytes exceeds the {} MB cap",
                    meta.len(),
                    config.filter.max_file_size_mb
                );
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Skipping {input}: {e}");
                continue;
            }
        }
        sources.push(Box::new(FileSource::new(path)));
        labels.push(input.clone());
    }

    (sources, labels)
}

fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}
