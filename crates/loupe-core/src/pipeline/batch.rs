//! Concurrent batch extraction with per-item failure isolation.
//!
//! One task per attachment, bounded by a semaphore. Results land in a map
//! keyed by input position, so a consumer iterating keys in ascending order
//! sees the original attachment order no matter which extraction finished
//! first. Nothing a single item does (fetch error, bad bytes, panic) can
//! fail its siblings; it just leaves no entry.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::types::ExtractedText;

use super::inspector::Inspector;
use super::source::AttachmentSource;

/// Extract metadata from every source, concurrently.
///
/// Completes only after every item has either produced a result or
/// definitively failed; there is no early-return mode. A caller-level
/// timeout that abandons this future leaves in-flight fetches to finish on
/// their own, ignored.
pub async fn extract_all(
    inspector: &Inspector,
    sources: Vec<Box<dyn AttachmentSource>>,
) -> BTreeMap<usize, ExtractedText> {
    let semaphore = Arc::new(Semaphore::new(inspector.parallel_fetches()));
    let mut handles = Vec::with_capacity(sources.len());

    for (index, source) in sources.into_iter().enumerate() {
        let permit = semaphore.clone().acquire_owned().await;
        if permit.is_err() {
            tracing::warn!("Extraction semaphore closed unexpectedly; stopping batch");
            break;
        }
        let permit = permit.unwrap();
        let inspector = inspector.clone();

        let handle = tokio::spawn(async move {
            let result = extract_single(&inspector, source.as_ref()).await;
            drop(permit);
            (index, result)
        });
        handles.push(handle);
    }

    // The result map is written only here, after each task has finished.
    let mut results = BTreeMap::new();
    for handle in handles {
        match handle.await {
            Ok((index, Some(extracted))) => {
                results.insert(index, extracted);
            }
            Ok((_, None)) => {}
            Err(e) => tracing::error!("Extraction task panicked: {e}"),
        }
    }
    results
}

/// Probe a sequence for the first attachment carrying metadata.
///
/// Sequential on purpose: one item at a time, stopping at the first hit, so
/// a receipt-time check costs as little as possible. Use [`extract_all`]
/// when every item's text is wanted.
pub async fn scan_first(
    inspector: &Inspector,
    sources: &[Box<dyn AttachmentSource>],
) -> Option<usize> {
    for (index, source) in sources.iter().enumerate() {
        if extract_single(inspector, source.as_ref()).await.is_some() {
            return Some(index);
        }
    }
    None
}

/// Fetch one source and run extraction, swallowing per-item failures.
async fn extract_single(
    inspector: &Inspector,
    source: &dyn AttachmentSource,
) -> Option<ExtractedText> {
    let start = std::time::Instant::now();
    let bytes = match source.fetch().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Skipping {}: {e}", source.name());
            return None;
        }
    };
    tracing::trace!("  Fetch: {:?} ({} bytes)", start.elapsed(), bytes.len());

    match inspector.extract_bytes(bytes) {
        Ok(extracted) => extracted,
        Err(e) => {
            tracing::warn!("Skipping {}: {e}", source.name());
            None
        }
    }
}
