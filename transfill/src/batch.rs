//! Chunked, provider-friendly batch translation.

use std::time::Duration;

use futures::future;

use crate::{providers::Translator, types::BatchResult};

/// Batch sizing and pacing for bulk translation.
///
/// Explicit fields rather than module constants so tests can use near-zero
/// pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Number of texts translated concurrently per chunk.
    pub batch_size: usize,
    /// Pause between chunks (not after the last) to avoid throttling.
    pub pause: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        BatchOptions {
            batch_size: 10,
            pause: Duration::from_secs(1),
        }
    }
}

impl BatchOptions {
    pub fn new(batch_size: usize, pause: Duration) -> Self {
        BatchOptions { batch_size, pause }
    }

    /// Translates `texts` into `target_language` in fixed-size chunks.
    ///
    /// Within a chunk all provider calls run concurrently and every one is
    /// allowed to settle; one item's failure never cancels its siblings.
    /// The output preserves input order across chunk boundaries, one
    /// [`BatchResult`] per input text.
    pub async fn translate_batch(
        &self,
        texts: &[String],
        target_language: &str,
        translator: &dyn Translator,
    ) -> Vec<BatchResult> {
        let mut results = Vec::with_capacity(texts.len());
        let chunk_size = self.batch_size.max(1);
        let chunk_count = texts.len().div_ceil(chunk_size);

        for (index, chunk) in texts.chunks(chunk_size).enumerate() {
            let settled = future::join_all(
                chunk
                    .iter()
                    .map(|text| translator.translate(text, target_language)),
            )
            .await;

            for (text, outcome) in chunk.iter().zip(settled) {
                results.push(BatchResult {
                    source_text: text.clone(),
                    outcome: outcome.map_err(|e| e.to_string()),
                });
            }

            if index + 1 < chunk_count {
                tokio::time::sleep(self.pause).await;
            }
        }

        results
    }
}
