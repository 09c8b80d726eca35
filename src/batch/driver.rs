//! Batch driver - run the synthesizer many times, in parallel chunks

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Semaphore;

use super::report::{BatchOutput, BatchReport};
use crate::error::{EmailForgeError, Result};
use crate::internal_error;
use crate::synth::EmailSynthesizer;

/// Batch configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of emails to generate
    pub count: usize,
    /// Base seed; chunk `i` is seeded with `seed + i`
    pub seed: Option<u64>,
    /// Chunks generated concurrently
    pub workers: usize,
    /// Emails per chunk
    pub chunk_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            seed: None,
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            chunk_size: 10_000,
        }
    }
}

/// Generate `count` emails sequentially from one random source
pub fn generate_batch<R: Rng + ?Sized>(
    synthesizer: &EmailSynthesizer,
    rng: &mut R,
    name: &str,
    surname: &str,
    count: usize,
) -> Result<Vec<String>> {
    (0..count)
        .map(|_| synthesizer.generate_email(rng, name, surname))
        .collect()
}

/// Parallel batch generator.
///
/// Chunks run on blocking tasks with independent random sources and are
/// concatenated in chunk order, so a seeded run with the same chunk size is
/// reproducible regardless of scheduling.
pub struct BatchGenerator {
    synthesizer: EmailSynthesizer,
    config: BatchConfig,
    semaphore: Arc<Semaphore>,
}

impl BatchGenerator {
    /// Create a new batch generator
    pub fn new(synthesizer: EmailSynthesizer, config: BatchConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.workers.max(1)));
        Self {
            synthesizer,
            config,
            semaphore,
        }
    }

    /// Get batch configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Number of chunks the batch is split into
    pub fn chunk_count(&self) -> usize {
        self.config.count.div_ceil(self.config.chunk_size.max(1))
    }

    /// Run the batch. `on_progress` receives the number of emails done so far
    /// after each chunk.
    pub async fn run<F>(&self, name: &str, surname: &str, on_progress: F) -> Result<BatchOutput>
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        let started = Instant::now();
        let count = self.config.count;
        let chunk_size = self.config.chunk_size.max(1);
        let on_progress = Arc::new(on_progress);
        let done = Arc::new(AtomicU64::new(0));

        let tasks = (0..self.chunk_count()).map(|chunk| {
            let len = chunk_size.min(count - chunk * chunk_size);
            let seed = self.config.seed.map(|s| s.wrapping_add(chunk as u64));
            let synthesizer = self.synthesizer.clone();
            let semaphore = self.semaphore.clone();
            let on_progress = on_progress.clone();
            let done = done.clone();
            let name = name.to_string();
            let surname = surname.to_string();

            async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| internal_error!("Worker pool closed: {}", e))?;

                let emails = tokio::task::spawn_blocking(move || {
                    let mut rng = match seed {
                        Some(seed) => StdRng::seed_from_u64(seed),
                        None => StdRng::from_entropy(),
                    };
                    let emails = generate_batch(&synthesizer, &mut rng, &name, &surname, len)?;
                    let total = done.fetch_add(len as u64, Ordering::Relaxed) + len as u64;
                    on_progress(total);
                    Ok::<_, EmailForgeError>(emails)
                })
                .await??;

                Ok::<_, EmailForgeError>(emails)
            }
        });

        let results = join_all(tasks).await;

        let mut emails = Vec::with_capacity(count);
        for result in results {
            emails.extend(result?);
        }

        let elapsed = started.elapsed();
        let report = BatchReport::new(
            name,
            surname,
            &emails,
            self.config.seed,
            self.config.workers.max(1),
            elapsed,
        );

        tracing::info!(
            count = %report.count,
            unique = %report.unique,
            duplicate_proportion = %report.duplicate_proportion,
            chunks = %self.chunk_count(),
            elapsed_ms = %report.elapsed_ms,
            "Batch generation completed"
        );

        Ok(BatchOutput { report, emails })
    }
}
