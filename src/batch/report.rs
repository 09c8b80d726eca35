//! Batch statistics and persistence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::{EmailForgeError, Result};

/// Duplicate counts for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateStats {
    pub total: usize,
    pub unique: usize,
    /// Sum of `count - 1` over every value seen more than once
    pub duplicates: usize,
}

impl DuplicateStats {
    pub fn proportion(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.duplicates as f64 / self.total as f64
        }
    }
}

/// Count unique values and surplus copies
pub fn duplicate_stats(emails: &[String]) -> DuplicateStats {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for email in emails {
        *counts.entry(email.as_str()).or_insert(0) += 1;
    }

    let duplicates = counts.values().filter(|&&c| c > 1).map(|c| c - 1).sum();
    DuplicateStats {
        total: emails.len(),
        unique: counts.len(),
        duplicates,
    }
}

/// Share of a batch that repeats an earlier value (0 for an empty batch)
pub fn duplicate_proportion(emails: &[String]) -> f64 {
    duplicate_stats(emails).proportion()
}

/// Summary of one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub name: String,
    pub surname: String,
    pub count: usize,
    pub unique: usize,
    pub duplicates: usize,
    pub duplicate_proportion: f64,
    /// Base seed, when the run was seeded
    pub seed: Option<u64>,
    pub workers: usize,
    pub elapsed_ms: u64,
    pub generated_at: DateTime<Utc>,
}

impl BatchReport {
    /// Build a report for a finished batch
    pub fn new(
        name: &str,
        surname: &str,
        emails: &[String],
        seed: Option<u64>,
        workers: usize,
        elapsed: Duration,
    ) -> Self {
        let stats = duplicate_stats(emails);
        Self {
            name: name.to_string(),
            surname: surname.to_string(),
            count: stats.total,
            unique: stats.unique,
            duplicates: stats.duplicates,
            duplicate_proportion: stats.proportion(),
            seed,
            workers,
            elapsed_ms: elapsed.as_millis() as u64,
            generated_at: Utc::now(),
        }
    }

    /// Generation throughput
    pub fn emails_per_second(&self) -> f64 {
        self.count as f64 / (self.elapsed_ms.max(1) as f64 / 1000.0)
    }
}

/// Emails of a batch together with its report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutput {
    pub report: BatchReport,
    pub emails: Vec<String>,
}

impl BatchOutput {
    /// Load a batch from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EmailForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })?;

        serde_json::from_str(&content).map_err(|e| EmailForgeError::parse(e.to_string(), None))
    }

    /// Save batch to file
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EmailForgeError::io(e.to_string(), Some(parent.to_string_lossy().to_string()))
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            EmailForgeError::internal(format!("Failed to serialize batch: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| {
            EmailForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })
    }
}
