use std::path::PathBuf;

use brewgen_core::{CustomerRecord, DrinkRecord, OrderRecord};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEED: u64 = 2025;

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory where run directories are committed.
    pub out_dir: PathBuf,
    /// Seed for every random draw in the run.
    pub seed: u64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("out"),
            seed: DEFAULT_SEED,
        }
    }
}

/// Fully generated, not yet written, dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub orders: Vec<OrderRecord>,
    pub drinks: Vec<DrinkRecord>,
    pub customers: Vec<CustomerRecord>,
    pub revenue: f64,
    pub peak_orders: u64,
}

/// Summary of one written CSV file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetReport {
    pub name: String,
    pub file: String,
    pub rows: u64,
    pub bytes: u64,
}

/// Report for a generation run, written as `generation_report.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub started_at: String,
    pub datasets: Vec<DatasetReport>,
    pub revenue: f64,
    pub revenue_threshold: f64,
    pub peak_orders: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64, started_at: String, revenue_threshold: f64) -> Self {
        Self {
            run_id,
            seed,
            started_at,
            datasets: Vec::new(),
            revenue: 0.0,
            revenue_threshold,
            peak_orders: 0,
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn record_dataset(&mut self, name: &str, file: &str, rows: u64, bytes: u64) {
        self.bytes_written = self.bytes_written.saturating_add(bytes);
        self.datasets.push(DatasetReport {
            name: name.to_string(),
            file: file.to_string(),
            rows,
            bytes,
        });
    }

    pub fn dataset(&self, name: &str) -> Option<&DatasetReport> {
        self.datasets.iter().find(|dataset| dataset.name == name)
    }
}
