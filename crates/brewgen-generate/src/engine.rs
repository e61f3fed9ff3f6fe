use std::path::PathBuf;
use std::time::Instant;

use brewgen_core::MenuPriceIndex;
use tracing::{info, warn};

use crate::customer::{CustomerGenerator, NamePools};
use crate::errors::GenerationError;
use crate::integrity::check_dataset;
use crate::model::{Dataset, GenerateOptions, GenerationReport};
use crate::order::{OrderGenerator, REVENUE_THRESHOLD};
use crate::output::{
    CUSTOMERS_FILE, DRINKS_FILE, ORDERS_FILE, StagedRun, write_customers_csv, write_drinks_csv,
    write_orders_csv,
};
use crate::sampler::SeededSampler;

pub const REPORT_FILE: &str = "generation_report.json";

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub run_dir: PathBuf,
    pub report: GenerationReport,
}

/// Generate the full dataset in memory from one seeded sampler.
///
/// Orders (and their drinks) are drawn before customers.
pub fn generate_dataset(
    menu: &MenuPriceIndex,
    names: &NamePools,
    seed: u64,
) -> Result<Dataset, GenerationError> {
    menu.validate_partition()?;

    let mut sampler = SeededSampler::new(seed);
    let batch = OrderGenerator::new(menu).run(&mut sampler)?;
    let customers = CustomerGenerator::new(names).generate(&mut sampler);

    Ok(Dataset {
        orders: batch.orders,
        drinks: batch.drinks,
        customers,
        revenue: batch.revenue,
        peak_orders: batch.peak_orders,
    })
}

/// Entry point for generating and committing a run directory.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    pub fn run(
        &self,
        menu: &MenuPriceIndex,
        names: &NamePools,
    ) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let started_at = chrono::Utc::now();
        let seed = self.options.seed;

        info!(run_id = %run_id, seed, menu_items = menu.len(), "generation started");

        let dataset = generate_dataset(menu, names, seed).inspect_err(|err| {
            warn!(run_id = %run_id, error = %err, "generation failed");
        })?;

        info!(
            run_id = %run_id,
            orders = dataset.orders.len(),
            drinks = dataset.drinks.len(),
            customers = dataset.customers.len(),
            revenue = dataset.revenue,
            peak_orders = dataset.peak_orders,
            "dataset generated"
        );

        let integrity = check_dataset(&dataset);
        if !integrity.is_clean() {
            warn!(
                run_id = %run_id,
                violations = integrity.violations.len(),
                "integrity check failed"
            );
            return Err(GenerationError::Integrity(integrity.summary()));
        }

        let run_name = format!(
            "{}__run_{run_id}",
            started_at.format("%Y-%m-%dT%H-%M-%SZ")
        );
        let staged = StagedRun::begin(&self.options.out_dir, &run_name)?;

        let mut report = GenerationReport::new(
            run_id.clone(),
            seed,
            started_at.to_rfc3339(),
            REVENUE_THRESHOLD,
        );
        report.revenue = dataset.revenue;
        report.peak_orders = dataset.peak_orders;

        let bytes = write_orders_csv(&staged.path(ORDERS_FILE), &dataset.orders)?;
        report.record_dataset("orders", ORDERS_FILE, dataset.orders.len() as u64, bytes);

        let bytes = write_drinks_csv(&staged.path(DRINKS_FILE), &dataset.drinks)?;
        report.record_dataset("drinks", DRINKS_FILE, dataset.drinks.len() as u64, bytes);

        let bytes = write_customers_csv(&staged.path(CUSTOMERS_FILE), &dataset.customers)?;
        report.record_dataset(
            "customers",
            CUSTOMERS_FILE,
            dataset.customers.len() as u64,
            bytes,
        );

        report.duration_ms = start.elapsed().as_millis() as u64;
        staged.write_json(REPORT_FILE, &report)?;
        let run_dir = staged.commit()?;

        info!(
            run_id = %run_id,
            run_dir = %run_dir.display(),
            bytes_written = report.bytes_written,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult { run_dir, report })
    }
}

/// Read the report of a committed run directory.
pub fn read_report(run_dir: &std::path::Path) -> Result<GenerationReport, GenerationError> {
    let contents = std::fs::read_to_string(run_dir.join(REPORT_FILE))?;
    Ok(serde_json::from_str(&contents)?)
}
