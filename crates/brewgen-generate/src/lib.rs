//! Revenue-bounded dataset generation for brewgen.
//!
//! This crate turns a menu price table and two name pools into deterministic
//! `orders`, `drinks`, and `customers` CSV datasets that keep their
//! identifiers referentially consistent.

pub mod assets;
pub mod context;
pub mod customer;
pub mod drink;
pub mod engine;
pub mod errors;
pub mod integrity;
pub mod model;
pub mod order;
pub mod output;
pub mod sampler;
pub mod timestamp;

pub use assets::AssetsLoader;
pub use context::GenerationContext;
pub use customer::{CUSTOMER_COUNT, CustomerGenerator, NamePools};
pub use drink::DrinkComposer;
pub use engine::{GenerationEngine, GenerationResult, REPORT_FILE, generate_dataset, read_report};
pub use errors::GenerationError;
pub use integrity::{IntegrityReport, IntegrityViolation, check_dataset};
pub use model::{Dataset, DatasetReport, GenerateOptions, GenerationReport};
pub use order::{OrderBatch, OrderGenerator, OrderTotals, REVENUE_THRESHOLD, settle_order};
pub use sampler::{Sampler, SeededSampler};
pub use timestamp::{TimestampSampler, is_peak_date};
