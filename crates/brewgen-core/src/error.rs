use thiserror::Error;

/// Core error type shared across brewgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// An item id has no price in the menu table.
    #[error("no menu price for item {0}")]
    MissingPrice(u32),
    /// The menu does not cover the item-id partition.
    #[error("menu is missing {} item id(s): {:?}", .0.len(), .0)]
    IncompleteMenu(Vec<u32>),
    /// The menu table is malformed.
    #[error("invalid menu: {0}")]
    InvalidMenu(String),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results returned by brewgen crates.
pub type Result<T> = std::result::Result<T, Error>;
