pub mod csv;
pub mod staging;

pub use self::csv::{
    CUSTOMERS_FILE, DRINKS_FILE, ORDERS_FILE, write_customers_csv, write_drinks_csv,
    write_orders_csv,
};
pub use staging::StagedRun;
