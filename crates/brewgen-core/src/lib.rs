//! Core contracts for brewgen.
//!
//! This crate defines the menu table, the record types emitted by a generation
//! run, and the fixed item-id partition shared by the generator and the CLI.

pub mod error;
pub mod menu;
pub mod records;

pub use error::{Error, Result};
pub use menu::{
    CUP_SIZE_IDS, DRINK_ITEM_IDS, ICE_AMOUNT_IDS, MenuCategory, MenuItem, MenuPriceIndex,
    PARTITION_IDS, SUGAR_LEVEL_IDS, TOPPING_IDS, load_menu_csv, read_menu_csv,
};
pub use records::{CustomerRecord, DrinkRecord, OrderRecord, round_cents};
