use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Base drinks (teas, coffees, slushes).
pub const DRINK_ITEM_IDS: RangeInclusive<u32> = 1..=150;
pub const CUP_SIZE_IDS: RangeInclusive<u32> = 151..=153;
pub const TOPPING_IDS: RangeInclusive<u32> = 154..=176;
pub const SUGAR_LEVEL_IDS: RangeInclusive<u32> = 177..=182;
pub const ICE_AMOUNT_IDS: RangeInclusive<u32> = 183..=186;
/// Every id the generator may look up.
pub const PARTITION_IDS: RangeInclusive<u32> = 1..=186;

/// Row of the menu table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "menuID")]
    pub id: u32,
    #[serde(rename = "itemName")]
    pub name: String,
    #[serde(rename = "itemPrice")]
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub description: String,
}

/// Role an item id plays when composing a drink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Drink,
    CupSize,
    Topping,
    SugarLevel,
    IceAmount,
}

impl MenuCategory {
    pub fn for_id(id: u32) -> Option<Self> {
        if DRINK_ITEM_IDS.contains(&id) {
            Some(Self::Drink)
        } else if CUP_SIZE_IDS.contains(&id) {
            Some(Self::CupSize)
        } else if TOPPING_IDS.contains(&id) {
            Some(Self::Topping)
        } else if SUGAR_LEVEL_IDS.contains(&id) {
            Some(Self::SugarLevel)
        } else if ICE_AMOUNT_IDS.contains(&id) {
            Some(Self::IceAmount)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Drink => "drink",
            Self::CupSize => "cup_size",
            Self::Topping => "topping",
            Self::SugarLevel => "sugar_level",
            Self::IceAmount => "ice_amount",
        }
    }
}

/// Price lookup by menu item id.
#[derive(Debug, Clone, Default)]
pub struct MenuPriceIndex {
    prices: BTreeMap<u32, f64>,
}

impl MenuPriceIndex {
    /// Build the index from menu rows, rejecting duplicate ids and bad prices.
    pub fn from_items(items: &[MenuItem]) -> Result<Self> {
        let mut prices = BTreeMap::new();
        for item in items {
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(Error::InvalidMenu(format!(
                    "item {} has invalid price {}",
                    item.id, item.price
                )));
            }
            if prices.insert(item.id, item.price).is_some() {
                return Err(Error::InvalidMenu(format!("duplicate menu id {}", item.id)));
            }
        }
        Ok(Self { prices })
    }

    pub fn from_prices<I>(prices: I) -> Self
    where
        I: IntoIterator<Item = (u32, f64)>,
    {
        Self {
            prices: prices.into_iter().collect(),
        }
    }

    /// Load and index a menu CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        let items = load_menu_csv(path)?;
        Self::from_items(&items)
    }

    pub fn price_of(&self, item_id: u32) -> Result<f64> {
        self.prices
            .get(&item_id)
            .copied()
            .ok_or(Error::MissingPrice(item_id))
    }

    pub fn contains(&self, item_id: u32) -> bool {
        self.prices.contains_key(&item_id)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Ids of the partition that have no price.
    pub fn missing_ids(&self) -> Vec<u32> {
        PARTITION_IDS.filter(|id| !self.contains(*id)).collect()
    }

    /// Fails with every missing id when the menu cannot price all drinks.
    pub fn validate_partition(&self) -> Result<()> {
        let missing = self.missing_ids();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::IncompleteMenu(missing))
        }
    }
}

/// Parse menu rows from CSV in `menuID,itemName,itemPrice,category,photo,description`
/// column order.
///
/// A leading header row is optional: when the first field of the first row is
/// not an id, that row names the columns and rows are matched by name.
/// Otherwise every row is data and columns are read by position.
pub fn read_menu_csv<R: Read>(reader: R) -> Result<Vec<MenuItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut headers: Option<csv::StringRecord> = None;
    let mut items = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if index == 0 && is_header_row(&record) {
            headers = Some(record);
            continue;
        }
        let item: MenuItem = record.deserialize(headers.as_ref())?;
        items.push(item);
    }

    if items.is_empty() {
        return Err(Error::InvalidMenu("menu table has no rows".to_string()));
    }

    Ok(items)
}

fn is_header_row(record: &csv::StringRecord) -> bool {
    record
        .get(0)
        .is_some_and(|field| field.parse::<u32>().is_err())
}

pub fn load_menu_csv(path: &Path) -> Result<Vec<MenuItem>> {
    let file = File::open(path)?;
    read_menu_csv(file)
}
