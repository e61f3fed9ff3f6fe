use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Round a currency amount to cents.
///
/// Rounds the exact binary value of `value`: amounts that sit exactly halfway
/// between two cents go to the even cent, and amounts whose product with 100
/// only looks like a half after float rounding go to the nearer cent.
pub fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    let floor = scaled.floor();
    if scaled - floor != 0.5 {
        return scaled.round() / 100.0;
    }

    // value * 200 - (2 * floor + 1), computed exactly: value * 8 is exact and
    // mul_add rounds once.
    let offset = (value * 8.0).mul_add(25.0, -(floor * 2.0 + 1.0));
    let cents = if offset > 0.0 {
        floor + 1.0
    } else if offset < 0.0 {
        floor
    } else {
        scaled.round_ties_even()
    };
    cents / 100.0
}

/// One point-of-sale order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: u32,
    pub total_price: f64,
    pub sales_tax: f64,
    pub placed_at: NaiveDateTime,
    pub tips: u32,
    pub employee_id: u32,
    pub customer_id: u32,
}

impl OrderRecord {
    pub fn date(&self) -> NaiveDate {
        self.placed_at.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.placed_at.time()
    }
}

/// One drink line belonging to an order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrinkRecord {
    pub id: u32,
    pub order_id: u32,
    pub item_id: u32,
    pub cup_size_id: u32,
    pub sugar_level_id: u32,
    pub ice_amount_id: u32,
    pub topping1_id: Option<u32>,
    pub topping2_id: Option<u32>,
    /// Unit price including cup size and toppings, rounded to cents.
    pub total_drink_price: f64,
    pub quantity: u32,
}

impl DrinkRecord {
    /// Amount this line adds to its order subtotal.
    pub fn contribution(&self) -> f64 {
        self.total_drink_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub loyalty_points: u32,
}
