use brewgen_core::{DrinkRecord, OrderRecord};

/// Mutable state of one generation run.
///
/// Owns the order and drink id counters, the running revenue, and the ledgers
/// of emitted rows. One context backs exactly one run.
#[derive(Debug)]
pub struct GenerationContext {
    next_order_id: u32,
    next_drink_id: u32,
    revenue: f64,
    orders: Vec<OrderRecord>,
    drinks: Vec<DrinkRecord>,
}

impl Default for GenerationContext {
    fn default() -> Self {
        Self {
            next_order_id: 1,
            next_drink_id: 1,
            revenue: 0.0,
            orders: Vec::new(),
            drinks: Vec::new(),
        }
    }
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next emitted order will carry.
    pub fn current_order_id(&self) -> u32 {
        self.next_order_id
    }

    /// Consume the next drink id.
    pub fn take_drink_id(&mut self) -> u32 {
        let id = self.next_drink_id;
        self.next_drink_id += 1;
        id
    }

    pub fn record_drink(&mut self, drink: DrinkRecord) {
        self.drinks.push(drink);
    }

    /// Append a finished order and advance the order counter and revenue.
    pub fn record_order(&mut self, order: OrderRecord) {
        self.revenue += order.total_price;
        self.next_order_id += 1;
        self.orders.push(order);
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    pub fn drinks(&self) -> &[DrinkRecord] {
        &self.drinks
    }

    pub fn into_parts(self) -> (Vec<OrderRecord>, Vec<DrinkRecord>, f64) {
        (self.orders, self.drinks, self.revenue)
    }
}
