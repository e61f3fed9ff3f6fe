use brewgen_core::{DrinkRecord, MenuPriceIndex, OrderRecord, round_cents};
use tracing::debug;

use crate::context::GenerationContext;
use crate::drink::DrinkComposer;
use crate::errors::GenerationError;
use crate::sampler::Sampler;
use crate::timestamp::{TimestampSampler, is_peak_date};

/// Cumulative order total that ends a run.
pub const REVENUE_THRESHOLD: f64 = 1_250_000.0;
pub const SALES_TAX_RATE: f64 = 0.0625;
pub const EMPLOYEE_COUNT: u32 = 10;
pub const CUSTOMER_ID_MAX: u32 = 250;

/// Tax and total for an order subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    pub sales_tax: f64,
    pub total_price: f64,
}

pub fn settle_order(drinks_price: f64, tips: u32) -> OrderTotals {
    let sales_tax = round_cents(SALES_TAX_RATE * drinks_price);
    let total_price = round_cents(drinks_price + sales_tax + f64::from(tips));
    OrderTotals {
        sales_tax,
        total_price,
    }
}

/// Everything an order loop produced.
#[derive(Debug, Clone)]
pub struct OrderBatch {
    pub orders: Vec<OrderRecord>,
    pub drinks: Vec<DrinkRecord>,
    pub revenue: f64,
    pub peak_orders: u64,
}

/// Revenue-bounded order loop.
#[derive(Debug)]
pub struct OrderGenerator<'a> {
    composer: DrinkComposer<'a>,
    timestamps: TimestampSampler,
    ctx: GenerationContext,
    peak_orders: u64,
}

impl<'a> OrderGenerator<'a> {
    pub fn new(menu: &'a MenuPriceIndex) -> Self {
        Self {
            composer: DrinkComposer::new(menu),
            timestamps: TimestampSampler::new(),
            ctx: GenerationContext::new(),
            peak_orders: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.ctx.revenue() >= REVENUE_THRESHOLD
    }

    pub fn context(&self) -> &GenerationContext {
        &self.ctx
    }

    /// Generate one order and its drinks.
    pub fn next_order<S: Sampler>(
        &mut self,
        sampler: &mut S,
    ) -> Result<OrderRecord, GenerationError> {
        let mut num_drinks = sampler.int_in(1, 3);
        let placed_at = self.timestamps.sample(sampler);
        if is_peak_date(placed_at) {
            num_drinks += sampler.int_in(1, 3);
            self.peak_orders += 1;
        }

        let order_id = self.ctx.current_order_id();
        let mut drinks_price = 0.0;
        for _ in 0..num_drinks {
            let (_, contribution) = self.composer.compose(order_id, &mut self.ctx, sampler)?;
            drinks_price += contribution;
        }

        let tips = sampler.int_in(1, 5);
        let totals = settle_order(drinks_price, tips);
        let employee_id = sampler.int_in(1, EMPLOYEE_COUNT);
        let customer_id = sampler.int_in(1, CUSTOMER_ID_MAX);

        let order = OrderRecord {
            id: order_id,
            total_price: totals.total_price,
            sales_tax: totals.sales_tax,
            placed_at,
            tips,
            employee_id,
            customer_id,
        };
        self.ctx.record_order(order.clone());
        Ok(order)
    }

    /// Generate orders until cumulative revenue reaches the threshold.
    pub fn run<S: Sampler>(mut self, sampler: &mut S) -> Result<OrderBatch, GenerationError> {
        while !self.is_finished() {
            let order_id = self.next_order(sampler)?.id;
            if order_id % 10_000 == 0 {
                debug!(
                    orders = order_id,
                    revenue = self.ctx.revenue(),
                    "order generation progress"
                );
            }
        }

        let peak_orders = self.peak_orders;
        let (orders, drinks, revenue) = self.ctx.into_parts();
        Ok(OrderBatch {
            orders,
            drinks,
            revenue,
            peak_orders,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::sampler::SeededSampler;

    /// Scripted integer draws with a fixed timestamp.
    struct Scripted {
        ints: VecDeque<u32>,
        at: NaiveDateTime,
    }

    impl Sampler for Scripted {
        fn int_in(&mut self, low: u32, high: u32) -> u32 {
            let value = self.ints.pop_front().expect("scripted draw available");
            assert!((low..=high).contains(&value), "{value} outside {low}..={high}");
            value
        }

        fn timestamp_between(
            &mut self,
            _start: NaiveDateTime,
            _end: NaiveDateTime,
        ) -> NaiveDateTime {
            self.at
        }
    }

    fn noon(month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, month, day)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid datetime")
    }

    fn small_menu() -> MenuPriceIndex {
        MenuPriceIndex::from_prices([(1, 2.50), (151, 3.00), (154, 0.50)])
    }

    // item, cup, sugar, ice, no topping, quantity 1
    const PLAIN_DRINK: [u32; 6] = [1, 151, 177, 183, 2, 1];

    #[test]
    fn settles_tax_and_total() {
        let totals = settle_order(5.50, 3);
        assert_eq!(totals.sales_tax, 0.34);
        assert_eq!(totals.total_price, 8.84);
    }

    #[test]
    fn half_cent_tax_rounds_to_even() {
        let totals = settle_order(18.0, 1);
        assert_eq!(totals.sales_tax, 1.12);
        assert_eq!(totals.total_price, 20.12);

        let totals = settle_order(10.0, 4);
        assert_eq!(totals.sales_tax, 0.62);
        assert_eq!(totals.total_price, 14.62);
    }

    #[test]
    fn returned_order_matches_recorded_row() {
        let menu = small_menu();
        let mut generator = OrderGenerator::new(&menu);
        let mut draws = vec![1, 0, 0];
        draws.extend(PLAIN_DRINK);
        draws.extend([2, 4, 9]);
        let mut sampler = Scripted {
            ints: draws.into(),
            at: noon(4, 1),
        };

        let order = generator.next_order(&mut sampler).expect("order");
        assert_eq!(generator.context().orders(), std::slice::from_ref(&order));
    }

    #[test]
    fn single_drink_order() {
        let menu = small_menu();
        let mut generator = OrderGenerator::new(&menu);
        let mut draws = vec![1, 0, 0];
        draws.extend(PLAIN_DRINK);
        draws.extend([3, 7, 42]);
        let mut sampler = Scripted {
            ints: draws.into(),
            at: noon(3, 3),
        };

        let order = generator.next_order(&mut sampler).expect("order");
        assert_eq!(order.id, 1);
        assert_eq!(order.sales_tax, 0.34);
        assert_eq!(order.tips, 3);
        assert_eq!(order.total_price, 8.84);
        assert_eq!(order.employee_id, 7);
        assert_eq!(order.customer_id, 42);
        assert_eq!(generator.context().revenue(), 8.84);
        assert_eq!(generator.context().current_order_id(), 2);
        assert!(sampler.ints.is_empty());
    }

    #[test]
    fn peak_date_adds_drinks() {
        let menu = small_menu();
        let mut generator = OrderGenerator::new(&menu);
        // one drink, then the peak increment of two more
        let mut draws = vec![1, 0, 0, 2];
        for _ in 0..3 {
            draws.extend(PLAIN_DRINK);
        }
        draws.extend([1, 1, 1]);
        let mut sampler = Scripted {
            ints: draws.into(),
            at: noon(8, 30),
        };

        generator.next_order(&mut sampler).expect("order");
        assert_eq!(generator.context().drinks().len(), 3);
        assert!(generator.context().drinks().iter().all(|drink| drink.order_id == 1));
        assert!(sampler.ints.is_empty());
        assert_eq!(generator.peak_orders, 1);
    }

    #[test]
    fn drink_ids_continue_across_orders() {
        let menu = small_menu();
        let mut generator = OrderGenerator::new(&menu);
        let mut draws = Vec::new();
        for count in [2, 1] {
            draws.extend([count, 0, 0]);
            for _ in 0..count {
                draws.extend(PLAIN_DRINK);
            }
            draws.extend([1, 1, 1]);
        }
        let mut sampler = Scripted {
            ints: draws.into(),
            at: noon(5, 5),
        };

        generator.next_order(&mut sampler).expect("first order");
        generator.next_order(&mut sampler).expect("second order");

        let drinks = generator.context().drinks();
        let pairs: Vec<(u32, u32)> = drinks.iter().map(|d| (d.id, d.order_id)).collect();
        assert_eq!(pairs, vec![(1, 1), (2, 1), (3, 2)]);
    }

    #[test]
    fn run_stops_at_first_crossing() {
        let menu = MenuPriceIndex::from_prices(brewgen_core::PARTITION_IDS.map(|id| (id, 4.0)));
        let mut sampler = SeededSampler::new(99);
        let batch = OrderGenerator::new(&menu).run(&mut sampler).expect("run");

        assert!(batch.revenue >= REVENUE_THRESHOLD);
        let last = batch.orders.last().expect("at least one order");
        assert!(batch.revenue - last.total_price < REVENUE_THRESHOLD);
        assert_eq!(last.id as usize, batch.orders.len());
    }
}
